//! Club management across the five club services.
//!
//! | Service        | Operations                                                  |
//! |----------------|-------------------------------------------------------------|
//! | clubaccounts   | summary, owned clubs, name reservation, create, rename, transfer, delete, suspend |
//! | clubhub        | lookup by id or member, recommendations, search             |
//! | clubpresence   | presence counters, setting the caller's presence            |
//! | clubprofile    | profile updates (see [`settings`])                          |
//! | clubroster     | membership and role changes                                 |
//!
//! Every function issues exactly one request. Non-2xx responses come back as
//! `XblError::Api` with the service's error document in `body`; the club
//! services use their own numeric codes there, for example:
//!
//! - `1010`: requested club name is not available
//! - `1013`: cannot remove the owner from the club
//! - `1014`: club name not reserved by the caller (call [`claim_club_name`] first)
//! - `1035`: all available name changes have been used
//! - `1038`: a title club needs a title family id

pub mod consts;
pub mod endpoint;
pub mod models;
pub mod settings;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::client::{ServiceCall, XboxClient};
use crate::config::RequestOptions;
use crate::error::{Result, XblError};
use crate::service::Service;

use endpoint::{ClubSearch, DEFAULT_DECORATIONS, IdSelector};
use models::{
    Club, ClubGenre, ClubPresence, ClubReservation, ClubRole, ClubSummary, ClubType,
    GetPresenceResponse, OwnedClubsResponse, SearchClubsResponse, UpdateRolesResponse,
};
use settings::ClubProfileUpdate;

/// clubsowned answers in a newer contract than the rest of clubaccounts.
const CLUBS_OWNED_CONTRACT_VERSION: u32 = 2;

/// Result of [`delete_club`], decided by the response status.
#[derive(Debug, Clone)]
pub enum DeleteClubOutcome {
    /// 200: the club is gone and its name is held for the caller.
    Reserved(ClubReservation),
    /// 202: the club is suspended and will be deleted later.
    Suspended(ClubSummary),
    /// Any other 2xx (normally 204): deleted immediately.
    Deleted,
}

// ── clubaccounts ───────────────────────────────────────────────────────

/// Summary of a club the caller owns, optionally scoped to one suspension
/// actor (`/suspension/{actor}`).
pub async fn get_club_summary(
    client: &XboxClient,
    club_id: &str,
    actor: Option<&str>,
) -> Result<ClubSummary> {
    let mut path = format!("/clubs/clubid({club_id})");
    if let Some(actor) = actor {
        path.push_str(&format!("/suspension/{actor}"));
    }
    client
        .send_json(ServiceCall::get(Service::ClubAccounts, path))
        .await
}

/// Clubs owned by the caller and the remaining creation quota.
pub async fn get_clubs_owned(client: &XboxClient) -> Result<OwnedClubsResponse> {
    let path = format!("/users/xuid({})/clubsowned", client.xuid());
    client
        .send_json(
            ServiceCall::get(Service::ClubAccounts, path)
                .contract_version(CLUBS_OWNED_CONTRACT_VERSION),
        )
        .await
}

/// Reserves a club name for a later [`create_club`].
pub async fn claim_club_name(client: &XboxClient, name: &str) -> Result<ClubReservation> {
    let call = ServiceCall::post(Service::ClubAccounts, "/clubs/reserve")
        .json(json!({ "name": name }));
    client.send_json(call).await
}

/// Creates a club.
///
/// Open and closed clubs need a name reserved with [`claim_club_name`]
/// first. A `title` genre club must name its title family.
///
/// # Errors
///
/// `XblError::Validation` when `club_type` or `genre` is `Unknown`, or when
/// `genre` is [`ClubGenre::Title`] and `title_family_id` is missing or nil.
/// Nothing is sent in either case.
pub async fn create_club(
    client: &XboxClient,
    name: &str,
    club_type: ClubType,
    genre: ClubGenre,
    title_family_id: Option<Uuid>,
) -> Result<ClubSummary> {
    if club_type == ClubType::Unknown || genre == ClubGenre::Unknown {
        return Err(XblError::validation(
            "club type and genre must be known values",
        ));
    }
    let title_family_id = title_family_id.filter(|id| !id.is_nil());
    if genre == ClubGenre::Title && title_family_id.is_none() {
        return Err(XblError::validation(
            "a title family id is required for a title club",
        ));
    }

    let mut body = json!({ "name": name, "type": club_type, "genre": genre });
    if let Some(id) = title_family_id {
        body["titleFamilyId"] = Value::String(id.to_string());
    }
    client
        .send_json(ServiceCall::post(Service::ClubAccounts, "/clubs/create").json(body))
        .await
}

/// Hands the club over to `xuid`.
pub async fn transfer_club_ownership(
    client: &XboxClient,
    club_id: &str,
    xuid: &str,
) -> Result<ClubSummary> {
    let call = ServiceCall::post(Service::ClubAccounts, format!("/clubs/clubid({club_id})"))
        .json(json!({ "method": "TransferOwnership", "user": xuid }));
    client.send_json(call).await
}

/// Renames a club. The service allows this once per club.
pub async fn rename_club(client: &XboxClient, club_id: &str, name: &str) -> Result<ClubSummary> {
    let call = ServiceCall::post(Service::ClubAccounts, format!("/clubs/clubid({club_id})"))
        .json(json!({ "method": "ChangeName", "name": name }));
    client.send_json(call).await
}

/// Deletes a club.
///
/// Non-secret clubs older than a week are usually suspended first (202)
/// and deleted by the service later; the name stays reserved for the owner
/// for `reservation_duration_after_suspension_in_hours`.
pub async fn delete_club(client: &XboxClient, club_id: &str) -> Result<DeleteClubOutcome> {
    let resp = client
        .send(ServiceCall::delete(
            Service::ClubAccounts,
            format!("/clubs/clubid({club_id})"),
        ))
        .await?;

    let outcome = match resp.status {
        StatusCode::OK => DeleteClubOutcome::Reserved(resp.json()?),
        StatusCode::ACCEPTED => DeleteClubOutcome::Suspended(resp.json()?),
        _ => DeleteClubOutcome::Deleted,
    };
    tracing::debug!(club_id, status = %resp.status, "club delete accepted");
    Ok(outcome)
}

/// Suspends a club until the service deletes it after `delete_after`.
/// [`unsuspend_club`] reverts this.
pub async fn suspend_club(
    client: &XboxClient,
    club_id: &str,
    delete_after: DateTime<Utc>,
) -> Result<()> {
    let body = json!({
        "actor": "owner",
        "deleteAfter": delete_after.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
    });
    let call = ServiceCall::put(
        Service::ClubAccounts,
        format!("/clubs/clubid({club_id})/suspension/owner"),
    )
    .json(body);
    client.send(call).await?;
    Ok(())
}

/// Cancels a pending suspension and deletion.
pub async fn unsuspend_club(client: &XboxClient, club_id: &str) -> Result<()> {
    client
        .send(ServiceCall::delete(
            Service::ClubAccounts,
            format!("/clubs/clubid({club_id})/suspension/owner"),
        ))
        .await?;
    Ok(())
}

// ── clubhub ────────────────────────────────────────────────────────────

async fn clubhub_lookup(
    client: &XboxClient,
    ids: &[&str],
    selector: IdSelector,
    decorations: &[&str],
) -> Result<SearchClubsResponse> {
    let path = endpoint::id_path(ids, selector, decorations)?;
    client
        .send_json(ServiceCall::get(Service::ClubHub, path))
        .await
}

/// One club by id. See [`get_clubs`] for `decorations`.
///
/// # Errors
///
/// `XblError::Parse` when the service answers with an empty club list.
pub async fn get_club(
    client: &XboxClient,
    club_id: &str,
    decorations: Option<&[&str]>,
) -> Result<Club> {
    get_clubs(client, &[club_id], decorations)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            XblError::Parse(serde::de::Error::custom(format!(
                "no club returned for id {club_id}"
            )))
        })
}

/// Up to ten clubs by id.
///
/// `decorations` selects the optional sub-objects; `None` requests
/// [`DEFAULT_DECORATIONS`].
pub async fn get_clubs(
    client: &XboxClient,
    club_ids: &[&str],
    decorations: Option<&[&str]>,
) -> Result<Vec<Club>> {
    let decorations = decorations.unwrap_or(&DEFAULT_DECORATIONS[..]);
    Ok(clubhub_lookup(client, club_ids, IdSelector::Ids, decorations)
        .await?
        .clubs)
}

/// Clubs `xuid` is associated with; the caller when `None`.
pub async fn get_club_associations(client: &XboxClient, xuid: Option<&str>) -> Result<Vec<Club>> {
    let xuid = xuid.unwrap_or_else(|| client.xuid());
    Ok(clubhub_lookup(client, &[xuid], IdSelector::Xuid, &["detail"])
        .await?
        .clubs)
}

/// Clubs recommended to the caller, optionally for one title.
pub async fn get_club_recommendations(
    client: &XboxClient,
    title_id: Option<&str>,
) -> Result<Vec<Club>> {
    let call = match title_id {
        Some(title_id) => ServiceCall::get(
            Service::ClubHub,
            format!("/clubs/recommendationsByTitle({title_id})/decoration/detail"),
        ),
        None => ServiceCall::post(Service::ClubHub, "/clubs/recommendations/decoration/detail"),
    };
    let resp: SearchClubsResponse = client.send_json(call).await?;
    Ok(resp.clubs)
}

/// Free-text club search with optional title/tag filters.
///
/// # Errors
///
/// `XblError::Validation` for an empty query, before any request.
pub async fn search_clubs(client: &XboxClient, search: &ClubSearch) -> Result<SearchClubsResponse> {
    let params = endpoint::search_params(search)?;
    client
        .send_json(ServiceCall::get(Service::ClubHub, "/clubs/search").query(params))
        .await
}

// ── clubpresence ───────────────────────────────────────────────────────

pub async fn get_presence_counts(client: &XboxClient, club_id: &str) -> Result<GetPresenceResponse> {
    client
        .send_json(ServiceCall::get(
            Service::ClubPresence,
            format!("/clubs/{club_id}/users/count"),
        ))
        .await
}

/// Records where `xuid` is within the club. Returns whether the service
/// answered 204.
pub async fn set_presence_within_club(
    client: &XboxClient,
    club_id: &str,
    xuid: &str,
    presence: ClubPresence,
) -> Result<bool> {
    let call = ServiceCall::post(
        Service::ClubPresence,
        format!("/clubs/{club_id}/users/xuid({xuid})"),
    )
    .json(json!({ "userPresenceState": presence }));
    let resp = client.send(call).await?;
    Ok(resp.status == StatusCode::NO_CONTENT)
}

// ── clubprofile ────────────────────────────────────────────────────────

/// Updates club profile settings from loose key/value pairs.
///
/// Keys are [`ClubSettingsContract`](settings::ClubSettingsContract) field
/// names in snake_case. Other keys are applied as transport options
/// (`timeout`, `headers`, `params`) or ignored; see
/// [`ClubProfileUpdate::partition`].
///
/// # Errors
///
/// `XblError::Validation` when a recognized key carries a value of the
/// wrong type. The service itself answers 413 for descriptions over 500
/// characters and `1100` for insufficient permissions.
pub async fn update_club_profile<I, K>(client: &XboxClient, club_id: &str, settings: I) -> Result<()>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let (update, options) = ClubProfileUpdate::partition(settings)?;
    send_club_profile_update(client, club_id, &update, &options).await
}

/// Sends a prepared profile update.
pub async fn send_club_profile_update(
    client: &XboxClient,
    club_id: &str,
    update: &ClubProfileUpdate,
    options: &RequestOptions,
) -> Result<()> {
    let call = ServiceCall::post(Service::ClubProfile, format!("/clubs/{club_id}/profile"))
        .json(update.to_payload()?);
    client.send_with(call, options).await?;
    Ok(())
}

// ── clubroster ─────────────────────────────────────────────────────────

fn member_path(club_id: &str, xuid: &str) -> String {
    format!("/clubs/{club_id}/users/xuid({xuid})")
}

async fn grant_role(
    client: &XboxClient,
    club_id: &str,
    xuid: &str,
    role: ClubRole,
) -> Result<UpdateRolesResponse> {
    let call = ServiceCall::post(
        Service::ClubRoster,
        format!("{}/roles", member_path(club_id, xuid)),
    )
    .json(json!({ "roles": [role] }));
    client.send_json(call).await
}

async fn revoke_role(
    client: &XboxClient,
    club_id: &str,
    xuid: &str,
    role: ClubRole,
) -> Result<UpdateRolesResponse> {
    let call = ServiceCall::delete(
        Service::ClubRoster,
        format!("{}/roles/{}", member_path(club_id, xuid), role.as_str()),
    );
    client.send_json(call).await
}

/// Adds `xuid` (the caller when `None`) to the club, or requests to join.
pub async fn add_user_to_club(
    client: &XboxClient,
    club_id: &str,
    xuid: Option<&str>,
) -> Result<UpdateRolesResponse> {
    let xuid = xuid.unwrap_or_else(|| client.xuid());
    client
        .send_json(ServiceCall::put(Service::ClubRoster, member_path(club_id, xuid)))
        .await
}

/// Removes `xuid` (the caller when `None`) from the club.
pub async fn remove_user_from_club(
    client: &XboxClient,
    club_id: &str,
    xuid: Option<&str>,
) -> Result<UpdateRolesResponse> {
    let xuid = xuid.unwrap_or_else(|| client.xuid());
    client
        .send_json(ServiceCall::delete(Service::ClubRoster, member_path(club_id, xuid)))
        .await
}

pub async fn follow_club(client: &XboxClient, club_id: &str) -> Result<UpdateRolesResponse> {
    grant_role(client, club_id, client.xuid(), ClubRole::Follower).await
}

pub async fn unfollow_club(client: &XboxClient, club_id: &str) -> Result<UpdateRolesResponse> {
    revoke_role(client, club_id, client.xuid(), ClubRole::Follower).await
}

pub async fn ban_user_from_club(
    client: &XboxClient,
    club_id: &str,
    xuid: &str,
) -> Result<UpdateRolesResponse> {
    grant_role(client, club_id, xuid, ClubRole::Banned).await
}

pub async fn unban_user_from_club(
    client: &XboxClient,
    club_id: &str,
    xuid: &str,
) -> Result<UpdateRolesResponse> {
    revoke_role(client, club_id, xuid, ClubRole::Banned).await
}

pub async fn add_club_moderator(
    client: &XboxClient,
    club_id: &str,
    xuid: &str,
) -> Result<UpdateRolesResponse> {
    grant_role(client, club_id, xuid, ClubRole::Moderator).await
}

pub async fn remove_club_moderator(
    client: &XboxClient,
    club_id: &str,
    xuid: &str,
) -> Result<UpdateRolesResponse> {
    revoke_role(client, club_id, xuid, ClubRole::Moderator).await
}
