//! Response models and enumerations for the club services.
//!
//! Field names use camelCase on the wire (`#[serde(rename_all = "camelCase")]`)
//! and snake_case in Rust. Fields the services may omit, depending on
//! decorations or club state, are `Option`. Everything else is required:
//! a response missing one fails with `XblError::Parse` instead of being
//! defaulted. Unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ── Enumerations ───────────────────────────────────────────────────────

/// Club visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubType {
    /// Unrecognized type.
    Unknown,
    /// Public: anyone can find, ask to join and play.
    Open,
    /// Private: anyone can find and ask to join.
    Closed,
    /// Hidden: only invited people can ask to join.
    Secret,
}

/// A user's role within a club.
///
/// Closed set. A banned user holds no other role in that club; the service
/// enforces this, the client does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClubRole {
    /// Only meaningful in permission settings ("anyone").
    Nonmember,
    Member,
    Moderator,
    Owner,
    RequestedToJoin,
    Recommended,
    Invited,
    Banned,
    Follower,
}

impl ClubRole {
    /// Wire name, as used in role paths (`/roles/Moderator`).
    pub const fn as_str(self) -> &'static str {
        match self {
            ClubRole::Nonmember => "Nonmember",
            ClubRole::Member => "Member",
            ClubRole::Moderator => "Moderator",
            ClubRole::Owner => "Owner",
            ClubRole::RequestedToJoin => "RequestedToJoin",
            ClubRole::Recommended => "Recommended",
            ClubRole::Invited => "Invited",
            ClubRole::Banned => "Banned",
            ClubRole::Follower => "Follower",
        }
    }
}

/// Where a user currently is within a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClubPresence {
    /// No longer on a club page.
    NotInClub,
    /// Viewing the club, not on a specific page.
    InClub,
    Chat,
    Feed,
    Roster,
    /// On the play tab (not actually playing).
    Play,
    /// Playing the club's associated game.
    InGame,
    InParty,
}

/// Club category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubGenre {
    Unknown,
    /// User-created club.
    Social,
    /// Official, title-bound club. Requires a title family id on creation.
    Title,
}

/// How users may join a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClubJoinability {
    Unknown,
    #[serde(rename = "OpenJoin")]
    Open,
    RequestToJoin,
    InviteOnly,
}

/// Lifecycle state of a club, owned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClubState {
    None,
    Suspended,
}

// ── Shared records ─────────────────────────────────────────────────────

/// Club color scheme, as hex strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferredColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepLink {
    pub page_name: String,
    pub uri: String,
}

/// Per-platform deep links into a club or title.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepLinks {
    #[serde(default)]
    pub xbox: Option<Vec<DeepLink>>,
    #[serde(default)]
    pub pc: Option<Vec<DeepLink>>,
    #[serde(default, rename = "iOS")]
    pub ios: Option<Vec<DeepLink>>,
    #[serde(default)]
    pub android: Option<Vec<DeepLink>>,
}

/// Type and genre of a club.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubTypeContainer {
    #[serde(rename = "type")]
    pub club_type: ClubType,
    pub genre: ClubGenre,
    #[serde(default)]
    pub localized_title_family_name: Option<String>,
    /// Nil for social clubs.
    pub title_family_id: Uuid,
}

/// Membership of one user in one role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRoleRecord {
    /// User responsible for the membership (e.g. who invited).
    pub actor_xuid: String,
    /// Null when the same as `actor_xuid`.
    #[serde(default)]
    pub xuid: Option<String>,
    #[serde(default)]
    pub role: Option<ClubRole>,
    /// When the user was added to the role.
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub localized_role: Option<String>,
}

/// Roster decoration. The moderator list includes the owner and is null
/// while the club is suspended.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRoster {
    #[serde(default)]
    pub moderator: Option<Vec<ClubRoleRecord>>,
    #[serde(default)]
    pub requested_to_join: Option<Vec<ClubRoleRecord>>,
    #[serde(default)]
    pub recommended: Option<Vec<ClubRoleRecord>>,
    #[serde(default)]
    pub banned: Option<Vec<ClubRoleRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRoleRecords {
    #[serde(default)]
    pub roles: Option<Vec<ClubRoleRecord>>,
    #[serde(default)]
    pub localized_role: Option<ClubRoleRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRecommendationReason {
    pub localized_text: String,
}

/// Why a club was recommended to the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRecommendation {
    pub reasons: Vec<ClubRecommendationReason>,
    pub criteria: String,
    pub title_ids: Vec<String>,
}

/// A club name held for the caller, returned by `claim_club_name` and by
/// `delete_club` when the club is converted into a reservation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubReservation {
    pub name: String,
    pub owner: String,
    pub expires: DateTime<Utc>,
}

/// Pending deletion record. The service decides when it fires.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSuspension {
    #[serde(default = "default_suspension_actor")]
    pub actor: String,
    pub delete_after: DateTime<Utc>,
}

fn default_suspension_actor() -> String {
    "owner".to_string()
}

/// Account-level view of a club, returned by clubaccounts operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubSummary {
    pub name: String,
    pub owner: String,
    pub id: String,
    #[serde(rename = "type")]
    pub club_type: ClubType,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub suspensions: Option<Vec<ClubSuspension>>,
    #[serde(default)]
    pub free_name_change: Option<bool>,
    pub can_delete_immediately: bool,
    #[serde(default)]
    pub suspension_required_after: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reservation_duration_after_suspension_in_hours: Option<u32>,
    pub genre: ClubGenre,
}

/// Last known presence of one member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubUserPresenceRecord {
    pub xuid: String,
    pub last_seen_timestamp: DateTime<Utc>,
    pub last_seen_state: ClubPresence,
}

// ── Settings ───────────────────────────────────────────────────────────

/// A profile value together with what the viewer may do with it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting<T> {
    pub value: T,
    #[serde(default)]
    pub allowed_values: Option<Vec<T>>,
    pub can_viewer_change_setting: bool,
}

/// An action permission: which role is required, and whether the viewer
/// currently qualifies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubActionSetting {
    pub value: String,
    pub allowed_values: Vec<String>,
    pub can_viewer_change_setting: bool,
    pub can_viewer_act: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubFeedSettings {
    pub post: ClubActionSetting,
    pub pin_post: ClubActionSetting,
    pub post_media_from_device: ClubActionSetting,
    pub post_media_from_xbl_library: ClubActionSetting,
    pub post_store_link: ClubActionSetting,
    pub post_web_link: ClubActionSetting,
    pub schedule_post: ClubActionSetting,
    pub view: ClubActionSetting,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubChatSettings {
    pub write: ClubActionSetting,
    pub set_chat_topic: ClubActionSetting,
    pub view: ClubActionSetting,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubLfgSettings {
    pub join: ClubActionSetting,
    pub create: ClubActionSetting,
    pub view: ClubActionSetting,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRosterSettings {
    pub invite_or_accept: ClubActionSetting,
    pub kick_or_ban: ClubActionSetting,
    pub view: ClubActionSetting,
    pub joinability: ClubActionSetting,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubProfileSettings {
    pub update: ClubActionSetting,
    pub delete: ClubActionSetting,
    pub view: ClubActionSetting,
    pub view_analytics: ClubActionSetting,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubViewerRoleSettings {
    pub roles: Vec<ClubRole>,
    #[serde(default)]
    pub localized_role: Option<Value>,
}

/// `settings` decoration: what each role may do in the club.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRootSettings {
    pub feed: ClubFeedSettings,
    pub chat: ClubChatSettings,
    pub lfg: ClubLfgSettings,
    pub roster: ClubRosterSettings,
    pub profile: ClubProfileSettings,
    pub viewer_roles: ClubViewerRoleSettings,
}

/// Configurable club attributes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubProfile {
    pub description: Setting<Option<String>>,
    pub rules: Setting<Option<Value>>,
    pub name: Setting<String>,
    pub short_name: Setting<String>,
    /// Whether the club shows up in search results.
    pub is_searchable: Setting<bool>,
    /// Whether the club shows up in recommendations.
    pub is_recommendable: Setting<bool>,
    pub leave_enabled: Setting<bool>,
    pub transfer_ownership_enabled: Setting<bool>,
    pub mature_content_enabled: Setting<bool>,
    pub watch_club_titles_only: Setting<bool>,
    pub display_image_url: Setting<String>,
    pub background_image_url: Setting<String>,
    /// Club language.
    pub preferred_locale: Setting<String>,
    /// See [`crate::clubs::consts::CLUB_TAGS`].
    pub tags: Setting<Vec<String>>,
    pub associated_titles: Setting<Vec<String>>,
    pub primary_color: Setting<String>,
    pub secondary_color: Setting<String>,
    pub tertiary_color: Setting<String>,
}

// ── Club ───────────────────────────────────────────────────────────────

/// A club as returned by clubhub. Optional sub-objects (`settings`,
/// `roster`, `club_presence`…) are present only when the matching decoration
/// was requested.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: String,
    pub club_type: ClubTypeContainer,
    pub creation_date_utc: DateTime<Utc>,
    #[serde(default)]
    pub glyph_image_url: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
    #[serde(default)]
    pub settings: Option<ClubRootSettings>,
    pub followers_count: u32,
    pub members_count: u32,
    /// Includes the owner.
    pub moderators_count: u32,
    pub recommended_count: u32,
    pub requested_to_join_count: u32,
    /// Members currently in the club.
    pub club_presence_count: u32,
    /// Members who were in the club today.
    pub club_presence_today_count: u32,
    pub club_presence_in_game_count: u32,
    #[serde(default)]
    pub roster: Option<ClubRoster>,
    #[serde(default)]
    pub target_roles: Option<TargetRoleRecords>,
    #[serde(default)]
    pub recommendation: Option<ClubRecommendation>,
    #[serde(default)]
    pub club_presence: Option<Vec<ClubUserPresenceRecord>>,
    pub state: ClubState,
    #[serde(default)]
    suspended_until_utc: Option<DateTime<Utc>>,
    pub report_count: u32,
    pub reported_items_count: u32,
    pub max_members_per_club: u32,
    pub max_members_in_game: u32,
    /// Null while suspended.
    #[serde(default)]
    pub owner_xuid: Option<String>,
    pub founder_xuid: String,
    #[serde(default)]
    pub title_deep_links: Option<DeepLinks>,
    pub profile: ClubProfile,
    pub is_official_club: bool,
    #[serde(default)]
    pub club_deep_links: Option<DeepLinks>,
}

impl Club {
    pub fn is_suspended(&self) -> bool {
        self.state == ClubState::Suspended
    }

    /// End of the suspension. Always `None` unless the club is suspended,
    /// whatever the service sent.
    pub fn suspended_until(&self) -> Option<DateTime<Utc>> {
        if self.is_suspended() {
            self.suspended_until_utc
        } else {
            None
        }
    }
}

// ── Response envelopes ─────────────────────────────────────────────────

/// Clubs owned by the caller plus remaining creation quotas.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedClubsResponse {
    pub owner: String,
    #[serde(default)]
    pub clubs: Option<Vec<ClubSummary>>,
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub remaining_open_and_closed_clubs: u32,
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub remaining_secret_clubs: u32,
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub maximum_open_and_closed_clubs: u32,
    #[serde(deserialize_with = "u32_from_number_or_string")]
    pub maximum_secret_clubs: u32,
}

/// How often a facet value (tag or title) occurred in search results.
#[derive(Debug, Clone, Deserialize)]
pub struct ClubSearchFacetResult {
    pub count: u32,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClubSearchFacetResults {
    #[serde(default)]
    pub titles: Option<Vec<ClubSearchFacetResult>>,
    #[serde(default)]
    pub tags: Option<Vec<ClubSearchFacetResult>>,
}

/// Envelope shared by clubhub lookups, searches and recommendations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchClubsResponse {
    pub clubs: Vec<Club>,
    #[serde(default)]
    pub search_facet_results: Option<ClubSearchFacetResults>,
    #[serde(default)]
    pub recommendation_counts: Option<Value>,
    #[serde(default)]
    pub club_deep_links: Option<DeepLinks>,
}

/// A user's roles after a roster mutation, with follow/membership quotas.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolesResponse {
    pub user_id: String,
    pub roles: Vec<ClubRole>,
    #[serde(default)]
    pub channel_follow_quota_max: Option<u32>,
    #[serde(default)]
    pub channel_follow_quota_remaining: Option<u32>,
    #[serde(default)]
    pub follow_quota_max: Option<u32>,
    #[serde(default)]
    pub follow_quota_remaining: Option<u32>,
    #[serde(default)]
    pub member_quota_max: Option<u32>,
    #[serde(default)]
    pub member_quota_remaining: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPresenceResponse {
    pub club_id: String,
    pub total_count: u32,
    pub active_count: u32,
    pub here_today_count: u32,
    pub in_game_count: u32,
}

/// clubaccounts sends quota counters as strings in some contract versions.
fn u32_from_number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
