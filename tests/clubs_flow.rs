//! Integration tests for the club services using wiremock.
//!
//! Every service is routed to one mock server, so each test matches on the
//! method, path, contract version header and, where relevant, the body.

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xbox_webapi::clubs::endpoint::ClubSearch;
use xbox_webapi::clubs::models::{ClubGenre, ClubPresence, ClubRole, ClubType};
use xbox_webapi::clubs::*;
use xbox_webapi::{XblAuth, XblError, XboxClient};

const SELF_XUID: &str = "2533274800000000";
const CLUB_JSON: &str = include_str!("fixtures/club.json");

fn mock_client(server: &MockServer) -> XboxClient {
    let auth = XblAuth::new("uhs", "mock-token", SELF_XUID);
    XboxClient::with_base_url(auth, &server.uri()).unwrap()
}

fn clubs_body() -> Value {
    let club: Value = serde_json::from_str(CLUB_JSON).unwrap();
    json!({ "clubs": [club] })
}

fn summary_json(club_type: &str) -> Value {
    json!({
        "name": "Halo Night",
        "owner": SELF_XUID,
        "id": "3379884949998022",
        "type": club_type,
        "created": "2023-05-01T12:00:00Z",
        "canDeleteImmediately": false,
        "genre": "social"
    })
}

fn roles_json(roles: &[&str]) -> Value {
    json!({ "userId": "2533274800000001", "roles": roles })
}

// ── clubaccounts ───────────────────────────────────────────────────────

#[tokio::test]
async fn get_clubs_owned_uses_contract_version_two() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path(format!("/users/xuid({SELF_XUID})/clubsowned")))
        .and(header("x-xbl-contract-version", "2"))
        .and(header("authorization", "XBL3.0 x=uhs;mock-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "owner": SELF_XUID,
            "clubs": [summary_json("open")],
            "remainingOpenAndClosedClubs": 4,
            "remainingSecretClubs": "10",
            "maximumOpenAndClosedClubs": 5,
            "maximumSecretClubs": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let owned = get_clubs_owned(&client).await.unwrap();
    assert_eq!(owned.clubs.unwrap().len(), 1);
    assert_eq!(owned.remaining_secret_clubs, 10);
}

#[tokio::test]
async fn get_club_summary_with_actor() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/clubs/clubid(3379884949998022)/suspension/owner"))
        .and(header("x-xbl-contract-version", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_json("closed")))
        .expect(1)
        .mount(&server)
        .await;

    let summary = get_club_summary(&client, "3379884949998022", Some("owner"))
        .await
        .unwrap();
    assert_eq!(summary.club_type, ClubType::Closed);
}

#[tokio::test]
async fn claim_club_name_returns_reservation() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/clubs/reserve"))
        .and(body_json(json!({ "name": "Halo Night" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Halo Night",
            "owner": SELF_XUID,
            "expires": "2023-05-02T12:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reservation = claim_club_name(&client, "Halo Night").await.unwrap();
    assert_eq!(reservation.owner, SELF_XUID);
}

#[tokio::test]
async fn claim_club_name_conflict_keeps_service_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let error_body = r#"{"code":1010,"description":"The requested club name is not available."}"#;
    Mock::given(method("POST"))
        .and(path("/clubs/reserve"))
        .respond_with(ResponseTemplate::new(409).set_body_string(error_body))
        .mount(&server)
        .await;

    let err = claim_club_name(&client, "Taken").await.unwrap_err();
    match &err {
        XblError::Api { status, body } => {
            assert_eq!(status.as_u16(), 409);
            assert_eq!(body, error_body);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert_eq!(err.service_error().unwrap().code, 1010);
}

#[tokio::test]
async fn create_title_club_sends_family_id() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    let family = uuid::Uuid::parse_str("6a2b0d2e-7c2f-4e4a-9a53-0d1b0b7e1a11").unwrap();

    Mock::given(method("POST"))
        .and(path("/clubs/create"))
        .and(body_json(json!({
            "name": "Halo Official",
            "type": "open",
            "genre": "title",
            "titleFamilyId": "6a2b0d2e-7c2f-4e4a-9a53-0d1b0b7e1a11"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(summary_json("open")))
        .expect(1)
        .mount(&server)
        .await;

    let summary = create_club(&client, "Halo Official", ClubType::Open, ClubGenre::Title, Some(family))
        .await
        .unwrap();
    assert_eq!(summary.id, "3379884949998022");
}

#[tokio::test]
async fn create_social_club_omits_family_id() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/clubs/create"))
        .and(body_json(json!({ "name": "Hideout", "type": "secret", "genre": "social" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(summary_json("secret")))
        .expect(1)
        .mount(&server)
        .await;

    create_club(&client, "Hideout", ClubType::Secret, ClubGenre::Social, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn create_title_club_without_family_sends_nothing() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = create_club(&client, "Halo Official", ClubType::Open, ClubGenre::Title, None)
        .await
        .unwrap_err();
    assert!(matches!(err, XblError::Validation(_)));
}

#[tokio::test]
async fn transfer_and_rename_post_method_bodies() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/clubs/clubid(42)"))
        .and(body_json(json!({ "method": "TransferOwnership", "user": "2533274800000001" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_json("open")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/clubs/clubid(42)"))
        .and(body_json(json!({ "method": "ChangeName", "name": "Halo Nights" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_json("open")))
        .expect(1)
        .mount(&server)
        .await;

    transfer_club_ownership(&client, "42", "2533274800000001")
        .await
        .unwrap();
    rename_club(&client, "42", "Halo Nights").await.unwrap();
}

#[tokio::test]
async fn delete_club_200_is_reservation() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("DELETE"))
        .and(path("/clubs/clubid(42)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Halo Night",
            "owner": SELF_XUID,
            "expires": "2023-05-09T12:00:00Z"
        })))
        .mount(&server)
        .await;

    match delete_club(&client, "42").await.unwrap() {
        DeleteClubOutcome::Reserved(reservation) => assert_eq!(reservation.name, "Halo Night"),
        other => panic!("expected reservation, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_club_202_is_suspension() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let mut summary = summary_json("open");
    summary["suspensions"] = json!([{ "actor": "owner", "deleteAfter": "2023-05-08T12:00:00Z" }]);
    summary["reservationDurationAfterSuspensionInHours"] = json!(24);
    Mock::given(method("DELETE"))
        .and(path("/clubs/clubid(42)"))
        .respond_with(ResponseTemplate::new(202).set_body_json(summary))
        .mount(&server)
        .await;

    match delete_club(&client, "42").await.unwrap() {
        DeleteClubOutcome::Suspended(summary) => {
            assert_eq!(summary.suspensions.unwrap().len(), 1);
            assert_eq!(summary.reservation_duration_after_suspension_in_hours, Some(24));
        }
        other => panic!("expected suspension, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_club_204_is_deleted() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("DELETE"))
        .and(path("/clubs/clubid(42)"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(matches!(
        delete_club(&client, "42").await.unwrap(),
        DeleteClubOutcome::Deleted
    ));
}

#[tokio::test]
async fn suspend_and_unsuspend_club() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    let delete_after = chrono::DateTime::parse_from_rfc3339("2023-05-08T12:00:00.5Z")
        .unwrap()
        .with_timezone(&chrono::Utc);

    Mock::given(method("PUT"))
        .and(path("/clubs/clubid(42)/suspension/owner"))
        .and(body_json(json!({
            "actor": "owner",
            "deleteAfter": "2023-05-08T12:00:00.500000Z"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/clubs/clubid(42)/suspension/owner"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    suspend_club(&client, "42", delete_after).await.unwrap();
    unsuspend_club(&client, "42").await.unwrap();
}

// ── clubhub ────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_clubs_batches_ids_and_decorations() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/clubs/Ids(1,2,3)/decoration/detail,settings"))
        .and(header("x-xbl-contract-version", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clubs_body()))
        .expect(1)
        .mount(&server)
        .await;

    let clubs = get_clubs(&client, &["1", "2", "3"], Some(&["detail", "settings"][..]))
        .await
        .unwrap();
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].profile.name.value, "Halo Night");
}

#[tokio::test]
async fn get_club_defaults_to_full_decorations() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(wiremock::matchers::path_regex(
            r"^/clubs/Ids\(3379884949998022\)/decoration/detail,clubPresence,roster\(.*\),settings$",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(clubs_body()))
        .expect(1)
        .mount(&server)
        .await;

    let club = get_club(&client, "3379884949998022", None).await.unwrap();
    assert_eq!(club.id, "3379884949998022");
    assert!(club.settings.is_some());
}

#[tokio::test]
async fn get_club_with_empty_result_is_parse_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/clubs/Ids(9)/decoration/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "clubs": [] })))
        .mount(&server)
        .await;

    let err = get_club(&client, "9", Some(&["detail"][..])).await.unwrap_err();
    assert!(matches!(err, XblError::Parse(_)));
}

#[tokio::test]
async fn more_than_ten_ids_never_reach_the_server() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clubs_body()))
        .expect(0)
        .mount(&server)
        .await;

    let ids: Vec<String> = (0..11).map(|i| i.to_string()).collect();
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    let err = get_clubs(&client, &ids, None).await.unwrap_err();
    assert!(matches!(err, XblError::Validation(_)));
}

#[tokio::test]
async fn club_associations_default_to_self() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path(format!("/clubs/Xuid({SELF_XUID})/decoration/detail")))
        .respond_with(ResponseTemplate::new(200).set_body_json(clubs_body()))
        .expect(1)
        .mount(&server)
        .await;

    let clubs = get_club_associations(&client, None).await.unwrap();
    assert_eq!(clubs.len(), 1);
}

#[tokio::test]
async fn recommendations_by_title_use_get_otherwise_post() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/clubs/recommendationsByTitle(219630713)/decoration/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clubs_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/clubs/recommendations/decoration/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "clubs": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let by_title = get_club_recommendations(&client, Some("219630713"))
        .await
        .unwrap();
    assert_eq!(by_title.len(), 1);
    let generic = get_club_recommendations(&client, None).await.unwrap();
    assert!(generic.is_empty());
}

#[tokio::test]
async fn search_clubs_sends_query_and_filters() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let mut body = clubs_body();
    body["searchFacetResults"] = json!({ "tags": [{ "count": 3, "value": "casual" }] });
    Mock::given(method("GET"))
        .and(path("/clubs/search"))
        .and(query_param("q", "halo"))
        .and(query_param("tags", "casual,micrequired"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let search = ClubSearch::new("halo").tags(["casual", "micrequired"]).count(10);
    let resp = search_clubs(&client, &search).await.unwrap();
    assert_eq!(resp.clubs.len(), 1);
    let facets = resp.search_facet_results.unwrap();
    assert_eq!(facets.tags.unwrap()[0].value, "casual");
}

#[tokio::test]
async fn empty_search_never_reaches_the_server() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = search_clubs(&client, &ClubSearch::new("")).await.unwrap_err();
    assert!(matches!(err, XblError::Validation(_)));
}

// ── clubpresence ───────────────────────────────────────────────────────

#[tokio::test]
async fn presence_counts_and_update() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/clubs/42/users/count"))
        .and(header("x-xbl-contract-version", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "clubId": "42",
            "totalCount": 12,
            "activeCount": 3,
            "hereTodayCount": 5,
            "inGameCount": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/clubs/42/users/xuid({SELF_XUID})")))
        .and(body_json(json!({ "userPresenceState": "InGame" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let counts = get_presence_counts(&client, "42").await.unwrap();
    assert_eq!(counts.here_today_count, 5);
    let changed = set_presence_within_club(&client, "42", SELF_XUID, ClubPresence::InGame)
        .await
        .unwrap();
    assert!(changed);
}

// ── clubprofile ────────────────────────────────────────────────────────

#[tokio::test]
async fn update_profile_sends_patch_and_modified_fields() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .and(path("/clubs/42/profile"))
        .and(header("x-xbl-contract-version", "2"))
        .and(header("x-trace-id", "abc"))
        .and(body_json(json!({
            "requestContract": { "chatEnabled": false, "whoCanInvite": "Moderator" },
            "modifiedFields": ["ChatEnabled", "Description", "WhoCanInvite"]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    update_club_profile(
        &client,
        "42",
        [
            ("chat_enabled", json!(false)),
            ("description", Value::Null),
            ("who_can_invite", json!("Moderator")),
            ("headers", json!({ "x-trace-id": "abc" })),
        ],
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn update_profile_with_bad_value_sends_nothing() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = update_club_profile(&client, "42", [("tags", json!("not-a-list"))])
        .await
        .unwrap_err();
    assert!(matches!(err, XblError::Validation(_)));
}

// ── clubroster ─────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_remove_user_default_to_self() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    let member_path = format!("/clubs/42/users/xuid({SELF_XUID})");

    Mock::given(method("PUT"))
        .and(path(member_path.as_str()))
        .and(header("x-xbl-contract-version", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roles_json(&["RequestedToJoin"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(member_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(roles_json(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let added = add_user_to_club(&client, "42", None).await.unwrap();
    assert_eq!(added.roles, vec![ClubRole::RequestedToJoin]);
    let removed = remove_user_from_club(&client, "42", None).await.unwrap();
    assert!(removed.roles.is_empty());
}

#[tokio::test]
async fn role_grants_post_and_revokes_delete() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    let roles_path = "/clubs/42/users/xuid(2533274800000001)/roles";

    Mock::given(method("POST"))
        .and(path(roles_path))
        .and(body_json(json!({ "roles": ["Moderator"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(roles_json(&["Member", "Moderator"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{roles_path}/Moderator")))
        .respond_with(ResponseTemplate::new(200).set_body_json(roles_json(&["Member"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(roles_path))
        .and(body_json(json!({ "roles": ["Banned"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(roles_json(&["Banned"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{roles_path}/Banned")))
        .respond_with(ResponseTemplate::new(200).set_body_json(roles_json(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let xuid = "2533274800000001";
    let promoted = add_club_moderator(&client, "42", xuid).await.unwrap();
    assert!(promoted.roles.contains(&ClubRole::Moderator));
    remove_club_moderator(&client, "42", xuid).await.unwrap();
    let banned = ban_user_from_club(&client, "42", xuid).await.unwrap();
    assert_eq!(banned.roles, vec![ClubRole::Banned]);
    unban_user_from_club(&client, "42", xuid).await.unwrap();
}

#[tokio::test]
async fn follow_and_unfollow_use_own_xuid() {
    let server = MockServer::start().await;
    let client = mock_client(&server);
    let roles_path = format!("/clubs/42/users/xuid({SELF_XUID})/roles");

    Mock::given(method("POST"))
        .and(path(roles_path.as_str()))
        .and(body_json(json!({ "roles": ["Follower"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(roles_json(&["Follower"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{roles_path}/Follower")))
        .respond_with(ResponseTemplate::new(200).set_body_json(roles_json(&[])))
        .expect(1)
        .mount(&server)
        .await;

    follow_club(&client, "42").await.unwrap();
    unfollow_club(&client, "42").await.unwrap();
}

#[tokio::test]
async fn roster_forbidden_is_api_error() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("DELETE"))
        .and(path(format!("/clubs/42/users/xuid({SELF_XUID})")))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_string(r#"{"code":1013,"description":"Cannot remove owner."}"#),
        )
        .mount(&server)
        .await;

    let err = remove_user_from_club(&client, "42", None).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
    assert_eq!(err.service_error().unwrap().code, 1013);
}
