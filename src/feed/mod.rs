//! Activity feeds, user posts, comment summaries, club chat and club
//! moderation.
//!
//! The activity feed operations share [`ActivityParams`]; each family fills
//! in its own defaults for whatever the caller left unset:
//!
//! | Feed                 | numItems | includeSelf | type filter                                  | start            |
//! |----------------------|----------|-------------|----------------------------------------------|------------------|
//! | user history         | 20       |             | only GameDVR, Achievement, Screenshot        |                  |
//! | club feed            | 50       |             | exclude BroadcastStart, BroadcastEnd         |                  |
//! | title feed           |          |             | exclude Followed, GamertagChanged, Played    | end of month, 3 months ago |
//! | Xbox feed            | 50       | true        | exclude Played, BroadcastStart, BroadcastEnd |                  |
//!
//! A continuation token in the response is returned to the caller and
//! never followed here.

pub mod models;
pub mod params;

use reqwest::Method;
use serde_json::json;

use crate::client::{ServiceCall, XboxClient};
use crate::error::Result;
use crate::service::Service;

use models::{
    ActivityItemType, ActivityResponse, ContentType, Message, MessageResponse, MessagesResponse,
    PathSummary, PostResponse, PostType, ReportIdResponse, ReportedItem, ReportedItemsResponse,
    SummariesResponse, TimelineType,
};
use params::{ActivityParams, TypeFilter, feed_start_date_time};

/// Contract version for deleting a feed item by locator.
const FEED_ITEM_CONTRACT_VERSION: u32 = 2;

const DEFAULT_MESSAGE_HISTORY_ITEMS: u32 = 100;

/// URL of a feed item from its locator (`feedItemId`), which is a URL
/// without scheme.
pub fn feed_item_url(locator: &str) -> String {
    if locator.starts_with("https://") || locator.starts_with("http://") {
        locator.to_string()
    } else {
        format!("https://{locator}")
    }
}

/// Deletes one of the caller's feed items.
pub async fn delete_feed_item(client: &XboxClient, locator: &str) -> Result<()> {
    let call = ServiceCall::absolute(
        Method::DELETE,
        feed_item_url(locator),
        FEED_ITEM_CONTRACT_VERSION,
    );
    client.send(call).await?;
    Ok(())
}

// ── Activity ───────────────────────────────────────────────────────────

async fn fetch_activity(
    client: &XboxClient,
    path: String,
    params: ActivityParams,
) -> Result<ActivityResponse> {
    let call = ServiceCall::get(Service::Activity, path).query(params.to_query());
    client.send_with(call, &params.options).await?.json()
}

/// Activity history of `xuid`, or the caller's unshared history when
/// `None`.
pub async fn get_user_activity_history(
    client: &XboxClient,
    xuid: Option<&str>,
    params: ActivityParams,
) -> Result<ActivityResponse> {
    let params = params.or_num_items(20).or_filter(TypeFilter::Include(vec![
        ActivityItemType::Clip,
        ActivityItemType::Achievement,
        ActivityItemType::Screenshot,
    ]));
    let path = match xuid {
        Some(xuid) => format!("/users/xuid({xuid})/Activity/History"),
        None => format!("/users/xuid({})/Activity/History/UnShared", client.xuid()),
    };
    fetch_activity(client, path, params).await
}

pub async fn get_club_activity_feed(
    client: &XboxClient,
    club_id: &str,
    params: ActivityParams,
) -> Result<ActivityResponse> {
    let params = params.or_num_items(50).or_filter(TypeFilter::Exclude(vec![
        ActivityItemType::BroadcastStart,
        ActivityItemType::BroadcastEnd,
    ]));
    fetch_activity(client, format!("/clubs/clubId({club_id})/activity/feed"), params).await
}

/// Activity for a title. Without an explicit start, items from the last
/// day of the month three months back onward are returned.
pub async fn get_title_activity_feed(
    client: &XboxClient,
    title_id: &str,
    params: ActivityParams,
) -> Result<ActivityResponse> {
    let params = params
        .or_filter(TypeFilter::Exclude(vec![
            ActivityItemType::Followed,
            ActivityItemType::GamertagChanged,
            ActivityItemType::Played,
        ]))
        .or_start_date_time(feed_start_date_time(3, true));
    fetch_activity(client, format!("/titles/titleId({title_id})/activity/feed"), params).await
}

/// The caller's aggregate Xbox feed.
pub async fn get_xbox_activity_feed(
    client: &XboxClient,
    params: ActivityParams,
) -> Result<ActivityResponse> {
    let params = params
        .or_num_items(50)
        .or_include_self(true)
        .or_filter(TypeFilter::Exclude(vec![
            ActivityItemType::Played,
            ActivityItemType::BroadcastStart,
            ActivityItemType::BroadcastEnd,
        ]));
    fetch_activity(client, format!("/users/xuid({})/XboxFeed", client.xuid()), params).await
}

/// Items pinned to a user's timeline; the caller's when `xuid` is `None`.
pub async fn get_user_pins(client: &XboxClient, xuid: Option<&str>) -> Result<ActivityResponse> {
    let xuid = xuid.unwrap_or_else(|| client.xuid());
    client
        .send_json(ServiceCall::get(
            Service::Activity,
            format!("/timelines/User/{xuid}/pins"),
        ))
        .await
}

// ── User posts ─────────────────────────────────────────────────────────

fn own_timeline(client: &XboxClient) -> serde_json::Value {
    json!([{ "timelineType": TimelineType::User, "timelineOwner": client.xuid() }])
}

/// Publishes a text post on the caller's timeline.
pub async fn post_text(client: &XboxClient, text: &str) -> Result<PostResponse> {
    let body = json!({
        "postType": PostType::Text,
        "postText": text,
        "timelines": own_timeline(client),
    });
    client
        .send_json(ServiceCall::post(Service::UserPosts, "/users/me/posts").json(body))
        .await
}

/// Shares a feed item (by locator) on the caller's timeline.
pub async fn share_item(
    client: &XboxClient,
    locator: &str,
    text: Option<&str>,
    parent_id: Option<&str>,
) -> Result<PostResponse> {
    let mut post_type_data = json!({ "locator": locator });
    if let Some(parent_id) = parent_id {
        post_type_data["parentId"] = json!(parent_id);
    }
    let body = json!({
        "postType": PostType::LinkXbox,
        "postText": text.unwrap_or_default(),
        "postTypeData": post_type_data,
        "timelines": own_timeline(client),
    });
    client
        .send_json(ServiceCall::post(Service::UserPosts, "/users/me/posts").json(body))
        .await
}

// ── Comments ───────────────────────────────────────────────────────────

/// Like/comment/share counters for a batch of root paths.
pub async fn get_post_summaries<S: AsRef<str>>(
    client: &XboxClient,
    root_paths: &[S],
) -> Result<Vec<PathSummary>> {
    let root_paths: Vec<&str> = root_paths.iter().map(AsRef::as_ref).collect();
    let call = ServiceCall::post(Service::Comments, "/summaries/batch")
        .json(json!({ "rootPaths": root_paths }));
    let resp: SummariesResponse = client.send_json(call).await?;
    Ok(resp.summaries)
}

// ── Club chat ──────────────────────────────────────────────────────────

/// Chat messages older than `message_id`, at most `max_items` (100 when
/// `None`).
pub async fn get_club_message_history(
    client: &XboxClient,
    club_id: &str,
    message_id: &str,
    max_items: Option<u32>,
) -> Result<Vec<Message>> {
    let query = vec![
        ("messageId".to_string(), message_id.to_string()),
        (
            "maxItems".to_string(),
            max_items.unwrap_or(DEFAULT_MESSAGE_HISTORY_ITEMS).to_string(),
        ),
    ];
    let call = ServiceCall::get(
        Service::ChatFeed,
        format!("/channel/Club/{club_id}/messages/history"),
    )
    .query(query);
    let resp: MessagesResponse = client.send_json(call).await?;
    Ok(resp.messages)
}

pub async fn delete_club_message(client: &XboxClient, club_id: &str, message_id: &str) -> Result<()> {
    client
        .send(ServiceCall::delete(
            Service::ChatFeed,
            format!("/channel/Club/{club_id}/messages/{message_id}"),
        ))
        .await?;
    Ok(())
}

/// The club's message of the day.
pub async fn get_club_motd(client: &XboxClient, club_id: &str) -> Result<Message> {
    let resp: MessageResponse = client
        .send_json(ServiceCall::get(
            Service::ChatFeed,
            format!("/channel/Club/{club_id}/motd"),
        ))
        .await?;
    Ok(resp.message)
}

pub async fn set_club_motd(client: &XboxClient, club_id: &str, motd: &str) -> Result<()> {
    let call = ServiceCall::put(Service::ChatFeed, format!("/channel/Club/{club_id}/motd"))
        .json(json!({ "newMotd": motd }));
    client.send(call).await?;
    Ok(())
}

// ── Club moderation ────────────────────────────────────────────────────

pub async fn get_club_reported_items(client: &XboxClient, club_id: &str) -> Result<Vec<ReportedItem>> {
    let resp: ReportedItemsResponse = client
        .send_json(ServiceCall::get(
            Service::ClubModeration,
            format!("/clubs/{club_id}/reportedItems"),
        ))
        .await?;
    Ok(resp.reported_items)
}

/// Reports a club item to the club's moderators. Returns the report id.
pub async fn send_club_report(
    client: &XboxClient,
    club_id: &str,
    content_id: &str,
    content_type: ContentType,
    target_xuid: &str,
    reason: &str,
) -> Result<String> {
    let body = json!({
        "contentId": content_id,
        "contentType": content_type,
        "targetXuid": target_xuid,
        "textReason": reason,
    });
    let call = ServiceCall::post(Service::ClubModeration, format!("/clubs/{club_id}/reportedItems"))
        .json(body);
    let resp: ReportIdResponse = client.send_json(call).await?;
    Ok(resp.report_id)
}
