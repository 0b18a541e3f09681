//! Response models for the activity, user post, comment, chat and
//! moderation services.
//!
//! Feed enumerations mirror server string constants. Each carries an
//! `Unknown` variant that also absorbs values this crate does not know yet.
//!
//! Activity items are a tagged union keyed by `activityItemType`; see
//! [`ActivityItem`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::clubs::models::{ClubRole, PreferredColor};

// ── Enumerations ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityItemType {
    Played,
    Followed,
    TextPost,
    UserPost,
    Achievement,
    Screenshot,
    #[serde(rename = "GameDVR")]
    Clip,
    BroadcastStart,
    BroadcastEnd,
    GamertagChanged,
    /// Groups several items (e.g. a burst of achievements).
    Container,
    #[serde(other)]
    Unknown,
}

impl ActivityItemType {
    /// Wire name, as used in `activityTypes` / `excludeTypes`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ActivityItemType::Unknown => "Unknown",
            ActivityItemType::Played => "Played",
            ActivityItemType::Followed => "Followed",
            ActivityItemType::TextPost => "TextPost",
            ActivityItemType::UserPost => "UserPost",
            ActivityItemType::Achievement => "Achievement",
            ActivityItemType::Screenshot => "Screenshot",
            ActivityItemType::Clip => "GameDVR",
            ActivityItemType::BroadcastStart => "BroadcastStart",
            ActivityItemType::BroadcastEnd => "BroadcastEnd",
            ActivityItemType::GamertagChanged => "GamertagChanged",
            ActivityItemType::Container => "Container",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorType {
    User,
    #[serde(other)]
    Unknown,
}

/// Kind of content an activity item or report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    System,
    Chat,
    Game,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocatorType {
    Download,
    #[serde(rename = "Thumbnail_Small")]
    ThumbnailSmall,
    #[serde(rename = "Thumbnail_Large")]
    ThumbnailLarge,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageStatus {
    Ok,
    Deleted,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    BasicText,
    RichText,
    DirectMention,
    #[serde(rename = "MessageOfTheDay")]
    Motd,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostType {
    Link,
    Text,
    /// Share of another feed item, referenced by locator.
    #[serde(rename = "XboxLink")]
    LinkXbox,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    Default,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimelineType {
    Club,
    User,
    #[serde(other)]
    Unknown,
}

// ── Moderation ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub reporting_xuid: String,
    pub text_reason: String,
}

/// A club item with the reports filed against it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedItem {
    pub content_id: String,
    pub content_type: ContentType,
    pub last_reported: DateTime<Utc>,
    pub report_count: u32,
    pub report_id: String,
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportedItemsResponse {
    #[serde(rename = "reportedItems")]
    pub reported_items: Vec<ReportedItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportIdResponse {
    pub report_id: String,
}

// ── Chat ───────────────────────────────────────────────────────────────

/// One club chat message, or the message of the day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub protocol_version: u32,
    pub message_id: String,
    pub message_time: DateTime<Utc>,
    pub message_type: MessageType,
    pub sender_xuid: String,
    pub sender_gamertag: String,
    pub client_seq_num: i64,
    pub message: String,
    pub message_status: MessageStatus,
    pub flags: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: Message,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

// ── Posts and comments ─────────────────────────────────────────────────

/// Link preview attached to a user post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPostDetails {
    pub link: String,
    pub display_link: String,
    pub title: String,
    pub description: String,
    pub link_type: LinkType,
    #[serde(default)]
    pub link_data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfo {
    pub author_type: AuthorType,
    pub color: PreferredColor,
    pub image_url: String,
    pub modern_gamertag: String,
    pub modern_gamertag_suffix: String,
    pub name: String,
    pub second_name: String,
    pub show_as_avatar: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub timeline_id: String,
    pub timeline_type: TimelineType,
    pub timeline_name: String,
    pub timeline_image: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubTimeline {
    #[serde(flatten)]
    pub timeline: Timeline,
    pub is_official_club: bool,
    pub author_roles: Vec<ClubRole>,
    pub is_public: bool,
}

/// Timeline a user post was published to. Club timelines carry the
/// author's roles in the club.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostTimeline {
    Club(ClubTimeline),
    Other(Timeline),
}

/// Timeline reference echoed back by the userposts service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRef {
    pub timeline_type: TimelineType,
    pub timeline_owner: String,
}

/// Result of publishing a post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post_id: String,
    #[serde(default)]
    pub post_uri: Option<String>,
    #[serde(default)]
    pub post_type: Option<PostType>,
    #[serde(default)]
    pub post_text: Option<String>,
    #[serde(default)]
    pub timelines: Option<Vec<TimelineRef>>,
}

/// Social counters for one comment root path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSummary {
    pub path: String,
    #[serde(default)]
    pub like_count: Option<u32>,
    #[serde(default)]
    pub comment_count: Option<u32>,
    #[serde(default)]
    pub share_count: Option<u32>,
    #[serde(default)]
    pub is_liked: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummariesResponse {
    pub summaries: Vec<PathSummary>,
}

// ── Activity items ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMediaContentLocator {
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub locator_type: Option<LocatorType>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Fields every activity item carries, whatever its kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItemBase {
    #[serde(default)]
    pub bing_id: Option<Uuid>,
    #[serde(default)]
    pub content_image_uri: Option<String>,
    #[serde(default)]
    pub content_title: Option<String>,
    #[serde(default)]
    pub game_media_content_locators: Option<Vec<GameMediaContentLocator>>,
    /// Platform the item was posted from.
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub title_id: Option<String>,
    #[serde(default)]
    pub upload_title_id: Option<String>,
    pub description: String,
    pub date: DateTime<Utc>,
    pub has_ugc: bool,
    pub activity_item_type: ActivityItemType,
    pub content_type: ContentType,
    pub short_description: String,
    #[serde(default)]
    pub ugc_caption: Option<String>,
    pub item_text: String,
    pub item_image: String,
    #[serde(default)]
    pub trusted_item_image: Option<bool>,
    pub share_root: String,
    /// Locator of the item; pass it to `share_item` or `delete_feed_item`.
    pub feed_item_id: String,
    pub item_root: String,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub num_likes: Option<u64>,
    #[serde(default)]
    pub num_comments: Option<u64>,
    #[serde(default)]
    pub num_shares: Option<u64>,
    #[serde(default)]
    pub num_views: Option<u64>,
    pub has_liked: bool,
    pub author_info: AuthorInfo,
    pub user_xuid: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementActivityItem {
    #[serde(flatten)]
    pub base: ActivityItemBase,
    pub achievement_description: String,
    pub achievement_icon: String,
    pub achievement_id: String,
    pub achievement_name: String,
    pub achievement_scid: Uuid,
    pub achievement_type: String,
    pub gamerscore: u32,
    pub has_app_award: bool,
    pub has_art_award: bool,
    pub is_secret: bool,
    pub rarity_category: String,
    #[serde(deserialize_with = "string_or_number")]
    pub rarity_percentage: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipActivityItem {
    #[serde(flatten)]
    pub base: ActivityItemBase,
    pub clip_caption: String,
    pub clip_id: Uuid,
    pub clip_name: String,
    pub clip_scid: Uuid,
    pub clip_thumbnail: String,
    pub date_recorded: DateTime<Utc>,
    #[serde(deserialize_with = "string_or_number")]
    pub duration_in_seconds: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotActivityItem {
    #[serde(flatten)]
    pub base: ActivityItemBase,
    pub screenshot_id: Uuid,
    pub screenshot_name: String,
    pub screenshot_scid: Uuid,
    pub screenshot_thumbnail: String,
    pub screenshot_uri: String,
}

/// `UserPost` and `TextPost` items. Text posts carry no link preview.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPostActivityItem {
    #[serde(flatten)]
    pub base: ActivityItemBase,
    pub post_type: PostType,
    #[serde(default)]
    pub post_details: Option<UserPostDetails>,
    #[serde(default)]
    pub timeline: Option<PostTimeline>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerActivityItem {
    #[serde(flatten)]
    pub base: ActivityItemBase,
    pub activity_items: Vec<ActivityItem>,
}

/// One entry of an activity feed, resolved by its `activityItemType` tag.
///
/// Tags without a dedicated variant (`Played`, `Followed`, broadcasts,
/// future additions) land in [`ActivityItem::Other`] with their common
/// fields intact; the raw tag is kept alongside.
#[derive(Debug, Clone)]
pub enum ActivityItem {
    Achievement(Box<AchievementActivityItem>),
    Clip(Box<ClipActivityItem>),
    Screenshot(Box<ScreenshotActivityItem>),
    UserPost(Box<UserPostActivityItem>),
    Container(Box<ContainerActivityItem>),
    Other {
        item_type: String,
        base: Box<ActivityItemBase>,
    },
}

impl ActivityItem {
    /// Fields shared by every variant.
    pub fn base(&self) -> &ActivityItemBase {
        match self {
            ActivityItem::Achievement(item) => &item.base,
            ActivityItem::Clip(item) => &item.base,
            ActivityItem::Screenshot(item) => &item.base,
            ActivityItem::UserPost(item) => &item.base,
            ActivityItem::Container(item) => &item.base,
            ActivityItem::Other { base, .. } => base,
        }
    }

    pub fn item_type(&self) -> ActivityItemType {
        self.base().activity_item_type
    }
}

impl<'de> Deserialize<'de> for ActivityItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        let tag = value
            .get("activityItemType")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("activityItemType"))?
            .to_string();

        let item = match tag.as_str() {
            "Achievement" => serde_json::from_value(value).map(ActivityItem::Achievement),
            "GameDVR" => serde_json::from_value(value).map(ActivityItem::Clip),
            "Screenshot" => serde_json::from_value(value).map(ActivityItem::Screenshot),
            "UserPost" | "TextPost" => serde_json::from_value(value).map(ActivityItem::UserPost),
            "Container" => serde_json::from_value(value).map(ActivityItem::Container),
            _ => serde_json::from_value(value).map(|base| ActivityItem::Other {
                item_type: tag.clone(),
                base,
            }),
        };
        item.map_err(|e| D::Error::custom(format!("{tag} activity item: {e}")))
    }
}

/// A page of activity items.
///
/// `cont_token` is handed back untouched; pass it to
/// [`ActivityParams::cont_token`](super::params::ActivityParams::cont_token)
/// to fetch the next page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub num_items: u32,
    pub activity_items: Vec<ActivityItem>,
    #[serde(default)]
    pub cont_token: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub polling_interval_seconds: Option<String>,
    #[serde(default)]
    pub polling_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(raw: StringOrNumber) -> Self {
        match raw {
            StringOrNumber::Text(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Some counters arrive as strings in one contract version and numbers in
/// another.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}
