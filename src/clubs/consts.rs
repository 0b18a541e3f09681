//! Club tag catalogue and default profile settings per club type.

use super::models::{ClubRole, ClubType};
use super::settings::ClubSettingsContract;

pub const COMMUNICATION_TAGS: [&str; 10] = [
    "kidfriendlycontentonly",
    "allcontentok",
    "textchatrequired",
    "nomic",
    "micoptional",
    "micrequired",
    "notrashtalking",
    "trashtalkingok",
    "noswearing",
    "swearingok",
];

pub const PLAY_STYLE_TAGS: [&str; 9] = [
    "newplayerswelcome",
    "willhelpnewplayers",
    "experiencedplayersonly",
    "casual",
    "competitive",
    "cooperative",
    "playervsplayer",
    "achievementhunting",
    "tournament",
];

pub const PEOPLE_TAGS: [&str; 3] = ["adultsonly", "allages", "everyoneiswelcome"];

/// Every tag the club profile accepts.
pub const CLUB_TAGS: [&[&str]; 3] = [&COMMUNICATION_TAGS, &PLAY_STYLE_TAGS, &PEOPLE_TAGS];

/// Whether `tag` is part of the club tag catalogue.
pub fn is_known_tag(tag: &str) -> bool {
    CLUB_TAGS.iter().any(|group| group.contains(&tag))
}

/// Profile settings a freshly created club of `club_type` should get.
///
/// Open and closed clubs share the same defaults; secret clubs disable join
/// requests and restrict joining LFG groups to members.
pub fn default_settings(club_type: ClubType) -> ClubSettingsContract {
    let mut settings = ClubSettingsContract {
        preferred_locale: Some("en-US".to_string()),
        request_to_join_enabled: Some(true),
        who_can_post_to_feed: Some(ClubRole::Member),
        who_can_invite: Some(ClubRole::Moderator),
        who_can_chat: Some(ClubRole::Member),
        who_can_create_lfg: Some(ClubRole::Member),
        who_can_join_lfg: Some(ClubRole::Nonmember),
        mature_content_enabled: Some(true),
        watch_club_titles_only: Some(false),
        ..Default::default()
    };
    if club_type == ClubType::Secret {
        settings.request_to_join_enabled = Some(false);
        settings.who_can_join_lfg = Some(ClubRole::Member);
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_are_recognized() {
        assert!(is_known_tag("micrequired"));
        assert!(is_known_tag("tournament"));
        assert!(is_known_tag("allages"));
        assert!(!is_known_tag("MicRequired"));
        assert!(!is_known_tag("speedrunning"));
    }

    #[test]
    fn open_and_closed_defaults_match() {
        assert_eq!(
            default_settings(ClubType::Open),
            default_settings(ClubType::Closed)
        );
    }

    #[test]
    fn secret_defaults_restrict_joining() {
        let open = default_settings(ClubType::Open);
        let secret = default_settings(ClubType::Secret);
        assert_eq!(open.request_to_join_enabled, Some(true));
        assert_eq!(secret.request_to_join_enabled, Some(false));
        assert_eq!(open.who_can_join_lfg, Some(ClubRole::Nonmember));
        assert_eq!(secret.who_can_join_lfg, Some(ClubRole::Member));
        assert_eq!(secret.who_can_invite, Some(ClubRole::Moderator));
    }
}
