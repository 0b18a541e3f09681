//! Service table: default host and contract version for every Xbox Live
//! service family this crate talks to.
//!
//! Each service expects an `x-xbl-contract-version` header that selects the
//! schema revision of its responses. The table is static; a call can still
//! pin a different version (e.g. `clubsowned` on clubaccounts uses 2).

/// An Xbox Live service family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Club creation, naming, ownership and suspension.
    ClubAccounts,
    /// Club lookup, search and recommendations.
    ClubHub,
    /// Club presence counts and per-user presence.
    ClubPresence,
    /// Club profile settings.
    ClubProfile,
    /// Club membership and roles.
    ClubRoster,
    /// Activity feeds and pins.
    Activity,
    /// User timeline posts.
    UserPosts,
    /// Comment/like summaries.
    Comments,
    /// Club chat channels.
    ChatFeed,
    /// Club moderation reports.
    ClubModeration,
}

impl Service {
    /// Every service, in table order.
    pub const ALL: [Service; 10] = [
        Service::ClubAccounts,
        Service::ClubHub,
        Service::ClubPresence,
        Service::ClubProfile,
        Service::ClubRoster,
        Service::Activity,
        Service::UserPosts,
        Service::Comments,
        Service::ChatFeed,
        Service::ClubModeration,
    ];

    /// Production base URL.
    pub const fn default_host(self) -> &'static str {
        match self {
            Service::ClubAccounts => "https://clubaccounts.xboxlive.com",
            Service::ClubHub => "https://clubhub.xboxlive.com",
            Service::ClubPresence => "https://clubpresence.xboxlive.com",
            Service::ClubProfile => "https://clubprofile.xboxlive.com",
            Service::ClubRoster => "https://clubroster.xboxlive.com",
            Service::Activity => "https://avty.xboxlive.com",
            Service::UserPosts => "https://userposts.xboxlive.com",
            Service::Comments => "https://comments.xboxlive.com",
            Service::ChatFeed => "https://chatfd.xboxlive.com",
            Service::ClubModeration => "https://clubmoderation.xboxlive.com",
        }
    }

    /// Contract version sent unless a call overrides it.
    pub const fn contract_version(self) -> u32 {
        match self {
            Service::ClubAccounts => 1,
            Service::ClubHub => 5,
            Service::ClubPresence => 1,
            Service::ClubProfile => 2,
            Service::ClubRoster => 4,
            Service::Activity => 12,
            Service::UserPosts => 2,
            Service::Comments => 3,
            Service::ChatFeed => 1,
            Service::ClubModeration => 1,
        }
    }
}
