//! Async Rust client library for the Xbox Live club, activity feed, chat and
//! moderation REST services.
//!
//! The caller brings an already issued XSTS token, its user hash and the
//! signed-in xuid; this crate builds URLs, picks the per-service contract
//! version, sends one request per operation and decodes the response into
//! typed models.
//!
//! # Modules
//!
//! - [`auth`]: XBL3.0 credentials supplied by the session owner.
//! - [`client`]: shared HTTP session, header construction, status checks.
//! - [`clubs`]: club accounts, hub, presence, profile and roster.
//! - [`config`]: service hosts, timeouts, per-call request options.
//! - [`error`]: `XblError` and the crate `Result`.
//! - [`feed`]: activity feeds, posts, comments, club chat, moderation.
//! - [`service`]: host and contract version per service.
//!
//! # Quick Start
//!
//! ```ignore
//! use xbox_webapi::{XblAuth, XboxClient};
//! use xbox_webapi::clubs;
//! use xbox_webapi::feed::{self, params::ActivityParams};
//!
//! let client = XboxClient::new(XblAuth::new(user_hash, xsts_token, xuid))?;
//! let club = clubs::get_club(&client, "3379884949998022", None).await?;
//! let page = feed::get_club_activity_feed(&client, &club.id, ActivityParams::new()).await?;
//! ```

pub mod auth;
pub mod client;
pub mod clubs;
pub mod config;
pub mod error;
pub mod feed;
pub mod service;

pub use auth::XblAuth;
pub use client::XboxClient;
pub use config::{ClientConfig, RequestOptions};
pub use error::{Result, XblError};
