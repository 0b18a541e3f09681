//! Xbox Live credentials supplied by the caller's session.
//!
//! Acquiring and refreshing the XSTS token happens outside this crate. The
//! session owner hands over the already-issued token together with the user
//! hash (`uhs`) and the caller's xuid. `XblAuth` turns them into the
//! `Authorization: XBL3.0 x=<uhs>;<token>` header and exposes the xuid for
//! operations that default to "self".

use std::fmt;

/// Credentials for an authenticated Xbox Live user.
///
/// Invariants:
/// - `xuid` is the numeric id of the user the token was issued for.
/// - The token is never printed by `Debug`.
#[derive(Clone)]
pub struct XblAuth {
    user_hash: String,
    token: String,
    xuid: String,
}

impl XblAuth {
    /// Creates credentials from an XSTS token, its user hash and the xuid.
    pub fn new(user_hash: &str, token: &str, xuid: &str) -> Self {
        XblAuth {
            user_hash: user_hash.to_string(),
            token: token.to_string(),
            xuid: xuid.to_string(),
        }
    }

    /// The caller's own xuid.
    pub fn xuid(&self) -> &str {
        &self.xuid
    }

    /// The user hash the token was issued for.
    pub fn user_hash(&self) -> &str {
        &self.user_hash
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("XBL3.0 x={};{}", self.user_hash, self.token)
    }
}

impl fmt::Debug for XblAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XblAuth")
            .field("user_hash", &self.user_hash)
            .field("token", &"<redacted>")
            .field("xuid", &self.xuid)
            .finish()
    }
}
