//! Typed error hierarchy for the xbox-webapi crate.
//!
//! Every public operation returns [`Result`]. Variants map to the boundaries a
//! call can fail at:
//! - `Validation`: rejected locally before any request is sent (empty search
//!   query, more than 10 club ids, a title club without a title family).
//! - `Api`: the service answered with a non-2xx status. The body is kept
//!   verbatim because Xbox Live services return their own numeric error
//!   catalogue (e.g. `1010` "club name not available") inside it.
//! - `Parse`: the body did not match the expected model.
//! - `Network`: DNS, TCP, TLS, timeouts; no status code is available.
//! - `Header`: credentials or per-call options that cannot be encoded as
//!   HTTP header values.

use reqwest::StatusCode;
use serde::Deserialize;

/// Unified error type for all xbox-webapi operations.
#[derive(Debug, thiserror::Error)]
pub enum XblError {
    /// The request was rejected locally and never sent.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The service returned a non-success HTTP status code.
    #[error("API error {status}: {body}")]
    Api {
        /// The HTTP status code returned by the service.
        status: StatusCode,
        /// The raw response body text, unmodified.
        body: String,
    },

    /// JSON deserialization failed when parsing a response body.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A network-level failure occurred (connection, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A header value (authorization, extra header) contained invalid bytes.
    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, XblError>;

/// The `{ "code": ..., "description": ... }` error document most Xbox Live
/// services put in non-2xx bodies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceError {
    /// Service-specific numeric error code, distinct from the HTTP status.
    pub code: i64,
    /// Human-readable description, when provided.
    #[serde(default)]
    pub description: Option<String>,
}

impl XblError {
    /// Builds a validation error from anything string-like.
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        XblError::Validation(msg.into())
    }

    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            XblError::Api { status, .. } => Some(*status),
            XblError::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Parses the service error document out of an `Api` body.
    ///
    /// Returns `None` when this is not an `Api` error or the body is not a
    /// service error document. The body itself is never altered.
    pub fn service_error(&self) -> Option<ServiceError> {
        match self {
            XblError::Api { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn api_error_preserves_status_and_body() {
        let err = XblError::Api {
            status: StatusCode::FORBIDDEN,
            body: r#"{"code":1100,"description":"Insufficient permissions for write request."}"#
                .to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"), "display should include status code");
        assert!(
            msg.contains("Insufficient permissions"),
            "display should include response body"
        );
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn service_error_is_extracted_from_body() {
        let err = XblError::Api {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"code":1010,"description":"The requested club name is not available."}"#
                .to_string(),
        };
        let service = err.service_error().unwrap();
        assert_eq!(service.code, 1010);
        assert_eq!(
            service.description.as_deref(),
            Some("The requested club name is not available.")
        );
    }

    #[test]
    fn service_error_is_none_for_plain_body() {
        let err = XblError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "upstream exploded".to_string(),
        };
        assert!(err.service_error().is_none());
        assert!(XblError::validation("nope").service_error().is_none());
    }

    #[test]
    fn validation_error_displays_message() {
        let err = XblError::validation("Query must not be empty");
        assert_eq!(err.to_string(), "invalid request: Query must not be empty");
        assert!(err.status().is_none());
    }

    #[test]
    fn parse_error_wraps_serde_json() {
        let json_err: serde_json::Error =
            serde_json::from_str::<String>("{{bad json}}").unwrap_err();
        let err = XblError::Parse(json_err);
        assert!(err.to_string().contains("failed to parse response"));
        assert!(
            err.source().is_some(),
            "Parse variant should chain to serde_json::Error"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<XblError>();
    }
}
