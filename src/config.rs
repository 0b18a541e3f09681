//! Client configuration and per-call request options.
//!
//! [`ClientConfig`] is fixed when the [`XboxClient`](crate::client::XboxClient)
//! is built: service hosts, timeouts, and the `Accept-Language` header.
//! [`RequestOptions`] carries transport-level extras for a single call.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::service::Service;

/// Connect timeout covering the TCP and TLS handshake.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout. Xbox Live responses are small JSON documents.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US, en";

/// Base URL overrides per service. Services without an override use
/// [`Service::default_host`].
#[derive(Debug, Clone, Default)]
pub struct ServiceHosts {
    overrides: HashMap<Service, String>,
}

impl ServiceHosts {
    /// Points a single service at `base_url`.
    pub fn set(&mut self, service: Service, base_url: &str) {
        self.overrides
            .insert(service, base_url.trim_end_matches('/').to_string());
    }

    /// Base URL for `service`, without a trailing slash.
    pub fn base(&self, service: Service) -> &str {
        self.overrides
            .get(&service)
            .map(String::as_str)
            .unwrap_or_else(|| service.default_host())
    }
}

/// Settings fixed for the lifetime of a client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host overrides, mostly for tests and proxies.
    pub hosts: ServiceHosts,
    /// TCP + TLS handshake timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// Value of the `Accept-Language` header sent with every call.
    pub accept_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            hosts: ServiceHosts::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration that routes every service to `base_url`, used by tests
    /// to point at a local mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        let mut config = ClientConfig::default();
        for service in Service::ALL {
            config.hosts.set(service, base_url);
        }
        config
    }
}

/// Transport-level options for a single call.
///
/// Keys that the club profile update does not recognize as settings land
/// here (see [`RequestOptions::absorb`]) instead of being rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Overrides the client's request timeout for this call.
    pub timeout: Option<Duration>,
    /// Extra headers appended after the standard ones.
    pub headers: Vec<(String, String)>,
    /// Extra query parameters appended after the operation's own.
    pub query: Vec<(String, String)>,
    /// Keys with no transport meaning. Kept for inspection, never sent.
    pub unused: Vec<(String, Value)>,
}

impl RequestOptions {
    /// Routes one loosely-typed key/value pair into the matching option.
    ///
    /// - `timeout`: seconds, as a number.
    /// - `headers`: object of string values.
    /// - `params` / `query`: object of scalar values.
    ///
    /// Anything else, or a recognized key with an unusable value, is kept in
    /// `unused`.
    pub fn absorb(&mut self, key: &str, value: Value) {
        match (key, &value) {
            ("timeout", Value::Number(n)) => {
                match n.as_f64().map(Duration::try_from_secs_f64) {
                    Some(Ok(timeout)) => self.timeout = Some(timeout),
                    _ => self.unused.push((key.to_string(), value)),
                }
            }
            ("headers", Value::Object(map)) => {
                for (name, v) in map {
                    if let Some(s) = v.as_str() {
                        self.headers.push((name.clone(), s.to_string()));
                    }
                }
            }
            ("params" | "query", Value::Object(map)) => {
                for (name, v) in map {
                    if let Some(s) = scalar_to_string(v) {
                        self.query.push((name.clone(), s));
                    }
                }
            }
            _ => self.unused.push((key.to_string(), value)),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
