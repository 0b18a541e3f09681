//! Authenticated HTTP session for the Xbox Live REST services.
//!
//! `XboxClient` wraps a `reqwest::Client`, the caller's [`XblAuth`]
//! credentials and a [`ClientConfig`]. Provider modules (`clubs`, `feed`)
//! describe a call as a `ServiceCall` and hand it to `XboxClient::send`,
//! which:
//!
//! - builds the full URL from the service table (or host override),
//! - attaches `Authorization`, `Accept`, `Accept-Language` and the
//!   service's `x-xbl-contract-version` explicitly for that call,
//! - reads the body as text before checking the status, so a non-2xx
//!   response surfaces as `XblError::Api` with the service's error document
//!   intact.
//!
//! There is no retry and no token refresh here: a rejected token is reported
//! to the caller like any other non-2xx status.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::XblAuth;
use crate::config::{ClientConfig, RequestOptions};
use crate::error::{Result, XblError};
use crate::service::Service;

/// Header carrying the response schema revision.
pub const CONTRACT_VERSION_HEADER: &str = "x-xbl-contract-version";

/// A successful (2xx) response: status plus raw text body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code, always in the 2xx range.
    pub status: StatusCode,
    /// Raw body text. May be empty (e.g. 204 No Content).
    pub body: String,
}

impl ApiResponse {
    /// Deserializes the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Where a call goes.
#[derive(Debug, Clone)]
pub(crate) enum Target {
    /// A path on one of the known services.
    Service(Service, String),
    /// A fully qualified URL (feed item locators carry their own host).
    Absolute(String),
}

/// Description of one outbound call, built by provider functions.
#[derive(Debug, Clone)]
pub(crate) struct ServiceCall {
    method: Method,
    target: Target,
    contract_version: u32,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ServiceCall {
    /// A call to `path` on `service` using the service's contract version.
    pub(crate) fn new(method: Method, service: Service, path: impl Into<String>) -> Self {
        ServiceCall {
            method,
            target: Target::Service(service, path.into()),
            contract_version: service.contract_version(),
            query: Vec::new(),
            body: None,
        }
    }

    /// A call to an absolute URL with an explicit contract version.
    pub(crate) fn absolute(method: Method, url: impl Into<String>, contract_version: u32) -> Self {
        ServiceCall {
            method,
            target: Target::Absolute(url.into()),
            contract_version,
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn get(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::GET, service, path)
    }

    pub(crate) fn post(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::POST, service, path)
    }

    pub(crate) fn put(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::PUT, service, path)
    }

    pub(crate) fn delete(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, service, path)
    }

    /// Pins a contract version other than the service default.
    pub(crate) fn contract_version(mut self, version: u32) -> Self {
        self.contract_version = version;
        self
    }

    pub(crate) fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query = params;
        self
    }

    pub(crate) fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Authenticated HTTP session shared by every provider function.
///
/// Cloning is cheap: `reqwest::Client` is reference counted internally.
#[derive(Debug, Clone)]
pub struct XboxClient {
    http: Client,
    auth: XblAuth,
    config: ClientConfig,
}

impl XboxClient {
    /// Creates a client against the production services.
    pub fn new(auth: XblAuth) -> Result<Self> {
        Self::with_config(auth, ClientConfig::default())
    }

    /// Creates a client with explicit configuration.
    pub fn with_config(auth: XblAuth, config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(XboxClient { http, auth, config })
    }

    /// Constructor that routes every service to `base_url`, used by tests to
    /// point at a local mock server.
    pub fn with_base_url(auth: XblAuth, base_url: &str) -> Result<Self> {
        Self::with_config(auth, ClientConfig::with_base_url(base_url))
    }

    /// The caller's xuid, used by operations that default to "self".
    pub fn xuid(&self) -> &str {
        self.auth.xuid()
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn url(&self, target: &Target) -> String {
        match target {
            Target::Service(service, path) => {
                format!("{}{}", self.config.hosts.base(*service), path)
            }
            Target::Absolute(url) => url.clone(),
        }
    }

    /// Headers for one call, built from scratch every time.
    fn headers(&self, contract_version: u32, options: &RequestOptions) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&self.config.accept_language)?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.auth.authorization_header())?,
        );
        headers.insert(
            HeaderName::from_static(CONTRACT_VERSION_HEADER),
            HeaderValue::from(contract_version),
        );
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| XblError::validation(format!("invalid header name {name:?}: {e}")))?;
            headers.insert(name, HeaderValue::from_str(value)?);
        }
        Ok(headers)
    }

    /// Sends a call with default options.
    pub(crate) async fn send(&self, call: ServiceCall) -> Result<ApiResponse> {
        self.send_with(call, &RequestOptions::default()).await
    }

    /// Sends a call and checks the status.
    ///
    /// The body is read as text before the status check so that on failure
    /// the service's own error code survives in `XblError::Api`.
    pub(crate) async fn send_with(
        &self,
        call: ServiceCall,
        options: &RequestOptions,
    ) -> Result<ApiResponse> {
        let url = self.url(&call.target);
        let headers = self.headers(call.contract_version, options)?;

        tracing::debug!(
            method = %call.method,
            %url,
            contract_version = call.contract_version,
            "sending Xbox Live request"
        );

        let mut req = self
            .http
            .request(call.method.clone(), &url)
            .headers(headers);
        if !call.query.is_empty() {
            req = req.query(&call.query);
        }
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        if let Some(timeout) = options.timeout {
            req = req.timeout(timeout);
        }
        if let Some(body) = &call.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(method = %call.method, %url, %status, "Xbox Live request failed");
            return Err(XblError::Api { status, body });
        }

        tracing::debug!(%status, bytes = body.len(), "Xbox Live request succeeded");
        Ok(ApiResponse { status, body })
    }

    /// Sends a call and deserializes the JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, call: ServiceCall) -> Result<T> {
        self.send(call).await?.json()
    }
}
