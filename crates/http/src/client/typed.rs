//! Backend clients split by whether a bearer token is attached
//!
//! An [`AuthenticatedClient`] can only be obtained from a token, so calls to
//! protected endpoints cannot be made without one.

use super::ClientError;
use reqwest::{Client, ClientBuilder, Response, Url, header};
use std::time::Duration;

const USER_AGENT: &str = concat!("taskdesk-client/", env!("CARGO_PKG_VERSION"));

/// Client for the login, registration and user-info endpoints
#[derive(Debug, Clone)]
pub struct PublicClient {
    client: Client,
    base_url: String,
}

/// Client for endpoints that require a bearer token
#[derive(Clone)]
pub struct AuthenticatedClient {
    client: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn build_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    #[cfg(not(target_arch = "wasm32"))]
    let client = {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()?
    };

    #[cfg(target_arch = "wasm32")]
    let client = {
        let _ = timeout; // fetch has no timeout
        ClientBuilder::new().user_agent(USER_AGENT).build()?
    };

    Ok(client)
}

/// Map a response to `T`, or to a [`ClientError`] carrying the raw body
async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }
}

/// Like [`read_json`] for calls whose success body is not needed
async fn read_status(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }
}

/// Join `segments` onto `base_url`, percent-encoding each one
fn url_with_segments(base_url: &str, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ClientError::Configuration(format!("invalid base_url: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ClientError::Configuration("base_url cannot be a base".into()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

impl PublicClient {
    /// Client rooted at `base_url`, trailing slash removed
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new_with_timeout(base_url, None)
    }

    fn new_with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request to `path` under the base URL
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Create a request for a path built from raw segments (emails, ids)
    pub fn request_segments(
        &self,
        method: reqwest::Method,
        segments: &[&str],
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = url_with_segments(&self.base_url, segments)?;
        Ok(self.client.request(method, url))
    }

    /// Send and decode a JSON body, mapping error statuses
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        read_json(request.send().await?).await
    }

    /// Execute a request, discarding a successful body
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        read_status(request.send().await?).await
    }

    /// Attach a bearer token to get an authenticated client
    pub fn authenticate(self, token: impl Into<String>) -> AuthenticatedClient {
        AuthenticatedClient {
            client: self.client,
            base_url: self.base_url,
            token: token.into(),
        }
    }
}

impl AuthenticatedClient {
    /// Client sending `token` as bearer on every request
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        Ok(PublicClient::new(base_url)?.authenticate(token))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request to `path` carrying the bearer token
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }

    /// Send and decode a JSON body, mapping error statuses
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        read_json(request.send().await?).await
    }

    /// Execute a request, discarding a successful body
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        read_status(request.send().await?).await
    }
}

/// Builder for both client kinds, seeded from [`AppConfig`](taskdesk_core::AppConfig) or by hand
#[derive(Debug, Default)]
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl TypedClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Per-request timeout; ignored on wasm
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a public client
    pub fn build_public(self) -> Result<PublicClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        PublicClient::new_with_timeout(base_url, self.timeout)
    }
}

impl From<&taskdesk_core::AppConfig> for TypedClientBuilder {
    fn from(config: &taskdesk_core::AppConfig) -> Self {
        let builder = Self::new().base_url(config.api_base());
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(config.api.timeout_secs));
        builder
    }
}
