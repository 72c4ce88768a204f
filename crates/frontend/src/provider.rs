//! Provider session source
//!
//! OAuth is handled by an external identity service exposing the
//! `/api/auth/*` endpoints. The app only reads the resulting session and asks
//! the service to end it.

use crate::config::AuthConfig;
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use taskdesk_core::{ProviderKind, ProviderSession};
use taskdesk_http::{ClientError, PublicClient};

/// Source of the ambient provider session
#[async_trait(?Send)]
pub trait SessionSource {
    /// Current session, `None` when signed out
    async fn fetch_session(&self) -> Result<Option<ProviderSession>, ClientError>;

    async fn sign_out(&self) -> Result<(), ClientError>;

    /// URL that starts a sign-in with `provider` and returns to `callback`
    fn sign_in_url(&self, provider: ProviderKind, callback: &str) -> String;
}

#[derive(Debug, Deserialize)]
struct RawUser {
    name: Option<String>,
    email: Option<String>,
}

/// Session endpoint body; a signed-out session is `{}`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSession {
    user: Option<RawUser>,
    access_token: Option<String>,
    expires: Option<String>,
    provider: Option<ProviderKind>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsrfToken {
    csrf_token: String,
}

/// Turn a session body into a [`ProviderSession`]
///
/// Bodies without a user are signed out. When the provider is not reported,
/// a session carrying an email came from Google and one without came from
/// the credentials provider, which only knows a username.
pub fn parse_session(
    body: serde_json::Value,
) -> Result<Option<ProviderSession>, serde_json::Error> {
    let raw: RawSession = serde_json::from_value(body)?;
    let Some(user) = raw.user else {
        return Ok(None);
    };
    let provider = raw.provider.unwrap_or(if user.email.is_some() {
        ProviderKind::Google
    } else {
        ProviderKind::Credentials
    });
    Ok(Some(ProviderSession {
        provider,
        email: user.email,
        display_name: user.name,
        access_token: raw.access_token,
        expires: raw.expires,
    }))
}

/// [`SessionSource`] backed by the identity service
#[derive(Debug, Clone)]
pub struct IdentityService {
    client: PublicClient,
}

impl IdentityService {
    pub fn new(client: PublicClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl SessionSource for IdentityService {
    async fn fetch_session(&self) -> Result<Option<ProviderSession>, ClientError> {
        let request = self.client.request(Method::GET, AuthConfig::SESSION_PATH);
        let body: serde_json::Value = self.client.execute(request).await?;
        Ok(parse_session(body)?)
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        let request = self.client.request(Method::GET, AuthConfig::CSRF_PATH);
        let csrf: CsrfToken = self.client.execute(request).await?;
        let request = self
            .client
            .request(Method::POST, AuthConfig::SIGNOUT_PATH)
            .form(&[("csrfToken", csrf.csrf_token.as_str()), ("json", "true")]);
        self.client.execute_empty(request).await
    }

    fn sign_in_url(&self, provider: ProviderKind, callback: &str) -> String {
        let provider = match provider {
            ProviderKind::Google => "google",
            ProviderKind::Credentials => "credentials",
        };
        let url = format!("{}{}/{provider}", self.client.base_url(), AuthConfig::SIGNIN_PATH);
        match reqwest::Url::parse_with_params(&url, &[("callbackUrl", callback)]) {
            Ok(with_callback) => with_callback.into(),
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in URL is not absolute, dropping callback");
                url
            }
        }
    }
}
