//! Username/password login

use crate::backend::AuthBackend;
use crate::identity::CachedIdentity;
use crate::navigation::{Navigator, Redirect};
use crate::session::SessionManager;
use crate::store::SessionStore;

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Text shown under the login form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LoginFailure {
    pub message: String,
}

impl LoginFailure {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Exchanges credentials for a token and caches the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialLogin {
    landing: Redirect,
}

impl Default for CredentialLogin {
    fn default() -> Self {
        Self::new(Redirect::Stamp)
    }
}

impl CredentialLogin {
    pub fn new(landing: Redirect) -> Self {
        Self { landing }
    }

    pub fn landing(&self) -> Redirect {
        self.landing
    }

    /// Submit the login form
    ///
    /// On success the identity replaces whatever was cached and the browser
    /// moves to the landing route. On failure the cache is left alone.
    pub async fn submit<B, S, N>(
        &self,
        backend: &B,
        manager: &SessionManager<S>,
        navigator: &N,
        username: &str,
        password: &str,
    ) -> Result<CachedIdentity, LoginFailure>
    where
        B: AuthBackend + ?Sized,
        S: SessionStore,
        N: Navigator + ?Sized,
    {
        let grant = match backend.login(username, password).await {
            Ok(grant) => grant,
            Err(e) => {
                tracing::info!(error = %e, "Login rejected");
                let message = e
                    .detail()
                    .and_then(|detail| detail.joined())
                    .unwrap_or_else(|| LOGIN_FAILED.to_string());
                return Err(LoginFailure::new(message));
            }
        };

        let identity = CachedIdentity {
            token: grant.access_token,
            user_id: grant.user_id,
            is_admin: grant.is_admin.unwrap_or(false),
            email: Some(username.to_string()),
        };
        manager.save(&identity).map_err(|e| {
            tracing::error!(error = %e, "Failed to cache login token");
            LoginFailure::new(LOGIN_FAILED)
        })?;

        tracing::info!(landing = %self.landing, "Login succeeded");
        navigator.navigate(self.landing);
        Ok(identity)
    }
}
