//! Bearer-token interceptor for authenticated calls
//!
//! Every data-fetching call goes through [`SessionClient`]. It picks the
//! token of the current user, and a 401 from any call clears the cached
//! identity and sends the browser to the login page.

use super::{
    error::ClientError,
    typed::{AuthenticatedClient, PublicClient},
};
use taskdesk_core::{
    CurrentUser, Navigator, ProviderSession, Redirect, SessionManager, SessionStore,
};

pub struct SessionClient<S, N> {
    client: PublicClient,
    manager: SessionManager<S>,
    navigator: N,
    provider: Option<ProviderSession>,
}

impl<S, N> std::fmt::Debug for SessionClient<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("base_url", &self.client.base_url())
            .field("has_provider_session", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: SessionStore, N: Navigator> SessionClient<S, N> {
    pub fn new(client: PublicClient, manager: SessionManager<S>, navigator: N) -> Self {
        Self {
            client,
            manager,
            navigator,
            provider: None,
        }
    }

    /// Use the provider session when resolving the current user
    #[must_use]
    pub fn with_provider(mut self, provider: Option<ProviderSession>) -> Self {
        self.provider = provider;
        self
    }

    pub fn manager(&self) -> &SessionManager<S> {
        &self.manager
    }

    /// Current user as seen by this client, re-read from the cache on each call
    pub fn current_user(&self) -> Option<CurrentUser> {
        CurrentUser::resolve(self.provider.as_ref(), self.manager.load().as_ref())
    }

    /// Authenticated client for the current token
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when no token is available
    pub fn authorized(&self) -> Result<AuthenticatedClient, ClientError> {
        let token = self
            .current_user()
            .and_then(|user| user.token)
            .ok_or_else(|| ClientError::Configuration("Not authenticated".into()))?;
        Ok(self.client.clone().authenticate(token))
    }

    /// Run an authenticated call, invalidating the session on 401
    pub async fn call<T, F, Fut>(&self, call: F) -> Result<T, ClientError>
    where
        F: FnOnce(AuthenticatedClient) -> Fut,
        Fut: std::future::Future<Output = Result<T, ClientError>>,
    {
        let result = call(self.authorized()?).await;
        if matches!(&result, Err(e) if e.is_auth_expired()) {
            self.invalidate();
        }
        result
    }

    /// Drop the cached identity and go to the login page
    pub fn invalidate(&self) {
        tracing::warn!("Session token rejected, clearing cached identity");
        if let Err(e) = self.manager.clear() {
            tracing::error!(error = %e, "Failed to clear cached identity");
        }
        self.navigator.navigate(Redirect::Login);
    }
}
