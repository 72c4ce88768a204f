//! Auth endpoints of the task backend

use super::{
    error::ClientError,
    typed::{AuthenticatedClient, PublicClient},
};
use crate::types::StampRequest;
use async_trait::async_trait;
use reqwest::Method;
use taskdesk_core::backend::{
    AuthBackend, BackendError, RegisteredUser, Registration, TokenGrant, UserInfo,
};

/// Authentication endpoints for public client
impl PublicClient {
    /// Exchange credentials for a token (form-encoded, as the backend's OAuth2 form expects)
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenGrant, ClientError> {
        let request = self
            .request(Method::POST, "/auth/login")
            .form(&[("username", username), ("password", password)]);
        self.execute(request).await
    }

    /// Create an account
    pub async fn register(
        &self,
        registration: &Registration,
    ) -> Result<RegisteredUser, ClientError> {
        let request = self.request(Method::POST, "/auth/register").json(registration);
        self.execute(request).await
    }

    /// Look up the backend user for a provider email
    pub async fn get_user_info(&self, email: &str) -> Result<UserInfo, ClientError> {
        let request = self.request_segments(Method::GET, &["auth", "get-user-info", email])?;
        self.execute(request).await
    }

    /// Record a login in the user's history
    pub async fn stamp_login(&self, user_id: &str) -> Result<(), ClientError> {
        let request = self
            .request(Method::POST, "/data/login-history-stamp")
            .json(&StampRequest { user_id });
        self.execute_empty(request).await
    }
}

/// Authentication endpoints for authenticated client
impl AuthenticatedClient {
    /// Succeeds while the token is accepted
    pub async fn check_token(&self) -> Result<(), ClientError> {
        let request = self.request(Method::GET, "/protected-route");
        self.execute_empty(request).await
    }
}

/// [`AuthBackend`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: PublicClient,
}

impl HttpAuthBackend {
    pub fn new(client: PublicClient) -> Self {
        Self { client }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, username: &str, password: &str) -> Result<TokenGrant, BackendError> {
        Ok(self.client.login(username, password).await?)
    }

    async fn register(&self, registration: &Registration) -> Result<RegisteredUser, BackendError> {
        Ok(self.client.register(registration).await?)
    }

    async fn user_info(&self, email: &str) -> Result<UserInfo, BackendError> {
        Ok(self.client.get_user_info(email).await?)
    }

    async fn check_token(&self, token: &str) -> Result<(), BackendError> {
        Ok(self.client.clone().authenticate(token).check_token().await?)
    }

    async fn stamp_login(&self, user_id: &str) -> Result<(), BackendError> {
        Ok(self.client.stamp_login(user_id).await?)
    }
}
