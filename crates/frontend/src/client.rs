//! Client configuration and initialization

use crate::config::{app_config, identity_base_url, page_origin};
use crate::navigation::SessionExpiredNavigator;
use crate::provider::IdentityService;
use crate::storage::{WebStorage, session_manager};
use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};
use taskdesk_core::ProviderSession;
pub use taskdesk_http::ClientError;
use taskdesk_http::{HttpAuthBackend, PublicClient, SessionClient, TypedClientBuilder};

/// Interceptor used for every authenticated call from the app
pub type AppSessionClient = SessionClient<WebStorage, SessionExpiredNavigator>;

/// Global client instances
static API_CLIENT: Lazy<Mutex<Option<PublicClient>>> = Lazy::new(|| Mutex::new(None));
static IDENTITY_CLIENT: Lazy<Mutex<Option<PublicClient>>> = Lazy::new(|| Mutex::new(None));

fn cached_client(
    slot: &Mutex<Option<PublicClient>>,
    build: impl FnOnce() -> Result<PublicClient, ClientError>,
) -> Result<PublicClient, ClientError> {
    let mut client_lock = slot.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(client) = client_lock.as_ref() {
        return Ok(client.clone());
    }
    let client = build()?;
    *client_lock = Some(client.clone());
    Ok(client)
}

/// Backend API base URL, defaulting to the page origin when left empty
fn api_base_url() -> String {
    let configured = app_config().api_base();
    if configured.is_empty() {
        page_origin()
    } else {
        configured.to_string()
    }
}

/// Get the public backend client (for unauthenticated endpoints)
pub fn create_public_client() -> Result<PublicClient, ClientError> {
    cached_client(&API_CLIENT, || {
        TypedClientBuilder::from(app_config())
            .base_url(api_base_url())
            .build_public()
    })
}

pub fn auth_backend() -> Result<HttpAuthBackend, ClientError> {
    Ok(HttpAuthBackend::new(create_public_client()?))
}

/// Interceptor for the current session
///
/// Built per call so it always sees the latest cached identity.
pub fn create_session_client(
    provider: Option<ProviderSession>,
) -> Result<AppSessionClient, ClientError> {
    Ok(
        SessionClient::new(create_public_client()?, session_manager(), SessionExpiredNavigator)
            .with_provider(provider),
    )
}

pub fn identity_service() -> Result<IdentityService, ClientError> {
    let client = cached_client(&IDENTITY_CLIENT, || {
        TypedClientBuilder::new()
            .base_url(identity_base_url())
            .build_public()
    })?;
    Ok(IdentityService::new(client))
}
