//! User-info reconciliation and post-login session bootstrap
//!
//! A provider session only proves who the user is; the backend token, user
//! id and admin flag come from `GET /auth/get-user-info/{email}`. The
//! [`Reconciler`] performs that lookup at most once per session value, and
//! [`Reconciler::bootstrap`] then records the login in the user's history.
//!
//! One reconciler belongs to one mount of the page that drives it. Every call
//! takes a [`CancellationToken`]; once it is cancelled an in-flight request
//! is dropped and its result never reaches the cache.

use crate::backend::{AuthBackend, BackendError};
use crate::idempotency::IdempotencyKey;
use crate::identity::{CachedIdentity, ProviderSession};
use crate::navigation::{Navigator, Redirect};
use crate::session::SessionManager;
use crate::store::SessionStore;
use std::collections::HashSet;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use tokio_util::sync::CancellationToken;

pub const USER_INFO_FAILED: &str = "Failed to fetch user info.";
pub const STAMP_FAILED: &str = "Failed to log login history.";
pub const MISSING_USER_ID: &str = "Signed in, but no user id is cached.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Backend user found and cached
    Reconciled(CachedIdentity),
    /// Unknown email; the browser was sent to registration
    NeedsRegistration,
    /// Same session already handled (or in flight) on this mount
    AlreadyHandled,
    Cancelled,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Login stamped and the browser sent home
    Completed,
    NeedsRegistration,
    AlreadyHandled,
    Cancelled,
    Failed(String),
    /// Neither a provider session nor a cached token to work with
    Idle,
}

/// Per-mount memo of reconciliation and stamp requests
#[derive(Debug, Default)]
pub struct Reconciler {
    seen: Mutex<HashSet<IdempotencyKey>>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a key; false when it was already claimed
    fn claim(&self, key: &IdempotencyKey) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone())
    }

    fn release(&self, key: &IdempotencyKey) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// Whether a session email has been claimed on this mount
    pub fn has_handled(&self, email: &str) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&reconcile_key(email))
    }

    /// Map a provider email to a backend user and cache it
    pub async fn reconcile<B, S, N>(
        &self,
        backend: &B,
        manager: &SessionManager<S>,
        navigator: &N,
        email: &str,
        cancel: &CancellationToken,
    ) -> ReconcileOutcome
    where
        B: AuthBackend + ?Sized,
        S: SessionStore,
        N: Navigator + ?Sized,
    {
        let key = reconcile_key(email);
        if !self.claim(&key) {
            tracing::debug!("Reconciliation already handled for this session");
            return ReconcileOutcome::AlreadyHandled;
        }

        let Some(result) = until_cancelled(cancel, backend.user_info(email)).await else {
            self.release(&key);
            tracing::debug!("Reconciliation cancelled");
            return ReconcileOutcome::Cancelled;
        };

        match result {
            Ok(info) => {
                let identity = CachedIdentity {
                    token: info.access_token,
                    user_id: Some(info.user_id),
                    is_admin: info.is_admin,
                    email: Some(email.to_string()),
                };
                if let Err(e) = manager.save(&identity) {
                    tracing::error!(error = %e, "Failed to cache reconciled identity");
                    return ReconcileOutcome::Failed(USER_INFO_FAILED.to_string());
                }
                tracing::info!(is_admin = identity.is_admin, "Provider session reconciled");
                ReconcileOutcome::Reconciled(identity)
            }
            Err(BackendError::NotFound(detail)) => {
                tracing::info!(
                    detail = detail.joined().as_deref().unwrap_or_default(),
                    "Provider user is not registered"
                );
                navigator.navigate(Redirect::Register);
                ReconcileOutcome::NeedsRegistration
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch user info");
                ReconcileOutcome::Failed(USER_INFO_FAILED.to_string())
            }
        }
    }

    /// Record the login for `user_id` and send the browser home
    pub async fn stamp<B, N>(
        &self,
        backend: &B,
        navigator: &N,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> BootstrapOutcome
    where
        B: AuthBackend + ?Sized,
        N: Navigator + ?Sized,
    {
        let key = IdempotencyKey::new("stamp", &[user_id]);
        if !self.claim(&key) {
            return BootstrapOutcome::AlreadyHandled;
        }

        let Some(result) = until_cancelled(cancel, backend.stamp_login(user_id)).await else {
            self.release(&key);
            return BootstrapOutcome::Cancelled;
        };

        match result {
            Ok(()) => {
                tracing::info!("Login history stamped");
                navigator.navigate(Redirect::Home);
                BootstrapOutcome::Completed
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to log login history");
                BootstrapOutcome::Failed(STAMP_FAILED.to_string())
            }
        }
    }

    /// Post-login bootstrap: reconcile a provider session, or reuse the cached
    /// identity of a manual login, then stamp the login
    pub async fn bootstrap<B, S, N>(
        &self,
        backend: &B,
        manager: &SessionManager<S>,
        navigator: &N,
        provider: Option<&ProviderSession>,
        cancel: &CancellationToken,
    ) -> BootstrapOutcome
    where
        B: AuthBackend + ?Sized,
        S: SessionStore,
        N: Navigator + ?Sized,
    {
        if let Some(email) = provider.and_then(|session| session.email.as_deref()) {
            return match self
                .reconcile(backend, manager, navigator, email, cancel)
                .await
            {
                ReconcileOutcome::Reconciled(identity) => match identity.user_id.as_deref() {
                    Some(user_id) => self.stamp(backend, navigator, user_id, cancel).await,
                    None => BootstrapOutcome::Failed(MISSING_USER_ID.to_string()),
                },
                ReconcileOutcome::NeedsRegistration => BootstrapOutcome::NeedsRegistration,
                ReconcileOutcome::AlreadyHandled => BootstrapOutcome::AlreadyHandled,
                ReconcileOutcome::Cancelled => BootstrapOutcome::Cancelled,
                ReconcileOutcome::Failed(message) => BootstrapOutcome::Failed(message),
            };
        }

        if manager.token().is_none() {
            return BootstrapOutcome::Idle;
        }
        match manager.user_id() {
            Some(user_id) => self.stamp(backend, navigator, &user_id, cancel).await,
            None => {
                tracing::error!("Token exists but user id is not cached");
                BootstrapOutcome::Failed(MISSING_USER_ID.to_string())
            }
        }
    }
}

fn reconcile_key(email: &str) -> IdempotencyKey {
    IdempotencyKey::new("reconcile", &[&email.to_ascii_lowercase()])
}

/// Run `future` unless `cancel` fires first; the future is dropped on cancel
async fn until_cancelled<F: Future>(cancel: &CancellationToken, future: F) -> Option<F::Output> {
    if cancel.is_cancelled() {
        return None;
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        output = future => Some(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockAuthBackend;
    use crate::backend::{ErrorDetail, UserInfo};
    use crate::identity::ProviderKind;
    use crate::navigation::MockNavigator;
    use crate::store::MemoryStore;

    fn provider(email: &str) -> ProviderSession {
        ProviderSession {
            provider: ProviderKind::Google,
            email: Some(email.to_string()),
            display_name: Some("New User".to_string()),
            access_token: Some("oauth".to_string()),
            expires: None,
        }
    }

    fn user_info() -> UserInfo {
        UserInfo {
            access_token: "backend-token".to_string(),
            user_id: "21".to_string(),
            is_admin: false,
        }
    }

    fn no_navigation() -> MockNavigator {
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();
        navigator
    }

    #[tokio::test]
    async fn test_reconcile_caches_identity() {
        let manager = SessionManager::new(MemoryStore::new());
        let mut backend = MockAuthBackend::new();
        backend
            .expect_user_info()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(user_info()));

        let outcome = Reconciler::new()
            .reconcile(
                &backend,
                &manager,
                &no_navigation(),
                "ada@example.com",
                &CancellationToken::new(),
            )
            .await;

        let cached = manager.load().unwrap();
        assert_eq!(outcome, ReconcileOutcome::Reconciled(cached.clone()));
        assert_eq!(cached.token, "backend-token");
        assert_eq!(cached.user_id.as_deref(), Some("21"));
        assert_eq!(cached.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_concurrent_reconciliations_hit_backend_once() {
        let manager = SessionManager::new(MemoryStore::new());
        let mut backend = MockAuthBackend::new();
        backend
            .expect_user_info()
            .times(1)
            .returning(|_| Ok(user_info()));
        let navigator = no_navigation();
        let reconciler = Reconciler::new();
        let cancel = CancellationToken::new();

        let (first, second) = tokio::join!(
            reconciler.reconcile(&backend, &manager, &navigator, "ada@example.com", &cancel),
            reconciler.reconcile(&backend, &manager, &navigator, "ADA@example.com", &cancel),
        );

        let outcomes = [first, second];
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| matches!(o, ReconcileOutcome::Reconciled(_)))
                .count(),
            1
        );
        assert!(outcomes.contains(&ReconcileOutcome::AlreadyHandled));
        assert!(reconciler.has_handled("ada@example.com"));
    }

    #[tokio::test]
    async fn test_unknown_user_goes_to_registration() {
        let manager = SessionManager::new(MemoryStore::new());
        let mut backend = MockAuthBackend::new();
        backend.expect_user_info().times(1).returning(|_| {
            Err(BackendError::NotFound(ErrorDetail::Message(
                "User not found. Please register.".to_string(),
            )))
        });
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|to| *to == Redirect::Register)
            .times(1)
            .return_const(());

        let outcome = Reconciler::new()
            .reconcile(
                &backend,
                &manager,
                &navigator,
                "new@user.com",
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(outcome, ReconcileOutcome::NeedsRegistration);
        assert!(manager.store().is_empty());
    }

    #[tokio::test]
    async fn test_other_errors_leave_cache_untouched() {
        let manager = SessionManager::new(MemoryStore::new());
        manager.save(&CachedIdentity::from_token("previous")).unwrap();
        let mut backend = MockAuthBackend::new();
        backend
            .expect_user_info()
            .returning(|_| Err(BackendError::Network("down".to_string())));

        let outcome = Reconciler::new()
            .reconcile(
                &backend,
                &manager,
                &no_navigation(),
                "ada@example.com",
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(outcome, ReconcileOutcome::Failed(USER_INFO_FAILED.to_string()));
        assert_eq!(manager.load(), Some(CachedIdentity::from_token("previous")));
    }

    #[tokio::test]
    async fn test_cancelled_reconciliation_writes_nothing() {
        let manager = SessionManager::new(MemoryStore::new());
        let mut backend = MockAuthBackend::new();
        backend.expect_user_info().never();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let reconciler = Reconciler::new();
        let outcome = reconciler
            .reconcile(&backend, &manager, &no_navigation(), "ada@example.com", &cancel)
            .await;

        assert_eq!(outcome, ReconcileOutcome::Cancelled);
        assert!(manager.store().is_empty());
        assert!(!reconciler.has_handled("ada@example.com"));
    }

    #[tokio::test]
    async fn test_bootstrap_with_provider_stamps_and_goes_home() {
        let manager = SessionManager::new(MemoryStore::new());
        let mut backend = MockAuthBackend::new();
        backend
            .expect_user_info()
            .times(1)
            .returning(|_| Ok(user_info()));
        backend
            .expect_stamp_login()
            .withf(|user_id| user_id == "21")
            .times(1)
            .returning(|_| Ok(()));
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|to| *to == Redirect::Home)
            .times(1)
            .return_const(());

        let session = provider("ada@example.com");
        let outcome = Reconciler::new()
            .bootstrap(
                &backend,
                &manager,
                &navigator,
                Some(&session),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(outcome, BootstrapOutcome::Completed);
    }

    #[tokio::test]
    async fn test_bootstrap_manual_login_uses_cached_user_id() {
        let manager = SessionManager::new(MemoryStore::new());
        manager
            .save(&CachedIdentity {
                token: "t".to_string(),
                user_id: Some("5".to_string()),
                is_admin: false,
                email: Some("a@b.com".to_string()),
            })
            .unwrap();
        let mut backend = MockAuthBackend::new();
        backend.expect_user_info().never();
        backend
            .expect_stamp_login()
            .withf(|user_id| user_id == "5")
            .times(1)
            .returning(|_| Ok(()));
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(1).return_const(());

        let outcome = Reconciler::new()
            .bootstrap(&backend, &manager, &navigator, None, &CancellationToken::new())
            .await;

        assert_eq!(outcome, BootstrapOutcome::Completed);
    }

    #[tokio::test]
    async fn test_bootstrap_without_user_id_does_not_stamp() {
        let manager = SessionManager::new(MemoryStore::new());
        manager.save(&CachedIdentity::from_token("t")).unwrap();
        let mut backend = MockAuthBackend::new();
        backend.expect_stamp_login().never();

        let outcome = Reconciler::new()
            .bootstrap(
                &backend,
                &manager,
                &no_navigation(),
                None,
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(outcome, BootstrapOutcome::Failed(MISSING_USER_ID.to_string()));
    }

    #[tokio::test]
    async fn test_bootstrap_idle_without_any_session() {
        let manager = SessionManager::new(MemoryStore::new());
        let backend = MockAuthBackend::new();

        let outcome = Reconciler::new()
            .bootstrap(
                &backend,
                &manager,
                &no_navigation(),
                None,
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(outcome, BootstrapOutcome::Idle);
    }

    #[tokio::test]
    async fn test_stamp_failure_keeps_cache() {
        let manager = SessionManager::new(MemoryStore::new());
        manager
            .save(&CachedIdentity {
                token: "t".to_string(),
                user_id: Some("5".to_string()),
                is_admin: false,
                email: None,
            })
            .unwrap();
        let mut backend = MockAuthBackend::new();
        backend.expect_stamp_login().returning(|_| {
            Err(BackendError::Rejected {
                status: 500,
                detail: ErrorDetail::Missing,
            })
        });

        let outcome = Reconciler::new()
            .bootstrap(
                &backend,
                &manager,
                &no_navigation(),
                None,
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(outcome, BootstrapOutcome::Failed(STAMP_FAILED.to_string()));
        assert!(manager.load().is_some());
    }
}
