//! Auth guard for protected pages
//!
//! The guard is evaluated on every render of a protected page. It never
//! redirects while the provider session is still loading, so a first paint
//! does not bounce through the login page.

use crate::backend::AuthBackend;
use crate::identity::{CachedIdentity, CurrentUser, ProviderSession, SourceKind};
use crate::navigation::{Navigator, Redirect};
use crate::reconcile::{ReconcileOutcome, Reconciler, USER_INFO_FAILED};
use crate::session::SessionManager;
use crate::store::SessionStore;
use tokio_util::sync::CancellationToken;

/// Provider session state as seen by a page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProviderState {
    #[default]
    Loading,
    Resolved(Option<ProviderSession>),
}

impl ProviderState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn session(&self) -> Option<&ProviderSession> {
        match self {
            Self::Resolved(session) => session.as_ref(),
            Self::Loading => None,
        }
    }
}

/// What a protected page should do on this render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a placeholder, do nothing else
    Loading,
    /// Navigate away and render nothing
    Redirect(Redirect),
    /// Check the cached token before rendering
    Validate { token: String, user: CurrentUser },
    /// Map the provider session to a backend user before rendering
    Reconcile {
        session: ProviderSession,
        user: CurrentUser,
    },
    Render(CurrentUser),
    /// Show the message instead of the page
    Failed(String),
}

impl GuardDecision {
    /// Restrict a render decision to admin users
    #[must_use]
    pub fn require_admin(self) -> Self {
        match self {
            Self::Render(user) if !user.is_admin => {
                tracing::info!("Non-admin user sent away from admin page");
                Self::Redirect(Redirect::Home)
            }
            other => other,
        }
    }

    /// Render without reconciling, for a page that reconciles by itself
    #[must_use]
    pub fn skip_reconcile(self) -> Self {
        match self {
            Self::Reconcile { user, .. } => Self::Render(user),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthGuard {
    validate_cached_token: bool,
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AuthGuard {
    pub fn new(validate_cached_token: bool) -> Self {
        Self {
            validate_cached_token,
        }
    }

    pub fn evaluate(
        &self,
        provider: &ProviderState,
        cached: Option<&CachedIdentity>,
    ) -> GuardDecision {
        let ProviderState::Resolved(session) = provider else {
            return GuardDecision::Loading;
        };

        let Some(user) = CurrentUser::resolve(session.as_ref(), cached) else {
            tracing::debug!("No session and no cached token, redirecting to login");
            return GuardDecision::Redirect(Redirect::Login);
        };

        if user.needs_reconciliation()
            && let Some(session) = session
        {
            return GuardDecision::Reconcile {
                session: session.clone(),
                user,
            };
        }

        match (&user.source, &user.token) {
            (SourceKind::Manual, Some(token)) if self.validate_cached_token => {
                GuardDecision::Validate {
                    token: token.clone(),
                    user,
                }
            }
            _ => GuardDecision::Render(user),
        }
    }

    /// Same as [`evaluate`](Self::evaluate) for admin-only pages
    pub fn evaluate_admin(
        &self,
        provider: &ProviderState,
        cached: Option<&CachedIdentity>,
    ) -> GuardDecision {
        self.evaluate(provider, cached).require_admin()
    }

    /// Check a cached token; any failure clears the cache and sends to login
    pub async fn validate<B, S>(
        backend: &B,
        manager: &SessionManager<S>,
        token: &str,
        user: CurrentUser,
    ) -> GuardDecision
    where
        B: AuthBackend + ?Sized,
        S: SessionStore,
    {
        match backend.check_token(token).await {
            Ok(()) => GuardDecision::Render(user),
            Err(e) => {
                tracing::warn!(error = %e, "Cached token rejected, clearing session");
                if let Err(e) = manager.clear() {
                    tracing::error!(error = %e, "Failed to clear cached identity");
                }
                GuardDecision::Redirect(Redirect::Login)
            }
        }
    }

    /// Reconcile a provider session, then resolve the user against the cache
    ///
    /// Pages only render once the backend user id is known. An unknown email
    /// goes to registration; other failures leave the cache alone and
    /// surface the user-info message.
    pub async fn reconcile<B, S, N>(
        reconciler: &Reconciler,
        backend: &B,
        manager: &SessionManager<S>,
        navigator: &N,
        session: &ProviderSession,
        cancel: &CancellationToken,
    ) -> GuardDecision
    where
        B: AuthBackend + ?Sized,
        S: SessionStore,
        N: Navigator + ?Sized,
    {
        let Some(email) = session.email.as_deref() else {
            return GuardDecision::Redirect(Redirect::Login);
        };

        match reconciler
            .reconcile(backend, manager, navigator, email, cancel)
            .await
        {
            ReconcileOutcome::Reconciled(identity) => {
                match CurrentUser::resolve(Some(session), Some(&identity)) {
                    Some(user) if user.reconciled && user.user_id.is_some() => {
                        GuardDecision::Render(user)
                    }
                    _ => GuardDecision::Failed(USER_INFO_FAILED.to_string()),
                }
            }
            ReconcileOutcome::NeedsRegistration => GuardDecision::Redirect(Redirect::Register),
            ReconcileOutcome::Failed(message) => GuardDecision::Failed(message),
            ReconcileOutcome::AlreadyHandled | ReconcileOutcome::Cancelled => {
                GuardDecision::Loading
            }
        }
    }
}
