//! Authentication status state machine

use crate::error::{CoreError, CoreResult};
use crate::identity::CurrentUser;

/// Authentication status of the browser
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Unauthenticated,
    /// Provider session or backend user record is being resolved
    Resolving,
    Authenticated(CurrentUser),
    Error(String),
}

/// Events driving [`AuthStatus`] transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    ResolveStarted,
    Resolved(CurrentUser),
    Failed(String),
    SignedOut,
}

impl AuthEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::ResolveStarted => "resolve_started",
            Self::Resolved(_) => "resolved",
            Self::Failed(_) => "failed",
            Self::SignedOut => "signed_out",
        }
    }
}

impl AuthStatus {
    #[must_use]
    pub const fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Get a human-readable description of the status
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Unauthenticated => "Unauthenticated".to_string(),
            Self::Resolving => "Resolving".to_string(),
            Self::Authenticated(user) => format!("Authenticated as {}", user.greeting_name()),
            Self::Error(message) => format!("Error: {message}"),
        }
    }

    /// Apply an event, rejecting transitions that make no sense
    ///
    /// A second `ResolveStarted` while already resolving is rejected; callers
    /// use that to suppress duplicate resolution work.
    pub fn apply(self, event: AuthEvent) -> CoreResult<Self> {
        let next = match (&self, event) {
            (
                Self::Unauthenticated | Self::Authenticated(_) | Self::Error(_),
                AuthEvent::ResolveStarted,
            ) => Self::Resolving,
            (
                Self::Unauthenticated | Self::Resolving | Self::Authenticated(_),
                AuthEvent::Resolved(user),
            ) => Self::Authenticated(user),
            (Self::Resolving, AuthEvent::Failed(message)) => Self::Error(message),
            (_, AuthEvent::SignedOut) => Self::Unauthenticated,
            (state, event) => {
                return Err(CoreError::invalid_transition(
                    state.description(),
                    event.name(),
                ));
            }
        };
        tracing::debug!(
            from = %self.description(),
            to = %next.description(),
            "Auth status transition"
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::SourceKind;

    fn user() -> CurrentUser {
        CurrentUser {
            source: SourceKind::Manual,
            email: Some("a@b.com".to_string()),
            display_name: None,
            token: Some("t".to_string()),
            user_id: Some("1".to_string()),
            is_admin: false,
            reconciled: true,
        }
    }

    #[test]
    fn test_resolution_lifecycle() {
        let status = AuthStatus::default();
        assert!(!status.is_authenticated());

        let status = status.apply(AuthEvent::ResolveStarted).unwrap();
        assert!(status.is_resolving());

        let status = status.apply(AuthEvent::Resolved(user())).unwrap();
        assert_eq!(status.current_user(), Some(&user()));

        let status = status.apply(AuthEvent::SignedOut).unwrap();
        assert_eq!(status, AuthStatus::Unauthenticated);
    }

    #[test]
    fn test_duplicate_resolve_is_rejected() {
        let status = AuthStatus::Resolving;
        let err = status.apply(AuthEvent::ResolveStarted).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
    }

    #[test]
    fn test_failure_only_while_resolving() {
        let status = AuthStatus::Resolving
            .apply(AuthEvent::Failed("boom".to_string()))
            .unwrap();
        assert_eq!(status, AuthStatus::Error("boom".to_string()));

        assert!(
            AuthStatus::Unauthenticated
                .apply(AuthEvent::Failed("boom".to_string()))
                .is_err()
        );
        assert!(
            AuthStatus::Authenticated(user())
                .apply(AuthEvent::Failed("boom".to_string()))
                .is_err()
        );
    }

    #[test]
    fn test_error_recovers_by_resolving_again() {
        let status = AuthStatus::Error("x".to_string())
            .apply(AuthEvent::ResolveStarted)
            .unwrap();
        assert!(status.is_resolving());
        assert!(
            AuthStatus::Error("x".to_string())
                .apply(AuthEvent::Resolved(user()))
                .is_err()
        );
    }

    #[test]
    fn test_manual_login_authenticates_directly() {
        let status = AuthStatus::Unauthenticated
            .apply(AuthEvent::Resolved(user()))
            .unwrap();
        assert!(status.is_authenticated());
    }
}
