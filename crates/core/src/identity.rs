//! Session and identity types
//!
//! Two sources can authenticate the browser: a session issued by the
//! external identity provider, and a [`CachedIdentity`] written to local
//! storage by a manual login or by reconciliation. [`CurrentUser::resolve`]
//! folds both into one value the rest of the app consumes.
//!
//! When both exist and disagree about who the user is, the provider session
//! wins and the cached identity is ignored until reconciliation rewrites it.

use serde::{Deserialize, Serialize};

/// Identity provider that issued a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Credentials,
}

/// Session object held by the identity provider integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub provider: ProviderKind,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub access_token: Option<String>,
    /// Provider-reported expiry, informational only
    pub expires: Option<String>,
}

/// Identity persisted in browser storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedIdentity {
    pub token: String,
    pub user_id: Option<String>,
    pub is_admin: bool,
    pub email: Option<String>,
}

impl CachedIdentity {
    /// Identity holding only a token, as returned by older login responses
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: None,
            is_admin: false,
            email: None,
        }
    }

    /// Whether this identity was issued for `email` (case-insensitive)
    pub fn belongs_to(&self, email: &str) -> bool {
        self.email
            .as_deref()
            .is_some_and(|own| own.eq_ignore_ascii_case(email))
    }
}

/// Where the current user's authentication came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSource {
    Provider(ProviderSession),
    Manual(CachedIdentity),
}

impl AuthSource {
    /// Pick the authoritative source; the provider session wins when present
    pub fn select(
        provider: Option<&ProviderSession>,
        cached: Option<&CachedIdentity>,
    ) -> Option<Self> {
        match (provider, cached) {
            (Some(session), _) => Some(Self::Provider(session.clone())),
            (None, Some(identity)) => Some(Self::Manual(identity.clone())),
            (None, None) => None,
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Provider(_) => SourceKind::Provider,
            Self::Manual(_) => SourceKind::Manual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Provider,
    Manual,
}

/// Normalized view of the authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub source: SourceKind,
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Bearer token for backend calls
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub is_admin: bool,
    /// Backend user record has been matched to this session
    pub reconciled: bool,
}

impl CurrentUser {
    /// Resolve the current user from both sources
    pub fn resolve(
        provider: Option<&ProviderSession>,
        cached: Option<&CachedIdentity>,
    ) -> Option<Self> {
        let source = AuthSource::select(provider, cached)?;
        Some(match source {
            AuthSource::Provider(session) => {
                let matching = session
                    .email
                    .as_deref()
                    .and_then(|email| cached.filter(|identity| identity.belongs_to(email)));

                match matching {
                    Some(identity) => Self {
                        source: SourceKind::Provider,
                        email: session.email.clone(),
                        display_name: session.display_name.clone(),
                        token: Some(identity.token.clone()),
                        user_id: identity.user_id.clone(),
                        is_admin: identity.is_admin,
                        reconciled: true,
                    },
                    None => Self {
                        source: SourceKind::Provider,
                        email: session.email.clone(),
                        display_name: session.display_name.clone(),
                        token: session.access_token.clone(),
                        user_id: None,
                        is_admin: false,
                        reconciled: false,
                    },
                }
            }
            AuthSource::Manual(identity) => Self {
                source: SourceKind::Manual,
                display_name: identity.email.clone(),
                email: identity.email,
                token: Some(identity.token),
                user_id: identity.user_id,
                is_admin: identity.is_admin,
                reconciled: true,
            },
        })
    }

    /// A provider session still has to be mapped to a backend user
    pub fn needs_reconciliation(&self) -> bool {
        !self.reconciled && self.email.is_some()
    }

    /// Name to greet the user with
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google(email: &str) -> ProviderSession {
        ProviderSession {
            provider: ProviderKind::Google,
            email: Some(email.to_string()),
            display_name: Some("Ada".to_string()),
            access_token: Some("oauth-token".to_string()),
            expires: None,
        }
    }

    fn cached(email: &str) -> CachedIdentity {
        CachedIdentity {
            token: "backend-token".to_string(),
            user_id: Some("7".to_string()),
            is_admin: true,
            email: Some(email.to_string()),
        }
    }

    #[test]
    fn test_no_sources_resolves_to_nobody() {
        assert!(CurrentUser::resolve(None, None).is_none());
        assert!(AuthSource::select(None, None).is_none());
    }

    #[test]
    fn test_manual_identity_resolves_directly() {
        let identity = cached("a@b.com");
        let user = CurrentUser::resolve(None, Some(&identity)).unwrap();
        assert_eq!(user.source, SourceKind::Manual);
        assert_eq!(user.token.as_deref(), Some("backend-token"));
        assert_eq!(user.user_id.as_deref(), Some("7"));
        assert!(user.is_admin);
        assert!(!user.needs_reconciliation());
    }

    #[test]
    fn test_provider_with_matching_cache_uses_backend_token() {
        let session = google("Ada@Example.com");
        let identity = cached("ada@example.com");
        let user = CurrentUser::resolve(Some(&session), Some(&identity)).unwrap();
        assert_eq!(user.source, SourceKind::Provider);
        assert_eq!(user.token.as_deref(), Some("backend-token"));
        assert!(user.reconciled);
        assert_eq!(user.greeting_name(), "Ada");
    }

    #[test]
    fn test_provider_wins_over_conflicting_cache() {
        let session = google("ada@example.com");
        let identity = cached("someone@else.com");
        let user = CurrentUser::resolve(Some(&session), Some(&identity)).unwrap();
        assert_eq!(user.source, SourceKind::Provider);
        assert_eq!(user.token.as_deref(), Some("oauth-token"));
        assert_eq!(user.user_id, None);
        assert!(!user.is_admin);
        assert!(user.needs_reconciliation());
    }

    #[test]
    fn test_cache_without_email_never_matches_provider() {
        let session = google("ada@example.com");
        let identity = CachedIdentity::from_token("t");
        let user = CurrentUser::resolve(Some(&session), Some(&identity)).unwrap();
        assert!(user.needs_reconciliation());
    }
}
