//! TaskDesk client session layer
//!
//! Platform-neutral pieces of the browser session: the cached identity and
//! its storage contract, the auth guard, user-info reconciliation and the
//! credential and registration flows. Transport lives in `taskdesk-http`,
//! rendering in `taskdesk-frontend`.

pub mod backend;
pub mod config;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod idempotency;
pub mod identity;
pub mod navigation;
pub mod prefs;
pub mod reconcile;
pub mod register;
pub mod session;
pub mod state;
pub mod store;

pub use backend::{AuthBackend, BackendError, ErrorDetail};
pub use config::AppConfig;
pub use error::{CoreError, CoreResult};
pub use guard::{AuthGuard, GuardDecision, ProviderState};
pub use idempotency::IdempotencyKey;
pub use identity::{
    AuthSource, CachedIdentity, CurrentUser, ProviderKind, ProviderSession, SourceKind,
};
pub use navigation::{Navigator, Redirect};
pub use prefs::{Preferences, Theme};
pub use reconcile::{BootstrapOutcome, ReconcileOutcome, Reconciler};
pub use session::SessionManager;
pub use state::{AuthEvent, AuthStatus};
pub use store::{MemoryStore, SessionStore};
