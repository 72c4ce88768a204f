//! Global authentication context and provider

use crate::client::identity_service;
use crate::provider::SessionSource;
use crate::routes::Route;
use crate::storage::session_manager;
use std::rc::Rc;
use taskdesk_core::{AuthEvent, AuthStatus, CurrentUser, ProviderSession, ProviderState};
use yew::prelude::*;
use yew_router::prelude::*;

/// Authentication context data
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AuthContextData {
    pub status: AuthStatus,
    /// Provider session as last fetched; `Loading` until the first answer
    pub provider: ProviderState,
}

/// Authentication context actions
pub enum AuthAction {
    /// Provider session fetched (or failed to fetch, as `None`)
    ProviderLoaded(Option<ProviderSession>),
    /// Cached identity changed; resolve the current user again
    Refresh,
    /// Cached identity dropped, by logout or by a rejected token
    SignedOut,
}

/// Authentication context
pub type AuthContext = UseReducerHandle<AuthContextData>;

impl AuthContextData {
    fn apply(status: AuthStatus, event: AuthEvent) -> AuthStatus {
        status.clone().apply(event).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Ignoring auth event");
            status
        })
    }

    /// Status after re-reading the cache against the current provider state
    fn resolve(&self) -> AuthStatus {
        if self.provider.is_loading() {
            return self.status.clone();
        }
        let cached = session_manager().load();
        match CurrentUser::resolve(self.provider.session(), cached.as_ref()) {
            Some(user) => {
                let status = if self.status.is_resolving() {
                    self.status.clone()
                } else {
                    Self::apply(self.status.clone(), AuthEvent::ResolveStarted)
                };
                Self::apply(status, AuthEvent::Resolved(user))
            }
            None => Self::apply(self.status.clone(), AuthEvent::SignedOut),
        }
    }
}

impl Reducible for AuthContextData {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::ProviderLoaded(session) => {
                let loaded = Self {
                    status: self.status.clone(),
                    provider: ProviderState::Resolved(session),
                };
                Rc::new(Self {
                    status: loaded.resolve(),
                    ..loaded
                })
            }
            AuthAction::Refresh => Rc::new(Self {
                status: self.resolve(),
                provider: self.provider.clone(),
            }),
            AuthAction::SignedOut => Rc::new(Self {
                status: Self::apply(self.status.clone(), AuthEvent::SignedOut),
                provider: ProviderState::Resolved(None),
            }),
        }
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

/// Auth provider component; must sit inside the router
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let auth_state = use_reducer(AuthContextData::default);
    let navigator = use_navigator();

    // A rejected token anywhere signs the context out and returns to login
    {
        let auth_state = auth_state.clone();
        use_effect_with((), move |_| {
            super::error_handler::set_auth_error_callback(Rc::new(move || {
                auth_state.dispatch(AuthAction::SignedOut);
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::Login);
                }
            }));

            move || {
                super::error_handler::clear_auth_error_callback();
            }
        });
    }

    // Fetch the provider session on mount
    {
        let auth_state = auth_state.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let session = match identity_service() {
                    Ok(service) => service.fetch_session().await.unwrap_or_else(|e| {
                        tracing::warn!(error = %e, "Provider session unavailable");
                        None
                    }),
                    Err(e) => {
                        tracing::error!(error = %e, "Identity client could not be built");
                        None
                    }
                };
                auth_state.dispatch(AuthAction::ProviderLoaded(session));
            });
        });
    }

    html! {
        <ContextProvider<AuthContext> context={auth_state}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> Option<AuthContext> {
    use_context::<AuthContext>()
}

/// Hook to get the resolved current user
#[hook]
pub fn use_current_user() -> Option<CurrentUser> {
    let auth = use_auth();
    auth.and_then(|auth| auth.status.current_user().cloned())
}
