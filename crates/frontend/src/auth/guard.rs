//! Authentication guard for protected routes
//!
//! [`WithAuth`] wraps a page component and hands it the resolved
//! [`CurrentUser`]. A cached token is checked and a provider session is
//! mapped to its backend user before the page renders.

use super::context::{AuthAction, use_auth};
use crate::client::auth_backend;
use crate::components::LoadingSpinner;
use crate::config::app_config;
use crate::navigation::{PageNavigator, RouterNavigator};
use crate::routes::Route;
use crate::storage::session_manager;
use taskdesk_core::{AuthGuard, CurrentUser, GuardDecision, ProviderState, Reconciler, Redirect};
use tokio_util::sync::CancellationToken;
use yew::prelude::*;
use yew_router::prelude::*;

/// Props every guarded page receives
#[derive(Properties, Clone, PartialEq)]
pub struct PageProps {
    pub user: CurrentUser,
}

#[derive(Properties, Clone, PartialEq)]
pub struct WithAuthProps {
    /// Only admins may see the page; others are sent home
    #[prop_or_default]
    pub admin_only: bool,
    /// The page maps the provider session to a backend user itself
    #[prop_or_default]
    pub skip_reconcile: bool,
}

/// Run the async half of a pending decision
async fn settle(
    pending: GuardDecision,
    reconciler: &Reconciler,
    cancel: &CancellationToken,
    navigator: Option<yew_router::navigator::Navigator>,
) -> GuardDecision {
    let backend = match auth_backend() {
        Ok(backend) => backend,
        Err(e) => {
            tracing::error!(error = %e, "Backend client could not be built");
            return GuardDecision::Redirect(Redirect::Login);
        }
    };
    let manager = session_manager();

    match pending {
        GuardDecision::Validate { token, user } => {
            AuthGuard::validate(&backend, &manager, &token, user).await
        }
        GuardDecision::Reconcile { session, .. } => match navigator {
            Some(navigator) => {
                let navigator = RouterNavigator::new(navigator);
                AuthGuard::reconcile(reconciler, &backend, &manager, &navigator, &session, cancel)
                    .await
            }
            None => {
                let navigator = PageNavigator;
                AuthGuard::reconcile(reconciler, &backend, &manager, &navigator, &session, cancel)
                    .await
            }
        },
        other => other,
    }
}

/// Outcome of the guard for this render, including the async steps
#[hook]
fn use_guard_decision(admin_only: bool, skip_reconcile: bool) -> GuardDecision {
    let auth = use_auth();
    let navigator = use_navigator();
    let settled = use_state(|| None::<GuardDecision>);
    let reconciler = use_memo((), |_| Reconciler::new());
    let cancel = use_memo((), |_| CancellationToken::new());

    {
        let cancel = cancel.clone();
        use_effect_with((), move |_| move || cancel.cancel());
    }

    let provider = auth
        .as_ref()
        .map_or(ProviderState::Loading, |auth| auth.provider.clone());
    let guard = AuthGuard::new(app_config().auth.validate_cached_token);
    let cached = session_manager().load();
    let mut decision = if admin_only {
        guard.evaluate_admin(&provider, cached.as_ref())
    } else {
        guard.evaluate(&provider, cached.as_ref())
    };
    if skip_reconcile {
        decision = decision.skip_reconcile();
    }

    // Each pending step runs once; its outcome replaces the pending decision
    let pending = matches!(
        decision,
        GuardDecision::Validate { .. } | GuardDecision::Reconcile { .. }
    )
    .then(|| decision.clone());
    {
        let settled = settled.clone();
        use_effect_with(pending.clone(), move |pending| {
            let Some(pending) = pending.clone() else {
                return;
            };
            settled.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = settle(pending, &reconciler, &cancel, navigator).await;
                if let Some(auth) = &auth {
                    match &outcome {
                        GuardDecision::Redirect(Redirect::Login) => {
                            auth.dispatch(AuthAction::SignedOut);
                        }
                        GuardDecision::Render(_) => auth.dispatch(AuthAction::Refresh),
                        _ => {}
                    }
                }
                settled.set(Some(outcome));
            });
        });
    }

    if pending.is_some() {
        decision = match (*settled).clone() {
            Some(outcome) if admin_only => outcome.require_admin(),
            Some(outcome) => outcome,
            None => GuardDecision::Loading,
        };
    }
    decision
}

/// Issue the redirect of a decision after render
#[hook]
fn use_guard_redirect(decision: &GuardDecision) {
    let navigator = use_navigator();
    let target = match decision {
        GuardDecision::Redirect(to) => Some(*to),
        _ => None,
    };
    use_effect_with(target, move |target| {
        if let (Some(to), Some(navigator)) = (target, navigator) {
            navigator.replace(&Route::from(*to));
        }
    });
}

/// Wrap page `P`; it renders only once the user is known
#[function_component(WithAuth)]
pub fn with_auth<P>(props: &WithAuthProps) -> Html
where
    P: BaseComponent<Properties = PageProps>,
{
    let decision = use_guard_decision(props.admin_only, props.skip_reconcile);
    use_guard_redirect(&decision);

    match decision {
        GuardDecision::Render(user) => html! { <P user={user} /> },
        GuardDecision::Redirect(_) => Html::default(),
        GuardDecision::Failed(message) => html! {
            <div class="min-h-[60vh] flex items-center justify-center">
                <p class="text-red-600 dark:text-red-400">{message}</p>
            </div>
        },
        GuardDecision::Loading
        | GuardDecision::Validate { .. }
        | GuardDecision::Reconcile { .. } => {
            html! { <LoadingSpinner text="Checking authentication..." full_page=true /> }
        }
    }
}
