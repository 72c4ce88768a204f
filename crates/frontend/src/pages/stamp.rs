//! Post-login landing: reconcile the provider session, stamp the login

use crate::auth::{AuthAction, PageProps, use_auth};
use crate::client::auth_backend;
use crate::navigation::RouterNavigator;
use crate::storage::session_manager;
use taskdesk_core::{BootstrapOutcome, ProviderState, Reconciler};
use tokio_util::sync::CancellationToken;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(StampPage)]
pub fn stamp_page(_props: &PageProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let error = use_state(|| None::<String>);
    let reconciler = use_memo((), |_| Reconciler::new());
    let cancel = use_memo((), |_| CancellationToken::new());

    // Results arriving after unmount are dropped
    {
        let cancel = cancel.clone();
        use_effect_with((), move |_| move || cancel.cancel());
    }

    let provider = auth
        .as_ref()
        .map_or(ProviderState::Loading, |auth| auth.provider.clone());
    {
        let error = error.clone();
        use_effect_with(provider, move |provider| {
            let Some(navigator) = navigator else {
                return;
            };
            if provider.is_loading() {
                return;
            }
            let session = provider.session().cloned();
            wasm_bindgen_futures::spawn_local(async move {
                let backend = match auth_backend() {
                    Ok(backend) => backend,
                    Err(e) => {
                        tracing::error!(error = %e, "Backend client could not be built");
                        return;
                    }
                };
                let outcome = reconciler
                    .bootstrap(
                        &backend,
                        &session_manager(),
                        &RouterNavigator::new(navigator),
                        session.as_ref(),
                        &cancel,
                    )
                    .await;
                match outcome {
                    BootstrapOutcome::Completed => {
                        if let Some(auth) = &auth {
                            auth.dispatch(AuthAction::Refresh);
                        }
                    }
                    BootstrapOutcome::Failed(message) => error.set(Some(message)),
                    BootstrapOutcome::NeedsRegistration
                    | BootstrapOutcome::AlreadyHandled
                    | BootstrapOutcome::Cancelled
                    | BootstrapOutcome::Idle => {}
                }
            });
        });
    }

    html! {
        <div class="min-h-screen flex flex-col items-center justify-center">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">{"Logging in..."}</h1>
            if let Some(message) = &*error {
                <p class="mt-2 text-red-600 dark:text-red-400">{message}</p>
            }
        </div>
    }
}
