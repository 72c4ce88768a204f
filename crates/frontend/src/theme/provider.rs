//! Preferences provider component

use super::context::{PreferencesContext, update_document_cursor, update_document_theme};
use crate::storage::session_manager;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct PreferencesProviderProps {
    pub children: Children,
}

#[function_component(PreferencesProvider)]
pub fn preferences_provider(props: &PreferencesProviderProps) -> Html {
    let preferences = use_reducer(|| {
        let preferences = session_manager().preferences();
        update_document_theme(preferences.theme);
        update_document_cursor(preferences.custom_cursor_enabled);
        PreferencesContext { preferences }
    });

    html! {
        <ContextProvider<UseReducerHandle<PreferencesContext>> context={preferences}>
            { props.children.clone() }
        </ContextProvider<UseReducerHandle<PreferencesContext>>>
    }
}

#[hook]
pub fn use_preferences() -> Option<UseReducerHandle<PreferencesContext>> {
    use_context::<UseReducerHandle<PreferencesContext>>()
}
