//! Preferences context definition

use crate::storage::session_manager;
use std::rc::Rc;
use taskdesk_core::{Preferences, Theme};
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct PreferencesContext {
    pub preferences: Preferences,
}

pub enum PreferencesAction {
    ToggleTheme,
    ToggleCursor,
}

impl Reducible for PreferencesContext {
    type Action = PreferencesAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let preferences = match action {
            PreferencesAction::ToggleTheme => self.preferences.toggle_theme(),
            PreferencesAction::ToggleCursor => self.preferences.toggle_cursor(),
        };

        if let Err(e) = session_manager().save_preferences(&preferences) {
            tracing::warn!(error = %e, "Failed to persist preferences");
        }
        update_document_theme(preferences.theme);
        update_document_cursor(preferences.custom_cursor_enabled);

        Rc::new(Self { preferences })
    }
}

fn toggle_root_class(class: &str, enabled: bool) {
    if let Some(window) = web_sys::window()
        && let Some(document) = window.document()
        && let Some(element) = document.document_element()
        && let Ok(html_element) = element.dyn_into::<web_sys::HtmlElement>()
    {
        let class_list = html_element.class_list();
        let result = if enabled {
            class_list.add_1(class)
        } else {
            class_list.remove_1(class)
        };
        if let Err(e) = result {
            tracing::warn!(error = ?e, class, enabled, "Failed to update root class");
        }
    }
}

pub fn update_document_theme(theme: Theme) {
    toggle_root_class("dark", theme == Theme::Dark);
}

/// `custom-cursor` on the root element switches the stylesheet cursor
pub fn update_document_cursor(enabled: bool) {
    toggle_root_class("custom-cursor", enabled);
}
