//! Browser `localStorage` as the session cache backend

use taskdesk_core::{CoreError, CoreResult, SessionManager, SessionStore};
use web_sys::Storage;

/// `window.localStorage`; reads see nothing when storage is unavailable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebStorage;

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

impl SessionStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let storage =
            local_storage().ok_or_else(|| CoreError::storage("localStorage unavailable"))?;
        storage
            .set_item(key, value)
            .map_err(|e| CoreError::storage(format!("failed to write {key}: {e:?}")))
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let storage =
            local_storage().ok_or_else(|| CoreError::storage("localStorage unavailable"))?;
        storage
            .remove_item(key)
            .map_err(|e| CoreError::storage(format!("failed to remove {key}: {e:?}")))
    }
}

/// Session manager over the browser cache
pub fn session_manager() -> SessionManager<WebStorage> {
    SessionManager::new(WebStorage)
}
