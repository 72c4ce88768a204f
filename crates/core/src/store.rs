//! Key/value storage behind the local session cache
//!
//! The browser keeps the cached identity in `localStorage` as plain strings.
//! [`SessionStore`] abstracts that so the session manager can run against
//! web storage in the frontend and against [`MemoryStore`] in tests.

use crate::error::CoreResult;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, PoisonError, RwLock};

/// Storage keys shared with the rest of the application
pub mod keys {
    /// Backend bearer token
    pub const TOKEN: &str = "token";
    /// Backend user id, decimal string
    pub const USER_ID: &str = "user_id";
    /// Admin flag, `"true"` or `"false"`
    pub const IS_ADMIN: &str = "is_admin";
    /// Email (or username) the identity was issued for
    pub const EMAIL: &str = "email";
    /// Colour theme, `"dark"` or `"light"`
    pub const THEME: &str = "theme";
    /// Custom cursor toggle, `"true"` or `"false"`
    pub const CUSTOM_CURSOR: &str = "customCursorEnabled";

    /// Keys owned by the cached identity; cleared together on logout
    pub const IDENTITY: [&str; 4] = [TOKEN, USER_ID, IS_ADMIN, EMAIL];
}

/// String key/value store holding the cached identity and preferences
pub trait SessionStore {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> CoreResult<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        (**self).remove(key)
    }
}

/// In-memory store, used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Copy of all entries
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the store holds no keys at all
    pub fn is_empty(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get(keys::TOKEN).is_none());

        store.set(keys::TOKEN, "abc").unwrap();
        assert_eq!(store.get(keys::TOKEN).as_deref(), Some("abc"));

        store.set(keys::TOKEN, "def").unwrap();
        assert_eq!(store.get(keys::TOKEN).as_deref(), Some("def"));

        store.remove(keys::TOKEN).unwrap();
        assert!(store.get(keys::TOKEN).is_none());
        assert!(store.is_empty());

        // Removing twice is fine
        store.remove(keys::TOKEN).unwrap();
    }

    #[test]
    fn test_shared_store_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let handle = Arc::clone(&store);
        handle.set(keys::THEME, "dark").unwrap();
        assert_eq!(store.get(keys::THEME).as_deref(), Some("dark"));
    }
}
