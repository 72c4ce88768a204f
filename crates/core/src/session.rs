//! Session manager: the single writer of the local session cache

use crate::error::CoreResult;
use crate::identity::CachedIdentity;
use crate::navigation::{Navigator, Redirect};
use crate::prefs::{Preferences, Theme};
use crate::store::{SessionStore, keys};

/// Owns every read and write of the cached identity and preferences
#[derive(Debug, Clone, Default)]
pub struct SessionManager<S> {
    store: S,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the cached identity; an absent or empty token means none
    pub fn load(&self) -> Option<CachedIdentity> {
        let token = self.store.get(keys::TOKEN).filter(|t| !t.is_empty())?;
        Some(CachedIdentity {
            token,
            user_id: self.store.get(keys::USER_ID).filter(|id| !id.is_empty()),
            is_admin: self.store.get(keys::IS_ADMIN).as_deref() == Some("true"),
            email: self.store.get(keys::EMAIL).filter(|email| !email.is_empty()),
        })
    }

    /// Cached bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.store.get(keys::TOKEN).filter(|t| !t.is_empty())
    }

    /// Cached backend user id, if any
    pub fn user_id(&self) -> Option<String> {
        self.store.get(keys::USER_ID).filter(|id| !id.is_empty())
    }

    /// Overwrite the cached identity as a whole
    ///
    /// Optional fields that are `None` are removed so nothing from a previous
    /// identity survives the write.
    pub fn save(&self, identity: &CachedIdentity) -> CoreResult<()> {
        self.store.set(keys::TOKEN, &identity.token)?;
        match &identity.user_id {
            Some(user_id) => self.store.set(keys::USER_ID, user_id)?,
            None => self.store.remove(keys::USER_ID)?,
        }
        self.store.set(
            keys::IS_ADMIN,
            if identity.is_admin { "true" } else { "false" },
        )?;
        match &identity.email {
            Some(email) => self.store.set(keys::EMAIL, email)?,
            None => self.store.remove(keys::EMAIL)?,
        }
        tracing::debug!(has_user_id = identity.user_id.is_some(), "Cached identity saved");
        Ok(())
    }

    /// Remove the cached identity, keeping preferences
    pub fn clear(&self) -> CoreResult<()> {
        for key in keys::IDENTITY {
            self.store.remove(key)?;
        }
        tracing::debug!("Cached identity cleared");
        Ok(())
    }

    /// Clear the identity and send the browser to the login page
    pub fn logout<N: Navigator + ?Sized>(&self, navigator: &N) -> CoreResult<()> {
        self.clear()?;
        tracing::info!("Logged out");
        navigator.navigate(Redirect::Login);
        Ok(())
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            theme: Theme::from_stored(self.store.get(keys::THEME).as_deref()),
            custom_cursor_enabled: self.store.get(keys::CUSTOM_CURSOR).as_deref() == Some("true"),
        }
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> CoreResult<()> {
        self.store.set(keys::THEME, preferences.theme.as_str())?;
        self.store.set(
            keys::CUSTOM_CURSOR,
            if preferences.custom_cursor_enabled {
                "true"
            } else {
                "false"
            },
        )
    }
}
