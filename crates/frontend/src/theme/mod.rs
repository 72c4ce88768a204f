mod context;
mod provider;

pub use context::{PreferencesAction, PreferencesContext};
pub use provider::{PreferencesProvider, use_preferences};
