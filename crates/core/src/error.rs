//! Errors of the session layer itself
//!
//! Backend failures are [`BackendError`](crate::backend::BackendError); this
//! type covers what goes wrong locally.

pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Browser storage missing or refusing writes
    #[error("Session storage failed: {message}")]
    Storage { message: String },

    #[error("Invalid auth transition: {event} while {state}")]
    InvalidTransition { state: String, event: String },
}

impl CoreError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn invalid_transition(state: impl Into<String>, event: impl Into<String>) -> Self {
        Self::InvalidTransition {
            state: state.into(),
            event: event.into(),
        }
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::invalid_config(err.to_string())
    }
}
