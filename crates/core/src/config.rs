//! Client configuration

use crate::error::CoreResult;
use crate::navigation::Redirect;
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `TASKDESK_API__BASE_URL`
pub const ENV_PREFIX: &str = "TASKDESK";

/// Main client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Task backend
    pub api: ApiConfig,

    /// External identity provider integration
    pub identity: IdentityConfig,

    /// Auth flow behaviour
    pub auth: AuthSettings,
}

/// Task backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend API
    pub base_url: String,

    /// Request timeout in seconds (ignored in the browser)
    pub timeout_secs: u64,
}

/// Identity provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Origin serving `/api/auth/*`; empty means same origin
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Check cached tokens with `GET /protected-route` before rendering
    pub validate_cached_token: bool,

    /// Where a successful credential login lands
    pub landing_route: Redirect,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            validate_cached_token: true,
            landing_route: Redirect::Stamp,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML document layered with environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the document or an environment value cannot be parsed
    pub fn from_toml_str(toml: &str) -> CoreResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .add_source(environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration with defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed
    pub fn from_env() -> CoreResult<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("identity.base_url", defaults.identity.base_url)?
            .set_default("auth.validate_cached_token", defaults.auth.validate_cached_token)?
            .set_default("auth.landing_route", "stamp")?
            .add_source(environment())
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Backend URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// Identity provider origin without a trailing slash
    pub fn identity_base(&self) -> &str {
        self.identity.base_url.trim_end_matches('/')
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
