//! Frontend configuration

use once_cell::sync::Lazy;
use taskdesk_core::AppConfig;

/// Identity provider endpoints
pub struct AuthConfig;

impl AuthConfig {
    /// Current provider session, `{}` when signed out
    pub const SESSION_PATH: &'static str = "/api/auth/session";

    pub const CSRF_PATH: &'static str = "/api/auth/csrf";

    pub const SIGNOUT_PATH: &'static str = "/api/auth/signout";

    /// Prefix of provider sign-in redirects, followed by the provider id
    pub const SIGNIN_PATH: &'static str = "/api/auth/signin";
}

/// TOML embedded at build time through `TASKDESK_CONFIG`
const EMBEDDED_CONFIG: Option<&str> = option_env!("TASKDESK_CONFIG");

static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let Some(toml) = EMBEDDED_CONFIG else {
        return AppConfig::default();
    };
    AppConfig::from_toml_str(toml).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Embedded configuration rejected, using defaults");
        AppConfig::default()
    })
});

pub fn app_config() -> &'static AppConfig {
    &CONFIG
}

/// Origin of the page, used when a base URL is left empty
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Identity provider origin, defaulting to the page origin
pub fn identity_base_url() -> String {
    let configured = app_config().identity_base();
    if configured.is_empty() {
        page_origin()
    } else {
        configured.to_string()
    }
}
