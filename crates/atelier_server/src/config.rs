use atelier_core::constants::{ADMINISTRATOR, SESSION_COOKIE};
use std::env;

#[derive(Clone, Debug)]
pub struct AtelierServerConfig {
    /// Enforce prefab ownership.
    ///
    /// Defaults to `false`.
    pub authority_enabled: bool,
    /// Display name of the account that also sees shared prefabs.
    ///
    /// Defaults to `Administrator`.
    pub administrator_name: String,
    /// Name of the session cookie.
    ///
    /// Defaults to `UserID`.
    pub session_cookie: String,
}

impl Default for AtelierServerConfig {
    fn default() -> Self {
        Self {
            authority_enabled: false,
            administrator_name: ADMINISTRATOR.to_string(),
            session_cookie: SESSION_COOKIE.to_string(),
        }
    }
}

impl AtelierServerConfig {
    /// Reads `AUTHORITY_ENABLED`, `ADMINISTRATOR_NAME` and `SESSION_COOKIE`,
    /// falling back to [`Default`] for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            authority_enabled: env::var("AUTHORITY_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.authority_enabled),
            administrator_name: env::var("ADMINISTRATOR_NAME")
                .unwrap_or(defaults.administrator_name),
            session_cookie: env::var("SESSION_COOKIE").unwrap_or(defaults.session_cookie),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
