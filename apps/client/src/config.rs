use std::env;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} is required")]
    Missing(&'static str),

    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Where the hosted backend lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://<ref>.supabase.co`
    pub url: String,
    /// Public anon key sent as `apikey` on every request
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: BackendConfig,
    /// Start signed in with this access token
    pub access_token: Option<String>,
    /// Enables signature checks on access tokens
    pub jwt_secret: Option<String>,
    /// Initial `tab` navigation parameter
    pub initial_tab: Option<String>,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let url = optional("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                key: "SUPABASE_URL",
                reason: format!("expected an http(s) URL, got {}", url),
            });
        }
        let anon_key = optional("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        let config = Self {
            backend: BackendConfig { url, anon_key },
            access_token: optional("SUPABASE_ACCESS_TOKEN"),
            jwt_secret: optional("SUPABASE_JWT_SECRET"),
            initial_tab: optional("CALLSIGHT_TAB"),
        };

        info!(
            url = %config.backend.url,
            signed_in = config.access_token.is_some(),
            verify_tokens = config.jwt_secret.is_some(),
            "configuration loaded"
        );
        Ok(config)
    }
}
