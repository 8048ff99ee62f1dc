use std::env;

use crate::navigation::DEFAULT_MAX_REDIRECTS;

/// Storage key the session token is kept under.
pub const DEFAULT_TOKEN_KEY: &str = "report_token";

/// AppConfig
///
/// Holds the console's configuration. Immutable once loaded and pulled into the
/// application state via FromRef.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and which variables are mandatory.
    pub env: Env,
    // Address the shell server listens on.
    pub bind_addr: String,
    // Base URL of the backend API the pages load data from.
    pub api_base_url: String,
    // Storage key (cookie name in the served shell) holding the session token.
    pub token_key: String,
    // Longest redirect chain a single navigation may follow.
    pub max_redirects: usize,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),

    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration for test state setup, independent of the environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:3000".to_string(),
            api_base_url: "http://localhost:8000/api".to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables. Local mode falls back to
    /// development defaults; production refuses to start without an explicit API URL.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let api_base_url = match (&env, env::var("API_BASE_URL")) {
            (_, Ok(url)) => url,
            (Env::Production, Err(_)) => return Err(ConfigError::Missing("API_BASE_URL")),
            (Env::Local, Err(_)) => "http://localhost:8000/api".to_string(),
        };

        let max_redirects = match env::var("MAX_REDIRECTS") {
            Ok(value) => value
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "MAX_REDIRECTS",
                    value,
                })?,
            Err(_) => DEFAULT_MAX_REDIRECTS,
        };

        Ok(Self {
            env,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            api_base_url,
            token_key: env::var("TOKEN_STORAGE_KEY")
                .unwrap_or_else(|_| DEFAULT_TOKEN_KEY.to_string()),
            max_redirects,
        })
    }
}
