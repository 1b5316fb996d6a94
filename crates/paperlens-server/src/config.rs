//! Environment configuration.
//!
//! Everything is read through a lookup function so tests never touch the
//! process environment.

use axum::http::HeaderValue;
use thiserror::Error;
use tracing::warn;

use paperlens_core::env::RuntimeEnv;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

pub const REQUIRED_VARS: &[&str] = &["MONGOO_DB_URL", "JWT_SECRET"];
pub const RECOMMENDED_VARS: &[&str] = &["GEMINI_API", "EMAIL_ID", "EMAIL_PASS"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: RuntimeEnv,
    pub mongo_url: Option<String>,
    pub jwt_secret: Option<String>,
    pub gemini_api_key: Option<String>,
    pub email_id: Option<String>,
    pub email_pass: Option<String>,
    pub chrome_executable: Option<String>,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("mongo_url", &self.mongo_url.as_ref().map(|_| "[redacted]"))
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[redacted]"))
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "[redacted]"))
            .field("email_id", &self.email_id)
            .field("chrome_executable", &self.chrome_executable)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .finish_non_exhaustive()
    }
}

/// Outcome of [`AppConfig::validate`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvReport {
    pub missing_required: Vec<&'static str>,
    pub missing_recommended: Vec<&'static str>,
}

impl EnvReport {
    pub fn is_ok(&self) -> bool {
        self.missing_required.is_empty()
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal in deployed environments.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().trim_end_matches('/').to_string())
                    .filter(|o| !o.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        Ok(Self {
            env: RuntimeEnv::from_node_env(var("NODE_ENV").as_deref()),
            mongo_url: var("MONGOO_DB_URL"),
            jwt_secret: var("JWT_SECRET"),
            gemini_api_key: var("GEMINI_API"),
            email_id: var("EMAIL_ID"),
            email_pass: var("EMAIL_PASS"),
            chrome_executable: var("CHROME_EXECUTABLE_PATH"),
            port,
            cors_origins,
        })
    }

    /// Report missing variables. Recommended ones are only warned about.
    pub fn validate(&self) -> EnvReport {
        let present = |name: &str| match name {
            "MONGOO_DB_URL" => self.mongo_url.is_some(),
            "JWT_SECRET" => self.jwt_secret.is_some(),
            "GEMINI_API" => self.gemini_api_key.is_some(),
            "EMAIL_ID" => self.email_id.is_some(),
            "EMAIL_PASS" => self.email_pass.is_some(),
            _ => false,
        };

        let report = EnvReport {
            missing_required: REQUIRED_VARS.iter().copied().filter(|n| !present(n)).collect(),
            missing_recommended: RECOMMENDED_VARS.iter().copied().filter(|n| !present(n)).collect(),
        };

        for name in &report.missing_recommended {
            warn!(variable = name, "optional environment variable not set");
        }

        report
    }

    /// Allowed origins as header values; unparsable entries are dropped.
    pub fn allowed_origins(&self) -> Vec<HeaderValue> {
        self.cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                // Credentialed CORS cannot use a wildcard.
                Ok(_) if origin == "*" => {
                    warn!("ignoring wildcard CORS origin");
                    None
                }
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect()
    }
}
