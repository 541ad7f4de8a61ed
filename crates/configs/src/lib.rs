//! # configs
//!
//! Layered runtime configuration: built-in defaults, then an optional
//! `photo-feed.toml`, then `PHOTO_FEED__*` environment variables
//! (e.g. `PHOTO_FEED__API__BASE_URL`). A `.env` file is read first if present.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use domains::BootstrapTrigger;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "PHOTO_FEED";
pub const DEFAULT_FILE: &str = "photo-feed.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Which collaborator implementations the binary wires in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-process services seeded with demo data.
    #[default]
    Memory,
    Http,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent verbatim in the `authorization` header of every card request.
    pub token: Option<SecretString>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            token: None,
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub base_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub credential_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credential_path: PathBuf::from(".photo-feed/credential.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub bootstrap: BootstrapTrigger,
    pub reject_while_pending: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            bootstrap: BootstrapTrigger::OnMount,
            reject_while_pending: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: Backend,
    pub api: ApiConfig,
    pub identity: IdentityConfig,
    pub storage: StorageConfig,
    pub orchestrator: OrchestratorConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Reads `.env`, then `photo-feed.toml` (or `file`), then the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_sources(file, None)
    }

    /// `env` replaces the process environment when given.
    pub fn from_sources(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_else(|| Path::new(DEFAULT_FILE));
        let config: AppConfig = Config::builder()
            .add_source(File::from(file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be positive".into()));
        }
        if self.backend == Backend::Http {
            if self.api.base_url.trim().is_empty() {
                return Err(ConfigError::Invalid("api.base_url must be set".into()));
            }
            if self.identity.base_url.trim().is_empty() {
                return Err(ConfigError::Invalid("identity.base_url must be set".into()));
            }
            if self.api.token.is_none() {
                return Err(ConfigError::Invalid(
                    "api.token is required for the http backend".into(),
                ));
            }
        }
        Ok(())
    }
}
