//! Configuration for the CodeBattle API
//!
//! Settings are loaded in layers:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file (default: `config/codebattle.toml`,
//!    overridable via `CODEBATTLE_CONFIG`)
//! 3. Environment variables (highest priority), pattern
//!    `CODEBATTLE__<section>__<key>`, e.g. `CODEBATTLE__SERVER__BIND_ADDR=0.0.0.0:9000`

mod models;
mod sources;

pub use models::{ApiLimits, Config, PrincipalConfig, ServerConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("principal.username must not be empty")]
    EmptyPrincipalUsername,
}

impl Config {
    /// Load configuration from all sources (file + environment)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.principal.username.trim().is_empty() {
        return Err(ConfigError::EmptyPrincipalUsername);
    }
    Ok(())
}
