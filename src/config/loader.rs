//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ScriptsConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Config file read when no explicit path is given.
pub const DEFAULT_CONFIG_PATH: &str = "contract-scripts.toml";

/// Environment variable overriding `chain.rpc_url`.
pub const RPC_URL_ENV_VAR: &str = "BNBT_RPC_URL";

/// Environment variable supplying `explorer.api_key`.
pub const EXPLORER_API_KEY_ENV_VAR: &str = "ETHERSCAN_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("Invalid env file: {0}")]
    EnvFile(#[source] dotenvy::Error),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a `.env` file into the process environment.
///
/// `None` searches the current directory and its parents. Returns `Ok(false)`
/// when no file exists; a file that exists but cannot be parsed is an error.
pub fn load_env_file(path: Option<&Path>) -> Result<bool, ConfigError> {
    let result = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(ConfigError::EnvFile(e)),
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ScriptsConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut config: ScriptsConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the given file, or fall back to [`DEFAULT_CONFIG_PATH`] and then to
/// built-in defaults when no file is present.
pub fn load_or_default(path: Option<&Path>) -> Result<ScriptsConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return load_config(default_path);
    }

    tracing::debug!("No config file found, using defaults");
    let mut config = ScriptsConfig::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides. `lookup` returns the value of a variable.
pub fn apply_env_overrides<F>(config: &mut ScriptsConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(RPC_URL_ENV_VAR).filter(|v| !v.is_empty()) {
        config.chain.rpc_url = url;
    }
    if let Some(key) = lookup(EXPLORER_API_KEY_ENV_VAR).filter(|v| !v.is_empty()) {
        config.explorer.api_key = key;
    }
}
