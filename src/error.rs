//! Top-level error type for the entry point.

use thiserror::Error;

use crate::blockchain::types::BlockchainError;
use crate::config::ConfigError;
use crate::deploy::DeployError;
use crate::explorer::ExplorerError;
use crate::subscriptions::{CreateError, PlanError};

/// Any failure that ends a script run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Chain(#[from] BlockchainError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Create(#[from] CreateError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Explorer(#[from] ExplorerError),

    #[error("invalid amount '{value}': {message}")]
    Amount { value: String, message: String },
}

/// Result type for the entry point.
pub type ScriptResult<T> = Result<T, ScriptError>;
