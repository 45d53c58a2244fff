//! Deployment of precompiled contracts with fixed constructor arguments.
//!
//! Compilation and explorer source verification happen elsewhere; this module
//! consumes hardhat artifacts and reports the encoded constructor arguments a
//! verifier needs.

pub mod artifact;
pub mod deployer;

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::blockchain::types::BlockchainError;

pub use artifact::{deploy_code, encode_constructor_args, Artifact};
pub use deployer::{deploy, DeployReport};

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid artifact: {0}")]
    Artifact(#[from] serde_json::Error),

    #[error("invalid bytecode: {0}")]
    Bytecode(String),

    #[error("constructor argument {index} ({ty}): {message}")]
    Argument {
        index: usize,
        ty: String,
        message: String,
    },

    #[error("no deployment named '{0}' in the config")]
    UnknownDeployment(String),

    #[error("receipt of {0} carries no contract address")]
    MissingContractAddress(TxHash),

    #[error(transparent)]
    Chain(#[from] BlockchainError),
}
