//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! contract-scripts.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → env overrides (BNBT_RPC_URL, ETHERSCAN_API_KEY)
//!     → validation.rs (semantic checks)
//!     → ScriptsConfig (validated, immutable)
//!     → passed by reference into each workflow
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so a missing config file still works
//! - The signer key is never part of the config; see `blockchain::wallet`
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

use alloy::primitives::Address;

pub use loader::{load_config, load_env_file, load_or_default, ConfigError};
pub use schema::{
    BlockchainConfig, ConstructorArg, ContractsConfig, DeploymentConfig, EventsConfig,
    ExplorerConfig, ScriptsConfig,
};

impl ContractsConfig {
    /// Address of the MainNFT contract.
    pub fn main_nft_address(&self) -> Result<Address, ConfigError> {
        parse_configured(&self.main_nft, "contracts.main_nft")
    }

    /// Address of the Subscriptions contract.
    pub fn subscriptions_address(&self) -> Result<Address, ConfigError> {
        parse_configured(&self.subscriptions, "contracts.subscriptions")
    }

    /// Address of the PublicDonation contract.
    pub fn public_donation_address(&self) -> Result<Address, ConfigError> {
        parse_configured(&self.public_donation, "contracts.public_donation")
    }
}

fn parse_configured(value: &str, field: &'static str) -> Result<Address, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Missing(field));
    }
    // Validation already rejected malformed non-empty addresses.
    value.parse().map_err(|_| ConfigError::Missing(field))
}
