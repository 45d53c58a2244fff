//! Configuration schema definitions.
//!
//! Every value the scripts used to hardcode (contract addresses, scan windows,
//! confirmation counts, constructor arguments) lives here. All types derive
//! Serde traits for deserialization from the TOML config file.

use serde::{Deserialize, Serialize};

/// Root configuration for the contract scripts.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScriptsConfig {
    /// Chain connection settings.
    pub chain: BlockchainConfig,

    /// Addresses of the already-deployed contracts.
    pub contracts: ContractsConfig,

    /// Historical event scan settings.
    pub events: EventsConfig,

    /// Block explorer API settings.
    pub explorer: ExplorerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Contracts this workspace knows how to deploy.
    pub deployments: Vec<DeploymentConfig>,
}

/// Chain connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL. Overridden by `BNBT_RPC_URL`.
    pub rpc_url: String,

    /// Read-only failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Chain ID (97 for BNB smart chain testnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Confirmations to wait for after each interaction transaction.
    pub confirmation_blocks: u64,

    /// Receipt polling interval while waiting for confirmations.
    pub confirmation_poll_ms: u64,

    /// Upper bound on a confirmation wait. `None` waits indefinitely.
    pub confirmation_timeout_secs: Option<u64>,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 97,
            rpc_timeout_secs: 10,
            confirmation_blocks: 2,
            confirmation_poll_ms: 2000,
            confirmation_timeout_secs: None,
        }
    }
}

/// Deployed contract addresses. Empty strings mean "not configured".
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    pub main_nft: String,
    pub subscriptions: String,
    pub public_donation: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            main_nft: "0x66e8cf86Ae35A96e4B67021689B4fCf47C3267c5".to_string(),
            subscriptions: String::new(),
            public_donation: String::new(),
        }
    }
}

/// Lookback windows (in blocks) for the event reconciler.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Window for `NewSubscription` (payment) events.
    pub new_subscription_window: u64,

    /// Window for `NewOneTimeSubscriptionCreated` events.
    pub one_time_created_window: u64,

    /// Window for `NewRegularSubscriptionCreated` events.
    pub regular_created_window: u64,

    /// How many of the most recent matches get a resolved timestamp line.
    pub tail: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            new_subscription_window: 100_000,
            one_time_created_window: 50_000,
            regular_created_window: 50_000,
            tail: 10,
        }
    }
}

/// Etherscan-compatible explorer API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Base API URL.
    pub api_url: String,

    /// API key. Overridden by `ETHERSCAN_API_KEY`; never written back to disk.
    #[serde(skip_serializing)]
    pub api_key: String,

    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.etherscan.io/api".to_string(),
            api_key: String::new(),
            timeout_secs: 15,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "contract_scripts=info".to_string(),
        }
    }
}

/// A precompiled contract together with its fixed constructor arguments.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeploymentConfig {
    /// Name used on the command line (e.g. "Subscriptions").
    pub name: String,

    /// Path to the hardhat artifact JSON holding the creation bytecode.
    pub artifact: String,

    /// Constructor arguments in declaration order.
    #[serde(default)]
    pub constructor_args: Vec<ConstructorArg>,

    /// Confirmations to wait for before reporting the address.
    #[serde(default = "default_deploy_confirmations")]
    pub confirmations: u64,
}

fn default_deploy_confirmations() -> u64 {
    6
}

/// One constructor argument, given as a Solidity type and its string form.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConstructorArg {
    /// Solidity type, e.g. `address`, `uint24[]`, `string`.
    #[serde(rename = "type")]
    pub ty: String,

    /// Value as accepted by the ABI coercion rules, e.g. `[100, 500]`.
    pub value: String,
}

impl ScriptsConfig {
    /// Find a deployment by name, case-insensitively.
    pub fn deployment(&self, name: &str) -> Option<&DeploymentConfig> {
        self.deployments
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }
}
