//! Blockchain RPC client with timeout and failover handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint (primary signs when a wallet is given)
//! - Query chain state (block number, block timestamps, logs, receipts)
//! - Handle timeouts and fail over to read-only providers
//! - Submit raw transaction requests (contract creation)

use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{Filter, Log, TransactionReceipt, TransactionRequest};
use alloy::transports::TransportResult;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
use crate::blockchain::wallet::Wallet;
use crate::observability::metrics;

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers). Only the primary signs.
    providers: Vec<DynProvider>,
    /// Address of the signer attached to the primary provider.
    signer: Option<Address>,
    config: BlockchainConfig,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a read-only client.
    pub async fn new(config: BlockchainConfig) -> BlockchainResult<Self> {
        Self::build(config, None).await
    }

    /// Create a client whose primary provider signs with `wallet`.
    pub async fn with_wallet(config: BlockchainConfig, wallet: &Wallet) -> BlockchainResult<Self> {
        Self::build(config, Some(wallet)).await
    }

    async fn build(config: BlockchainConfig, wallet: Option<&Wallet>) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let primary = match wallet {
            Some(wallet) => ProviderBuilder::new()
                .wallet(wallet.ethereum_wallet())
                .connect_http(primary_url)
                .erased(),
            None => ProviderBuilder::new().connect_http(primary_url).erased(),
        };
        providers.push(primary);

        for url_str in &config.failover_urls {
            match url_str.parse::<url::Url>() {
                Ok(url) => providers.push(ProviderBuilder::new().connect_http(url).erased()),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        let client = Self {
            providers,
            signer: wallet.map(Wallet::address),
            config: config.clone(),
            timeout_duration,
        };

        // Don't fail initialization on a mismatch; the first real call will surface it.
        match client.verify_chain_id().await {
            Ok(()) => tracing::info!(
                rpc_url = %config.rpc_url,
                chain_id = config.chain_id,
                "Blockchain client initialized"
            ),
            Err(e) => tracing::warn!(
                error = %e,
                "Blockchain client initialized but chain verification failed"
            ),
        }

        Ok(client)
    }

    /// Run a read against each provider in turn until one answers.
    async fn with_failover<T, F, Fut>(&self, operation: &'static str, call: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        let mut all_timed_out = true;
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, call(provider.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    all_timed_out = false;
                    tracing::warn!(provider_idx = i, operation, error = %e, "RPC error");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, operation, "RPC timeout");
                }
            }
            if i + 1 < self.providers.len() {
                metrics::record_rpc_failover(operation);
            }
        }
        if all_timed_out {
            return Err(BlockchainError::Timeout(self.config.rpc_timeout_secs));
        }
        Err(BlockchainError::Rpc(format!("All providers failed to {}", operation)))
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_failover("get chain id", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.with_failover("get block number", |p| async move { p.get_block_number().await })
            .await
    }

    /// Get a block's timestamp in seconds since the epoch.
    pub async fn get_block_timestamp(&self, block_number: u64) -> BlockchainResult<u64> {
        let block = self
            .with_failover("get block", |p| async move {
                p.get_block_by_number(BlockNumberOrTag::Number(block_number)).await
            })
            .await?
            .ok_or_else(|| BlockchainError::NotAvailable(format!("block {}", block_number)))?;
        Ok(block.header.timestamp)
    }

    /// Fetch logs matching a filter.
    pub async fn get_logs(&self, filter: &Filter) -> BlockchainResult<Vec<Log>> {
        self.with_failover("get logs", |p| {
            let filter = filter.clone();
            async move { p.get_logs(&filter).await }
        })
        .await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        self.with_failover("get receipt", |p| async move {
            p.get_transaction_receipt(tx_hash).await
        })
        .await
    }

    /// Sign and broadcast a transaction through the primary provider.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        if self.signer.is_none() {
            return Err(BlockchainError::Wallet("client has no signer".to_string()));
        }
        let pending = self
            .provider()
            .send_transaction(tx)
            .await
            .map_err(|e| BlockchainError::Rpc(e.to_string()))?;
        Ok(*pending.tx_hash())
    }

    /// The primary provider, used for contract bindings.
    pub fn provider(&self) -> &DynProvider {
        &self.providers[0]
    }

    /// Address of the attached signer, if any.
    pub fn signer_address(&self) -> Option<Address> {
        self.signer
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }

    /// Get the number of confirmation blocks required.
    pub fn confirmation_blocks(&self) -> u64 {
        self.config.confirmation_blocks
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("providers", &self.providers.len())
            .field("signer", &self.signer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::metrics::{
        Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    struct Failovers(Arc<AtomicU64>);

    impl CounterFn for Failovers {
        fn increment(&self, value: u64) {
            self.0.fetch_add(value, Ordering::SeqCst);
        }

        fn absolute(&self, value: u64) {
            self.0.store(value, Ordering::SeqCst);
        }
    }

    /// Counts `scripts_rpc_failover_total` and drops everything else.
    #[derive(Default)]
    struct FailoverRecorder {
        failovers: Arc<AtomicU64>,
    }

    impl Recorder for FailoverRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            if key.name() == "scripts_rpc_failover_total" {
                Counter::from_arc(Arc::new(Failovers(self.failovers.clone())))
            } else {
                Counter::noop()
            }
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    fn test_config() -> BlockchainConfig {
        BlockchainConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            chain_id: 31337,
            rpc_timeout_secs: 1,
            ..BlockchainConfig::default()
        }
    }

    #[tokio::test]
    async fn test_client_creation_unreachable() {
        // Creation succeeds even when the node is unreachable.
        let result = BlockchainClient::new(test_config()).await;
        assert!(result.is_ok());
        assert!(result.unwrap().signer_address().is_none());
    }

    #[tokio::test]
    async fn test_invalid_rpc_url() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let err = BlockchainClient::new(config).await.unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_rpc_failover() {
        let mut config = test_config();
        config.failover_urls.push("http://127.0.0.1:2".to_string());
        config.failover_urls.push("::bad::".to_string());

        let client = BlockchainClient::new(config).await.unwrap();
        assert_eq!(client.providers.len(), 2);

        let result = client.get_block_number().await;
        assert!(result.unwrap_err().to_string().contains("All providers failed"));
    }

    #[test]
    fn test_failover_counted_only_when_a_provider_remains() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let mut config = test_config();
        config.failover_urls.push("http://127.0.0.1:2".to_string());
        let client = runtime.block_on(BlockchainClient::new(config)).unwrap();

        let recorder = FailoverRecorder::default();
        let result = ::metrics::with_local_recorder(&recorder, || {
            runtime.block_on(client.get_block_number())
        });

        assert!(result.is_err());
        assert_eq!(recorder.failovers.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_send_requires_signer() {
        let client = BlockchainClient::new(test_config()).await.unwrap();
        let err = client
            .send_transaction(TransactionRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BlockchainError::Wallet(_)));
    }
}
