//! ERC-20 access over the signing provider.

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider};

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::contracts::bindings::IERC20;
use crate::contracts::TokenApi;
use crate::observability::metrics;

/// Any ERC-20 token reachable through one provider.
#[derive(Clone)]
pub struct Erc20Tokens {
    provider: DynProvider,
}

impl Erc20Tokens {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    fn token(&self, token: Address) -> IERC20::IERC20Instance<DynProvider> {
        IERC20::new(token, self.provider.clone())
    }
}

impl TokenApi for Erc20Tokens {
    async fn native_balance(&self, owner: Address) -> BlockchainResult<U256> {
        self.provider
            .get_balance(owner)
            .await
            .map_err(|e| BlockchainError::Rpc(e.to_string()))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> BlockchainResult<U256> {
        self.token(token)
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| BlockchainError::contract("balanceOf", e))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> BlockchainResult<U256> {
        self.token(token)
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| BlockchainError::contract("allowance", e))
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> BlockchainResult<TxHash> {
        let pending = self
            .token(token)
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| BlockchainError::contract("approve", e))?;
        let tx_hash = *pending.tx_hash();

        metrics::record_transaction("approve");
        tracing::info!(tx_hash = %tx_hash, token = %token, spender = %spender, amount = %amount, "approve submitted");
        Ok(tx_hash)
    }
}
