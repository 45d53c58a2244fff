//! MainNFT contract access over the signing provider.

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::DynProvider;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::contracts::bindings::MainNFT;
use crate::contracts::MainNftApi;
use crate::observability::metrics;

#[derive(Clone)]
pub struct MainNftContract {
    instance: MainNFT::MainNFTInstance<DynProvider>,
}

impl MainNftContract {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            instance: MainNFT::new(address, provider),
        }
    }
}

impl MainNftApi for MainNftContract {
    async fn price_to_mint(&self, minter: Address) -> BlockchainResult<U256> {
        self.instance
            .priceToMint(minter)
            .call()
            .await
            .map_err(|e| BlockchainError::contract("priceToMint", e))
    }

    async fn safe_mint(&self, value: U256) -> BlockchainResult<TxHash> {
        let pending = self
            .instance
            .safeMint()
            .value(value)
            .send()
            .await
            .map_err(|e| BlockchainError::contract("safeMint", e))?;
        let tx_hash = *pending.tx_hash();

        metrics::record_transaction("safe_mint");
        tracing::info!(tx_hash = %tx_hash, value = %value, "safeMint submitted");
        Ok(tx_hash)
    }

    async fn balance_of(&self, owner: Address) -> BlockchainResult<U256> {
        self.instance
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| BlockchainError::contract("balanceOf", e))
    }

    async fn token_of_owner_by_index(&self, owner: Address, index: U256) -> BlockchainResult<U256> {
        self.instance
            .tokenOfOwnerByIndex(owner, index)
            .call()
            .await
            .map_err(|e| BlockchainError::contract("tokenOfOwnerByIndex", e))
    }

    async fn donation_token_count(&self, author: U256) -> BlockchainResult<U256> {
        self.instance
            .donateTokenAddressesByAuthorCount(author)
            .call()
            .await
            .map_err(|e| BlockchainError::contract("donateTokenAddressesByAuthorCount", e))
    }

    async fn donation_token_at(&self, author: U256, index: U256) -> BlockchainResult<Address> {
        self.instance
            .donateTokenAddressesByAuthor(author, index)
            .call()
            .await
            .map_err(|e| BlockchainError::contract("donateTokenAddressesByAuthor", e))
    }
}
