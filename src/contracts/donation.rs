//! PublicDonation contract access over the signing provider.

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::DynProvider;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::contracts::bindings::PublicDonation;
use crate::contracts::DonationApi;
use crate::observability::metrics;

#[derive(Clone)]
pub struct PublicDonationContract {
    instance: PublicDonation::PublicDonationInstance<DynProvider>,
}

impl PublicDonationContract {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            instance: PublicDonation::new(address, provider),
        }
    }
}

impl DonationApi for PublicDonationContract {
    fn address(&self) -> Address {
        *self.instance.address()
    }

    async fn donate_eth(&self, author: U256, value: U256) -> BlockchainResult<TxHash> {
        let pending = self
            .instance
            .donateEth(author)
            .value(value)
            .send()
            .await
            .map_err(|e| BlockchainError::contract("donateEth", e))?;
        let tx_hash = *pending.tx_hash();

        metrics::record_transaction("donate_eth");
        tracing::info!(tx_hash = %tx_hash, value = %value, "donateEth submitted");
        Ok(tx_hash)
    }

    async fn donate_from_swap(&self, token: Address, amount: U256, author: U256) -> BlockchainResult<TxHash> {
        let pending = self
            .instance
            .donateFromSwap(token, amount, author)
            .send()
            .await
            .map_err(|e| BlockchainError::contract("donateFromSwap", e))?;
        let tx_hash = *pending.tx_hash();

        metrics::record_transaction("donate_token");
        tracing::info!(tx_hash = %tx_hash, token = %token, amount = %amount, "donateFromSwap submitted");
        Ok(tx_hash)
    }
}
