//! Connected session: signer, client, confirmation waiter and contract views.

use alloy::primitives::Address;

use crate::blockchain::{BlockchainClient, ConfirmationWaiter, Wallet};
use crate::config::{ConfigError, ScriptsConfig};
use crate::contracts::{Erc20Tokens, MainNftContract, PublicDonationContract, SubscriptionsContract};
use crate::error::ScriptResult;

/// Everything a write workflow needs, built once per run.
pub struct Session {
    config: ScriptsConfig,
    wallet: Wallet,
    client: BlockchainClient,
    waiter: ConfirmationWaiter,
}

impl Session {
    /// Load the signer from the environment and connect to the node.
    pub async fn connect(config: ScriptsConfig) -> ScriptResult<Self> {
        let wallet = Wallet::from_env(config.chain.chain_id)?;
        let client = BlockchainClient::with_wallet(config.chain.clone(), &wallet).await?;
        let waiter = ConfirmationWaiter::new(client.clone());
        Ok(Self {
            config,
            wallet,
            client,
            waiter,
        })
    }

    pub fn config(&self) -> &ScriptsConfig {
        &self.config
    }

    pub fn owner(&self) -> Address {
        self.wallet.address()
    }

    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }

    pub fn waiter(&self) -> &ConfirmationWaiter {
        &self.waiter
    }

    /// Confirmations to wait for after interaction transactions.
    pub fn confirmations(&self) -> u64 {
        self.client.confirmation_blocks()
    }

    pub fn subscriptions(&self) -> Result<SubscriptionsContract, ConfigError> {
        let address = self.config.contracts.subscriptions_address()?;
        Ok(SubscriptionsContract::new(address, self.client.provider().clone()))
    }

    pub fn main_nft(&self) -> Result<MainNftContract, ConfigError> {
        let address = self.config.contracts.main_nft_address()?;
        Ok(MainNftContract::new(address, self.client.provider().clone()))
    }

    pub fn donations(&self) -> Result<PublicDonationContract, ConfigError> {
        let address = self.config.contracts.public_donation_address()?;
        Ok(PublicDonationContract::new(address, self.client.provider().clone()))
    }

    pub fn tokens(&self) -> Erc20Tokens {
        Erc20Tokens::new(self.client.provider().clone())
    }
}
