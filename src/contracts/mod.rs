//! Typed views over the deployed contracts.
//!
//! # Data Flow
//! ```text
//! workflow (payments, subscriptions, nft, events)
//!     → *Api trait (this module)
//!     → alloy binding (bindings.rs) over the signing provider
//!     → BlockchainClient primary RPC endpoint
//! ```
//!
//! Workflows are generic over the traits so they can run against in-memory
//! fakes. Write methods return once the node accepted the transaction; waiting
//! for confirmations is the caller's job (see `blockchain::Confirmer`).

pub mod bindings;
pub mod donation;
pub mod erc20;
pub mod main_nft;
pub mod subscriptions;

use alloy::primitives::{Address, TxHash, U256};
use std::future::Future;

use crate::blockchain::types::BlockchainResult;
use crate::payments::types::PaymentQuote;
use crate::subscriptions::plan::SubscriptionPlan;

pub use donation::PublicDonationContract;
pub use erc20::Erc20Tokens;
pub use main_nft::MainNftContract;
pub use subscriptions::SubscriptionsContract;

/// The Subscriptions contract.
pub trait SubscriptionsApi {
    /// Contract address; the spender for token payments.
    fn address(&self) -> Address;

    /// Amount owed for `periods` periods of a subscription.
    fn total_payment_amount(
        &self,
        author: U256,
        subscription_id: U256,
        periods: U256,
    ) -> impl Future<Output = BlockchainResult<PaymentQuote>> + Send;

    /// Submit `subscriptionPayment` with `value` attached.
    fn subscription_payment(
        &self,
        author: U256,
        subscription_id: U256,
        token: Address,
        periods: U256,
        value: U256,
    ) -> impl Future<Output = BlockchainResult<TxHash>> + Send;

    /// Submit the creation call matching the plan's payment asset.
    fn create_subscription(
        &self,
        plan: &SubscriptionPlan,
    ) -> impl Future<Output = BlockchainResult<TxHash>> + Send;
}

/// ERC-20 tokens, addressed per call, plus the native coin balance.
pub trait TokenApi {
    /// Native coin balance of `owner`, in wei.
    fn native_balance(&self, owner: Address) -> impl Future<Output = BlockchainResult<U256>> + Send;

    fn balance_of(
        &self,
        token: Address,
        owner: Address,
    ) -> impl Future<Output = BlockchainResult<U256>> + Send;

    fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> impl Future<Output = BlockchainResult<U256>> + Send;

    fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> impl Future<Output = BlockchainResult<TxHash>> + Send;
}

/// The MainNFT contract.
pub trait MainNftApi {
    fn price_to_mint(&self, minter: Address) -> impl Future<Output = BlockchainResult<U256>> + Send;

    fn safe_mint(&self, value: U256) -> impl Future<Output = BlockchainResult<TxHash>> + Send;

    fn balance_of(&self, owner: Address) -> impl Future<Output = BlockchainResult<U256>> + Send;

    fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> impl Future<Output = BlockchainResult<U256>> + Send;

    fn donation_token_count(&self, author: U256) -> impl Future<Output = BlockchainResult<U256>> + Send;

    fn donation_token_at(
        &self,
        author: U256,
        index: U256,
    ) -> impl Future<Output = BlockchainResult<Address>> + Send;
}

/// The PublicDonation contract.
pub trait DonationApi {
    /// Contract address; the spender for token donations.
    fn address(&self) -> Address;

    fn donate_eth(&self, author: U256, value: U256) -> impl Future<Output = BlockchainResult<TxHash>> + Send;

    fn donate_from_swap(
        &self,
        token: Address,
        amount: U256,
        author: U256,
    ) -> impl Future<Output = BlockchainResult<TxHash>> + Send;
}
