//! Subscriptions contract access over the signing provider.

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::DynProvider;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::contracts::bindings::Subscriptions;
use crate::contracts::SubscriptionsApi;
use crate::observability::metrics;
use crate::payments::types::PaymentQuote;
use crate::subscriptions::plan::SubscriptionPlan;

#[derive(Clone)]
pub struct SubscriptionsContract {
    instance: Subscriptions::SubscriptionsInstance<DynProvider>,
}

impl SubscriptionsContract {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            instance: Subscriptions::new(address, provider),
        }
    }
}

impl SubscriptionsApi for SubscriptionsContract {
    fn address(&self) -> Address {
        *self.instance.address()
    }

    async fn total_payment_amount(
        &self,
        author: U256,
        subscription_id: U256,
        periods: U256,
    ) -> BlockchainResult<PaymentQuote> {
        let amounts = self
            .instance
            .getTotalPaymentAmountForPeriod(author, subscription_id, periods)
            .call()
            .await
            .map_err(|e| BlockchainError::contract("getTotalPaymentAmountForPeriod", e))?;

        Ok(PaymentQuote {
            amount: amounts.amount,
            amount_in_eth: amounts.amountInEth,
        })
    }

    async fn subscription_payment(
        &self,
        author: U256,
        subscription_id: U256,
        token: Address,
        periods: U256,
        value: U256,
    ) -> BlockchainResult<TxHash> {
        let pending = self
            .instance
            .subscriptionPayment(author, subscription_id, token, periods)
            .value(value)
            .send()
            .await
            .map_err(|e| BlockchainError::contract("subscriptionPayment", e))?;
        let tx_hash = *pending.tx_hash();

        metrics::record_transaction("subscription_payment");
        tracing::info!(tx_hash = %tx_hash, value = %value, "subscriptionPayment submitted");
        Ok(tx_hash)
    }

    async fn create_subscription(&self, plan: &SubscriptionPlan) -> BlockchainResult<TxHash> {
        let period = U256::from(plan.payment_period);
        let discounts = plan.discounts.to_abi();

        let (method, sent) = if plan.pays_in_native() {
            let call = self.instance.createNewSubscriptionByEth(
                plan.hex_id,
                plan.author,
                plan.recurring,
                period,
                plan.price,
                discounts,
            );
            ("createNewSubscriptionByEth", call.send().await)
        } else {
            let call = self.instance.createNewSubscriptionByToken(
                plan.hex_id,
                plan.author,
                plan.recurring,
                period,
                plan.tokens.clone(),
                plan.price,
                discounts,
            );
            ("createNewSubscriptionByToken", call.send().await)
        };
        let tx_hash = *sent.map_err(|e| BlockchainError::contract(method, e))?.tx_hash();

        metrics::record_transaction("create_subscription");
        tracing::info!(tx_hash = %tx_hash, method, "subscription creation submitted");
        Ok(tx_hash)
    }
}
