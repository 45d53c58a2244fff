//! Subscription payment workflow.
//!
//! ```text
//! quote (getTotalPaymentAmountForPeriod)
//!     → native coin: balance check → subscriptionPayment{value: amount}
//!     → token:       allowance gate → subscriptionPayment{value: 0}
//!     → wait for confirmations
//! ```

use alloy::primitives::{Address, U256};

use crate::blockchain::transaction::Confirmer;
use crate::blockchain::types::BlockchainResult;
use crate::contracts::{SubscriptionsApi, TokenApi};
use crate::payments::gate::{AllowanceGate, GateOutcome};
use crate::payments::types::{is_native, PaymentOutcome};

/// Which subscription to pay for, with what, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentRequest {
    pub author: U256,
    pub subscription_id: U256,
    /// Token to pay with; the zero address means the native coin.
    pub token: Address,
    pub periods: u64,
}

/// Pays for subscriptions on behalf of `owner`.
pub struct PaymentWorkflow<'a, S, T, C> {
    subscriptions: &'a S,
    tokens: &'a T,
    confirmer: &'a C,
    owner: Address,
    confirmations: u64,
}

impl<'a, S, T, C> PaymentWorkflow<'a, S, T, C>
where
    S: SubscriptionsApi + Sync,
    T: TokenApi + Sync,
    C: Confirmer + Sync,
{
    pub fn new(
        subscriptions: &'a S,
        tokens: &'a T,
        confirmer: &'a C,
        owner: Address,
        confirmations: u64,
    ) -> Self {
        Self {
            subscriptions,
            tokens,
            confirmer,
            owner,
            confirmations,
        }
    }

    /// Quote and pay. Balance shortfalls come back as
    /// [`PaymentOutcome::InsufficientBalance`]; chain failures as errors.
    pub async fn pay(&self, request: &PaymentRequest) -> BlockchainResult<PaymentOutcome> {
        let periods = U256::from(request.periods);
        let quote = self
            .subscriptions
            .total_payment_amount(request.author, request.subscription_id, periods)
            .await?;

        tracing::info!(
            author = %request.author,
            subscription_id = %request.subscription_id,
            periods = request.periods,
            amount = %quote.amount,
            amount_in_eth = %quote.amount_in_eth,
            "Payment quoted"
        );

        let (approval, value) = if is_native(request.token) {
            let available = self.tokens.native_balance(self.owner).await?;
            if available < quote.amount {
                tracing::warn!(
                    required = %quote.amount,
                    available = %available,
                    "Native balance too low"
                );
                return Ok(PaymentOutcome::InsufficientBalance {
                    required: quote.amount,
                    available,
                });
            }
            (None, quote.amount)
        } else {
            let gate = AllowanceGate::new(self.tokens, self.confirmer, self.confirmations);
            match gate
                .ensure(request.token, self.owner, self.subscriptions.address(), quote.amount)
                .await?
            {
                GateOutcome::Ready { approval } => (approval, U256::ZERO),
                GateOutcome::InsufficientBalance { required, available } => {
                    return Ok(PaymentOutcome::InsufficientBalance { required, available });
                }
            }
        };

        let payment = self
            .subscriptions
            .subscription_payment(
                request.author,
                request.subscription_id,
                request.token,
                periods,
                value,
            )
            .await?;
        self.confirmer
            .wait_for_confirmations(payment, self.confirmations)
            .await?;

        Ok(PaymentOutcome::Paid {
            quote,
            approval,
            payment,
        })
    }
}
