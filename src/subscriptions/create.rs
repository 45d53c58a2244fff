//! Subscription creation.

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::blockchain::transaction::Confirmer;
use crate::blockchain::types::BlockchainError;
use crate::contracts::SubscriptionsApi;
use crate::subscriptions::plan::{PlanError, SubscriptionPlan};

#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Chain(#[from] BlockchainError),
}

/// Validate `plan`, submit the matching creation call and wait for it.
pub async fn create_subscription<S, C>(
    subscriptions: &S,
    confirmer: &C,
    plan: &SubscriptionPlan,
    confirmations: u64,
) -> Result<TxHash, CreateError>
where
    S: SubscriptionsApi + Sync,
    C: Confirmer + Sync,
{
    plan.validate()?;

    tracing::info!(
        hex_id = %plan.hex_id,
        author = %plan.author,
        recurring = plan.recurring,
        payment_period = plan.payment_period,
        price = %plan.price,
        tokens = plan.tokens.len(),
        discount_tiers = plan.discounts.tiers().len(),
        "Creating subscription"
    );

    let tx_hash = subscriptions.create_subscription(plan).await?;
    confirmer.wait_for_confirmations(tx_hash, confirmations).await?;
    Ok(tx_hash)
}
