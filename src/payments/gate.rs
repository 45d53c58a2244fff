//! Token allowance gate.
//!
//! Runs before any token-denominated transfer. Balance shortfalls are
//! reported without touching the chain; allowance shortfalls are fixed by
//! approving the spender for the owner's whole current balance.

use alloy::primitives::{Address, TxHash, U256};

use crate::blockchain::transaction::Confirmer;
use crate::blockchain::types::BlockchainResult;
use crate::contracts::TokenApi;

/// Result of running the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The spender may pull `required`. `approval` is the approve tx, if one
    /// was needed.
    Ready { approval: Option<TxHash> },
    /// The owner cannot cover `required`; no transaction was submitted.
    InsufficientBalance { required: U256, available: U256 },
}

/// Balance and allowance check in front of a token transfer.
pub struct AllowanceGate<'a, T, C> {
    tokens: &'a T,
    confirmer: &'a C,
    confirmations: u64,
}

impl<'a, T, C> AllowanceGate<'a, T, C>
where
    T: TokenApi + Sync,
    C: Confirmer + Sync,
{
    pub fn new(tokens: &'a T, confirmer: &'a C, confirmations: u64) -> Self {
        Self {
            tokens,
            confirmer,
            confirmations,
        }
    }

    /// Make sure `spender` can pull `required` of `token` from `owner`.
    pub async fn ensure(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        required: U256,
    ) -> BlockchainResult<GateOutcome> {
        let allowance = self.tokens.allowance(token, owner, spender).await?;
        let balance = self.tokens.balance_of(token, owner).await?;

        if balance < required {
            tracing::warn!(
                token = %token,
                required = %required,
                available = %balance,
                "Balance too low"
            );
            return Ok(GateOutcome::InsufficientBalance {
                required,
                available: balance,
            });
        }

        if allowance >= required {
            tracing::debug!(token = %token, allowance = %allowance, "Allowance sufficient");
            return Ok(GateOutcome::Ready { approval: None });
        }

        // Approve the whole balance so later payments skip this step.
        let approval = self.tokens.approve(token, spender, balance).await?;
        self.confirmer
            .wait_for_confirmations(approval, self.confirmations)
            .await?;

        Ok(GateOutcome::Ready {
            approval: Some(approval),
        })
    }
}
