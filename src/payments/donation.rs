//! Donations to authors through the PublicDonation contract.

use alloy::primitives::{Address, U256};

use crate::blockchain::transaction::Confirmer;
use crate::blockchain::types::BlockchainResult;
use crate::contracts::{DonationApi, TokenApi};
use crate::payments::gate::{AllowanceGate, GateOutcome};
use crate::payments::types::DonationOutcome;

pub struct DonationWorkflow<'a, D, T, C> {
    donations: &'a D,
    tokens: &'a T,
    confirmer: &'a C,
    owner: Address,
    confirmations: u64,
}

impl<'a, D, T, C> DonationWorkflow<'a, D, T, C>
where
    D: DonationApi + Sync,
    T: TokenApi + Sync,
    C: Confirmer + Sync,
{
    pub fn new(
        donations: &'a D,
        tokens: &'a T,
        confirmer: &'a C,
        owner: Address,
        confirmations: u64,
    ) -> Self {
        Self {
            donations,
            tokens,
            confirmer,
            owner,
            confirmations,
        }
    }

    /// Donate `value` of the native coin to `author`.
    pub async fn donate_eth(&self, author: U256, value: U256) -> BlockchainResult<DonationOutcome> {
        let available = self.tokens.native_balance(self.owner).await?;
        if available < value {
            tracing::warn!(required = %value, available = %available, "Native balance too low");
            return Ok(DonationOutcome::InsufficientBalance {
                required: value,
                available,
            });
        }

        let donation = self.donations.donate_eth(author, value).await?;
        self.confirmer
            .wait_for_confirmations(donation, self.confirmations)
            .await?;
        Ok(DonationOutcome::Donated {
            amount: value,
            approval: None,
            donation,
        })
    }

    /// Donate `amount` of `token` to `author`, approving first if needed.
    pub async fn donate_token(
        &self,
        token: Address,
        amount: U256,
        author: U256,
    ) -> BlockchainResult<DonationOutcome> {
        let gate = AllowanceGate::new(self.tokens, self.confirmer, self.confirmations);
        let approval = match gate
            .ensure(token, self.owner, self.donations.address(), amount)
            .await?
        {
            GateOutcome::Ready { approval } => approval,
            GateOutcome::InsufficientBalance { required, available } => {
                return Ok(DonationOutcome::InsufficientBalance { required, available });
            }
        };

        let donation = self.donations.donate_from_swap(token, amount, author).await?;
        self.confirmer
            .wait_for_confirmations(donation, self.confirmations)
            .await?;

        Ok(DonationOutcome::Donated {
            amount,
            approval,
            donation,
        })
    }
}
