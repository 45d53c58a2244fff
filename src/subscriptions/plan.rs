//! Subscription plans and discount schedules.
//!
//! Discounts are applied by the contract; locally the schedule is only
//! validated and converted into its ABI form.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::contracts::bindings::Subscriptions;

/// Parts-per-million denominator; a tier can never discount more than this.
pub const PPM_DENOMINATOR: u32 = 1_000_000;

/// Errors raised while building a plan.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid discount tier '{0}', expected <periods>:<ppm>")]
    InvalidTier(String),

    #[error("discount tier period must be > 0")]
    ZeroTierPeriod,

    #[error("discount {0} ppm exceeds 1000000 ppm")]
    PpmOutOfRange(u32),

    #[error("discount tiers must have strictly increasing periods ({previous} then {next})")]
    Unordered { previous: u64, next: u64 },

    #[error("payment period must be > 0")]
    ZeroPaymentPeriod,
}

/// One tier: paying for `period` periods at once earns `amount_as_ppm` off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub period: u64,
    pub amount_as_ppm: u32,
}

impl FromStr for DiscountTier {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlanError::InvalidTier(s.to_string());
        let (period, ppm) = s.split_once(':').ok_or_else(invalid)?;
        let period: u64 = period.trim().parse().map_err(|_| invalid())?;
        let amount_as_ppm: u32 = ppm.trim().parse().map_err(|_| invalid())?;

        if period == 0 {
            return Err(PlanError::ZeroTierPeriod);
        }
        if amount_as_ppm > PPM_DENOMINATOR {
            return Err(PlanError::PpmOutOfRange(amount_as_ppm));
        }
        Ok(Self { period, amount_as_ppm })
    }
}

/// Ordered set of discount tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountSchedule(Vec<DiscountTier>);

impl DiscountSchedule {
    /// Build a schedule, rejecting zero periods, out-of-range discounts and
    /// tiers that are not strictly increasing by period.
    pub fn new(tiers: Vec<DiscountTier>) -> Result<Self, PlanError> {
        for tier in &tiers {
            if tier.period == 0 {
                return Err(PlanError::ZeroTierPeriod);
            }
            if tier.amount_as_ppm > PPM_DENOMINATOR {
                return Err(PlanError::PpmOutOfRange(tier.amount_as_ppm));
            }
        }
        for pair in tiers.windows(2) {
            if pair[1].period <= pair[0].period {
                return Err(PlanError::Unordered {
                    previous: pair[0].period,
                    next: pair[1].period,
                });
            }
        }
        Ok(Self(tiers))
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.0
    }

    /// ABI representation passed to the creation calls.
    pub fn to_abi(&self) -> Vec<Subscriptions::Discount> {
        self.0
            .iter()
            .map(|tier| Subscriptions::Discount {
                period: U256::from(tier.period),
                amountAsPPM: U256::from(tier.amount_as_ppm),
            })
            .collect()
    }
}

/// Everything needed to create a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionPlan {
    pub hex_id: B256,
    pub author: U256,
    /// Recurring (`true`) or one-time subscription.
    pub recurring: bool,
    /// Payment period in seconds.
    pub payment_period: u64,
    /// Base price per period, in the payment asset's base unit.
    pub price: U256,
    /// Accepted tokens. Empty means the plan is paid in the native coin.
    pub tokens: Vec<Address>,
    pub discounts: DiscountSchedule,
}

impl SubscriptionPlan {
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.payment_period == 0 {
            return Err(PlanError::ZeroPaymentPeriod);
        }
        Ok(())
    }

    /// Whether the plan is created through `createNewSubscriptionByEth`.
    pub fn pays_in_native(&self) -> bool {
        self.tokens.is_empty()
    }
}
