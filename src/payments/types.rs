//! Payment workflow types.

use alloy::primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};

/// Sentinel token address meaning "pay in the chain's native coin".
pub const NATIVE_COIN: Address = Address::ZERO;

/// Whether `token` denotes the native coin.
pub fn is_native(token: Address) -> bool {
    token == NATIVE_COIN
}

/// Amount owed for a number of periods, as quoted by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentQuote {
    /// Raw amount in the payment asset's base unit.
    pub amount: U256,
    /// Equivalent amount in the chain's native base unit.
    pub amount_in_eth: U256,
}

/// What a subscription payment ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Payment confirmed. `approval` is set when an approve preceded it.
    Paid {
        quote: PaymentQuote,
        approval: Option<TxHash>,
        payment: TxHash,
    },
    /// Token balance does not cover the quote; nothing was submitted.
    InsufficientBalance { required: U256, available: U256 },
}

impl PaymentOutcome {
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid { .. })
    }
}

/// What a donation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationOutcome {
    Donated {
        amount: U256,
        approval: Option<TxHash>,
        donation: TxHash,
    },
    InsufficientBalance { required: U256, available: U256 },
}

impl DonationOutcome {
    /// Operator-facing summary.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Donated { .. } => "Donation requested",
            Self::InsufficientBalance { .. } => "Balance too low for donate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_sentinel() {
        assert!(is_native(Address::ZERO));
        assert!(!is_native(Address::repeat_byte(0x11)));
    }

    #[test]
    fn test_quote_serde() {
        let quote = PaymentQuote {
            amount: U256::from(1000),
            amount_in_eth: U256::from(3),
        };
        let json = serde_json::to_string(&quote).unwrap();
        let decoded: PaymentQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, quote);
    }

    #[test]
    fn test_donation_message() {
        let outcome = DonationOutcome::InsufficientBalance {
            required: U256::from(2),
            available: U256::from(1),
        };
        assert_eq!(outcome.message(), "Balance too low for donate");
    }
}
