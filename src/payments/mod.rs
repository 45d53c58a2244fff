//! Payments: subscription payments and donations.
//!
//! # Invariants
//! - A token transfer is never submitted without a prior allowance check
//! - Nothing is submitted when the owner's balance of the payment asset is
//!   below the amount

pub mod donation;
pub mod gate;
pub mod types;
pub mod workflow;

pub use donation::DonationWorkflow;
pub use gate::{AllowanceGate, GateOutcome};
pub use types::{is_native, DonationOutcome, PaymentOutcome, PaymentQuote, NATIVE_COIN};
pub use workflow::{PaymentRequest, PaymentWorkflow};
