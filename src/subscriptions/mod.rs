//! Subscription plans, identifiers and creation.

pub mod create;
pub mod ids;
pub mod plan;

pub use create::{create_subscription, CreateError};
pub use ids::{hash_id, hex_id};
pub use plan::{DiscountSchedule, DiscountTier, PlanError, SubscriptionPlan};
