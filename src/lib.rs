//! Deployment and interaction scripts for the MainNFT, Subscriptions and
//! PublicDonation contracts.

pub mod blockchain;
pub mod config;
pub mod contracts;
pub mod deploy;
pub mod error;
pub mod events;
pub mod explorer;
pub mod nft;
pub mod observability;
pub mod payments;
pub mod session;
pub mod subscriptions;

pub use config::ScriptsConfig;
pub use error::{ScriptError, ScriptResult};
pub use session::Session;
