//! Event reconciliation: scan recent Subscriptions events and report them
//! with human-readable block times.

pub mod kinds;
pub mod reconciler;
pub mod timestamp;

pub use kinds::{DecodeError, EventDetails, EventKind, EventRecord};
pub use reconciler::{ChainReader, EventReconciler, ReportLine, ScanReport};
pub use timestamp::{format_block_time, format_local, format_timestamp_millis};
