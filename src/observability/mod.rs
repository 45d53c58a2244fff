//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All workflows produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (counters)
//! ```
//!
//! Report output meant for the operator (event summaries, deployed
//! addresses) is printed on stdout by the entry point, not logged.

pub mod logging;
pub mod metrics;
