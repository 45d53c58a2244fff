//! Metrics collection.
//!
//! # Metrics
//! - `scripts_transactions_total` (counter): submitted transactions by kind
//! - `scripts_events_found_total` (counter): decoded events by event name
//! - `scripts_rpc_failover_total` (counter): RPC calls that fell through to the next provider
//!
//! No exporter is installed by the scripts themselves; an embedding process
//! can install any `metrics` recorder to collect these.

/// Record a submitted transaction (e.g. "approve", "subscription_payment").
pub fn record_transaction(kind: &'static str) {
    ::metrics::counter!("scripts_transactions_total", "kind" => kind).increment(1);
}

/// Record the number of events found by one scan.
pub fn record_events_found(event: &'static str, count: usize) {
    ::metrics::counter!("scripts_events_found_total", "event" => event).increment(count as u64);
}

/// Record an RPC call that failed over to the next provider.
pub fn record_rpc_failover(operation: &'static str) {
    ::metrics::counter!("scripts_rpc_failover_total", "operation" => operation).increment(1);
}

