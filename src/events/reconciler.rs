//! Historical event scanning.
//!
//! # Pipeline
//! ```text
//! block number
//!     → get_logs(contract, topic0, [block - window, block])
//!     → decode every match (chain order)
//!     → resolve timestamps for the last `tail` records, one by one
//!     → report in chain order
//! ```
//!
//! Scans are stateless: there is no cursor, so repeated runs may overlap or
//! leave gaps.

use alloy::primitives::Address;
use alloy::rpc::types::{Filter, Log};
use chrono::{Local, TimeZone};
use std::fmt;
use std::future::Future;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::EventsConfig;
use crate::events::kinds::{EventKind, EventRecord};
use crate::events::timestamp::format_block_time;
use crate::observability::metrics;

/// Read access the reconciler needs from the chain.
pub trait ChainReader {
    fn block_number(&self) -> impl Future<Output = BlockchainResult<u64>> + Send;

    fn logs(&self, filter: &Filter) -> impl Future<Output = BlockchainResult<Vec<Log>>> + Send;

    /// Block timestamp in seconds.
    fn block_timestamp(&self, block_number: u64) -> impl Future<Output = BlockchainResult<u64>> + Send;
}

impl ChainReader for BlockchainClient {
    async fn block_number(&self) -> BlockchainResult<u64> {
        self.get_block_number().await
    }

    async fn logs(&self, filter: &Filter) -> BlockchainResult<Vec<Log>> {
        self.get_logs(filter).await
    }

    async fn block_timestamp(&self, block_number: u64) -> BlockchainResult<u64> {
        self.get_block_timestamp(block_number).await
    }
}

/// One report line: a record and the time its block was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub timestamp: String,
    pub record: EventRecord,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.timestamp, self.record)
    }
}

/// Result of scanning one event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub kind: EventKind,
    pub from_block: u64,
    pub to_block: u64,
    /// Every decoded match in the window.
    pub records: Vec<EventRecord>,
    /// Timestamped tail of `records`, in chain order.
    pub lines: Vec<ReportLine>,
}

impl ScanReport {
    pub fn found(&self) -> usize {
        self.records.len()
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Found {} {} events:", self.found(), self.kind)?;
        for line in &self.lines {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Scans the Subscriptions contract's recent history.
pub struct EventReconciler<'a, R, Tz = Local> {
    reader: &'a R,
    contract: Address,
    config: &'a EventsConfig,
    tz: Tz,
}

impl<'a, R> EventReconciler<'a, R, Local>
where
    R: ChainReader + Sync,
{
    /// Reconciler reporting in the machine's local time.
    pub fn new(reader: &'a R, contract: Address, config: &'a EventsConfig) -> Self {
        Self {
            reader,
            contract,
            config,
            tz: Local,
        }
    }
}

impl<'a, R, Tz> EventReconciler<'a, R, Tz>
where
    R: ChainReader + Sync,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    /// Report timestamps in `tz` instead.
    pub fn with_timezone<Tz2: TimeZone>(self, tz: Tz2) -> EventReconciler<'a, R, Tz2> {
        EventReconciler {
            reader: self.reader,
            contract: self.contract,
            config: self.config,
            tz,
        }
    }

    /// Scan every known kind against the same head block, in order.
    pub async fn scan_all(&self) -> BlockchainResult<Vec<ScanReport>> {
        let head = self.reader.block_number().await?;
        let mut reports = Vec::with_capacity(EventKind::ALL.len());
        for kind in EventKind::ALL {
            reports.push(self.scan(kind, head).await?);
        }
        Ok(reports)
    }

    /// Scan one kind over its window ending at `to_block`.
    pub async fn scan(&self, kind: EventKind, to_block: u64) -> BlockchainResult<ScanReport> {
        let from_block = to_block.saturating_sub(kind.window(self.config));
        let filter = Filter::new()
            .address(self.contract)
            .event_signature(kind.signature_hash())
            .from_block(from_block)
            .to_block(to_block);

        let logs = self.reader.logs(&filter).await?;

        let mut records = Vec::with_capacity(logs.len());
        for log in &logs {
            match kind.decode(log) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    event = kind.name(),
                    block_number = ?log.block_number,
                    error = %e,
                    "Skipping undecodable log"
                ),
            }
        }
        metrics::record_events_found(kind.name(), records.len());
        tracing::debug!(
            event = kind.name(),
            from_block,
            to_block,
            found = records.len(),
            "Event scan finished"
        );

        let tail_start = records.len().saturating_sub(self.config.tail);
        let mut lines = Vec::with_capacity(records.len() - tail_start);
        for record in &records[tail_start..] {
            let secs = self.reader.block_timestamp(record.block_number).await?;
            let timestamp = format_block_time(secs, &self.tz).ok_or_else(|| {
                BlockchainError::NotAvailable(format!(
                    "timestamp {} of block {}",
                    secs, record.block_number
                ))
            })?;
            lines.push(ReportLine {
                timestamp,
                record: record.clone(),
            });
        }

        Ok(ScanReport {
            kind,
            from_block,
            to_block,
            records,
            lines,
        })
    }
}
