//! Scanned event types and their decoded records.

use alloy::primitives::{Address, TxHash, B256, U256};
use alloy::rpc::types::Log;
use alloy::sol_types::SolEvent;
use std::fmt;
use thiserror::Error;

use crate::config::EventsConfig;
use crate::contracts::bindings::Subscriptions;

/// Why a log could not be turned into an [`EventRecord`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("log has no block number")]
    Pending,

    #[error(transparent)]
    Abi(#[from] alloy::sol_types::Error),
}

/// Events the reconciler knows how to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NewSubscription,
    NewOneTimeSubscriptionCreated,
    NewRegularSubscriptionCreated,
}

impl EventKind {
    /// Scan order used when reporting every kind.
    pub const ALL: [EventKind; 3] = [
        EventKind::NewSubscription,
        EventKind::NewOneTimeSubscriptionCreated,
        EventKind::NewRegularSubscriptionCreated,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NewSubscription => "NewSubscription",
            Self::NewOneTimeSubscriptionCreated => "NewOneTimeSubscriptionCreated",
            Self::NewRegularSubscriptionCreated => "NewRegularSubscriptionCreated",
        }
    }

    /// Topic0 of the event.
    pub fn signature_hash(&self) -> B256 {
        match self {
            Self::NewSubscription => Subscriptions::NewSubscription::SIGNATURE_HASH,
            Self::NewOneTimeSubscriptionCreated => {
                Subscriptions::NewOneTimeSubscriptionCreated::SIGNATURE_HASH
            }
            Self::NewRegularSubscriptionCreated => {
                Subscriptions::NewRegularSubscriptionCreated::SIGNATURE_HASH
            }
        }
    }

    /// Lookback window in blocks.
    pub fn window(&self, config: &EventsConfig) -> u64 {
        match self {
            Self::NewSubscription => config.new_subscription_window,
            Self::NewOneTimeSubscriptionCreated => config.one_time_created_window,
            Self::NewRegularSubscriptionCreated => config.regular_created_window,
        }
    }

    /// Decode a mined log of this kind.
    pub fn decode(&self, log: &Log) -> Result<EventRecord, DecodeError> {
        let block_number = log.block_number.ok_or(DecodeError::Pending)?;
        let details = match self {
            Self::NewSubscription => {
                let event = log.log_decode::<Subscriptions::NewSubscription>()?.inner.data;
                EventDetails::NewSubscription {
                    hex_id: event.hexId,
                    participant: event.participant,
                    author: event.author,
                    subscription_index: event.subscriptionIndex,
                    subscription_end_time: event.subscriptionEndTime,
                    token: event.tokenAddress,
                    amount: event.amount,
                }
            }
            Self::NewOneTimeSubscriptionCreated => {
                let event = log
                    .log_decode::<Subscriptions::NewOneTimeSubscriptionCreated>()?
                    .inner
                    .data;
                EventDetails::OneTimeCreated {
                    author: event.author,
                    hex_id: event.hexId,
                    tokens: event.tokenAddresses,
                    discounts: event.discounts,
                }
            }
            Self::NewRegularSubscriptionCreated => {
                let event = log
                    .log_decode::<Subscriptions::NewRegularSubscriptionCreated>()?
                    .inner
                    .data;
                EventDetails::RegularCreated {
                    author: event.author,
                    hex_id: event.hexId,
                    tokens: event.tokenAddresses,
                    payment_period: event.paymentPeriod,
                    discounts: event.discounts,
                }
            }
        };

        Ok(EventRecord {
            block_number,
            tx_hash: log.transaction_hash,
            details,
        })
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.name()).collect();
                format!("unknown event '{}', expected one of {}", s, known.join(", "))
            })
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded event together with where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub block_number: u64,
    pub tx_hash: Option<TxHash>,
    pub details: EventDetails,
}

/// Event arguments, per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDetails {
    /// A payment was recorded against a subscription.
    NewSubscription {
        hex_id: B256,
        participant: Address,
        author: U256,
        subscription_index: U256,
        subscription_end_time: U256,
        token: Address,
        amount: U256,
    },
    OneTimeCreated {
        author: U256,
        hex_id: B256,
        tokens: Vec<Address>,
        discounts: Vec<Subscriptions::Discount>,
    },
    RegularCreated {
        author: U256,
        hex_id: B256,
        tokens: Vec<Address>,
        payment_period: U256,
        discounts: Vec<Subscriptions::Discount>,
    },
}

fn join_addresses(tokens: &[Address]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blockNumber: {}, ", self.block_number)?;
        match &self.details {
            EventDetails::NewSubscription {
                hex_id,
                participant,
                author,
                subscription_end_time,
                ..
            } => write!(
                f,
                "hexId: {}, participant: {}, author: {}, subscriptionEndTime: {}",
                hex_id, participant, author, subscription_end_time
            ),
            EventDetails::OneTimeCreated {
                author,
                hex_id,
                tokens,
                ..
            } => write!(
                f,
                "author: {}, hexId: {}, tokenAddress: {}",
                author,
                hex_id,
                join_addresses(tokens)
            ),
            EventDetails::RegularCreated {
                author,
                hex_id,
                tokens,
                payment_period,
                ..
            } => write!(
                f,
                "author: {}, hexId: {}, tokenAddress: {}, paymentPeriod: {}",
                author,
                hex_id,
                join_addresses(tokens),
                payment_period
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_of<E: SolEvent>(event: &E, block_number: u64) -> Log {
        Log {
            inner: alloy::primitives::Log {
                address: Address::repeat_byte(0xaa),
                data: event.encode_log_data(),
            },
            block_number: Some(block_number),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(
            "newsubscription".parse::<EventKind>(),
            Ok(EventKind::NewSubscription)
        );
        assert!("Transfer".parse::<EventKind>().unwrap_err().contains("unknown event"));
    }

    #[test]
    fn test_windows_from_config() {
        let config = EventsConfig::default();
        assert_eq!(EventKind::NewSubscription.window(&config), 100_000);
        assert_eq!(EventKind::NewRegularSubscriptionCreated.window(&config), 50_000);
    }

    #[test]
    fn test_decode_regular_created() {
        let event = Subscriptions::NewRegularSubscriptionCreated {
            author: U256::from(1),
            hexId: B256::repeat_byte(0x01),
            tokenAddresses: vec![Address::repeat_byte(0x5e)],
            paymentPeriod: U256::from(14_400),
            discounts: vec![Subscriptions::Discount {
                period: U256::from(2),
                amountAsPPM: U256::from(200),
            }],
        };
        let record = EventKind::NewRegularSubscriptionCreated
            .decode(&log_of(&event, 42))
            .unwrap();

        assert_eq!(record.block_number, 42);
        match &record.details {
            EventDetails::RegularCreated {
                payment_period,
                discounts,
                ..
            } => {
                assert_eq!(*payment_period, U256::from(14_400));
                assert_eq!(discounts.len(), 1);
            }
            other => panic!("unexpected details: {:?}", other),
        }
        assert!(record.to_string().starts_with("blockNumber: 42, author: 1, hexId: 0x0101"));
        assert!(record.to_string().ends_with("paymentPeriod: 14400"));
    }

    #[test]
    fn test_decode_wrong_kind_fails() {
        let event = Subscriptions::NewOneTimeSubscriptionCreated {
            author: U256::from(1),
            hexId: B256::ZERO,
            tokenAddresses: Vec::new(),
            discounts: Vec::new(),
        };
        assert!(matches!(
            EventKind::NewSubscription.decode(&log_of(&event, 1)),
            Err(DecodeError::Abi(_))
        ));
    }

    #[test]
    fn test_decode_without_block_number_fails() {
        let event = Subscriptions::NewOneTimeSubscriptionCreated {
            author: U256::from(1),
            hexId: B256::ZERO,
            tokenAddresses: Vec::new(),
            discounts: Vec::new(),
        };
        let mut log = log_of(&event, 1);
        log.block_number = None;

        assert!(matches!(
            EventKind::NewOneTimeSubscriptionCreated.decode(&log),
            Err(DecodeError::Pending)
        ));
    }
}
