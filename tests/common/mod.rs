//! Shared fakes for the workflow integration tests.
//!
//! Every fake appends to one `CallLog` so tests can assert the order of
//! calls across contracts, not just their count.
#![allow(dead_code)]

use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::{Filter, Log};
use alloy::sol_types::SolEvent;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use contract_scripts::blockchain::{BlockchainError, BlockchainResult, Confirmer};
use contract_scripts::contracts::{DonationApi, MainNftApi, SubscriptionsApi, TokenApi};
use contract_scripts::events::ChainReader;
use contract_scripts::payments::PaymentQuote;
use contract_scripts::subscriptions::SubscriptionPlan;

pub const OWNER: Address = Address::repeat_byte(0x01);
pub const SUBSCRIPTIONS: Address = Address::repeat_byte(0x5b);
pub const DONATION: Address = Address::repeat_byte(0xd0);
pub const TOKEN: Address = Address::repeat_byte(0x7e);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Quote { periods: U256 },
    Allowance { token: Address, spender: Address },
    Balance { token: Address },
    Approve { token: Address, spender: Address, amount: U256 },
    Payment { token: Address, periods: U256, value: U256 },
    Create { recurring: bool, tokens: usize },
    DonateEth { value: U256 },
    DonateFromSwap { token: Address, amount: U256 },
    Mint { value: U256 },
    Wait { tx_hash: TxHash, required: u64 },
}

/// Ordered record of every call made against the fakes.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
    next_tx: Arc<Mutex<u8>>,
}

impl CallLog {
    pub fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that would have submitted a transaction.
    pub fn transactions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::Approve { .. }
                        | Call::Payment { .. }
                        | Call::Create { .. }
                        | Call::DonateEth { .. }
                        | Call::DonateFromSwap { .. }
                        | Call::Mint { .. }
                )
            })
            .collect()
    }

    fn tx_hash(&self) -> TxHash {
        let mut next = self.next_tx.lock().unwrap();
        *next += 1;
        TxHash::with_last_byte(*next)
    }
}

pub struct FakeTokens {
    pub log: CallLog,
    pub native_balance: U256,
    pub balance: U256,
    pub allowance: U256,
}

impl TokenApi for FakeTokens {
    async fn native_balance(&self, _owner: Address) -> BlockchainResult<U256> {
        Ok(self.native_balance)
    }

    async fn balance_of(&self, token: Address, _owner: Address) -> BlockchainResult<U256> {
        self.log.push(Call::Balance { token });
        Ok(self.balance)
    }

    async fn allowance(
        &self,
        token: Address,
        _owner: Address,
        spender: Address,
    ) -> BlockchainResult<U256> {
        self.log.push(Call::Allowance { token, spender });
        Ok(self.allowance)
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> BlockchainResult<TxHash> {
        self.log.push(Call::Approve {
            token,
            spender,
            amount,
        });
        Ok(self.log.tx_hash())
    }
}

pub struct FakeSubscriptions {
    pub log: CallLog,
    pub quote: PaymentQuote,
    /// Reject `subscriptionPayment` at submission.
    pub reject_payment: bool,
}

impl SubscriptionsApi for FakeSubscriptions {
    fn address(&self) -> Address {
        SUBSCRIPTIONS
    }

    async fn total_payment_amount(
        &self,
        _author: U256,
        _subscription_id: U256,
        periods: U256,
    ) -> BlockchainResult<PaymentQuote> {
        self.log.push(Call::Quote { periods });
        Ok(self.quote)
    }

    async fn subscription_payment(
        &self,
        _author: U256,
        _subscription_id: U256,
        token: Address,
        periods: U256,
        value: U256,
    ) -> BlockchainResult<TxHash> {
        if self.reject_payment {
            return Err(BlockchainError::contract(
                "subscriptionPayment",
                "execution reverted",
            ));
        }
        self.log.push(Call::Payment {
            token,
            periods,
            value,
        });
        Ok(self.log.tx_hash())
    }

    async fn create_subscription(&self, plan: &SubscriptionPlan) -> BlockchainResult<TxHash> {
        self.log.push(Call::Create {
            recurring: plan.recurring,
            tokens: plan.tokens.len(),
        });
        Ok(self.log.tx_hash())
    }
}

pub struct FakeDonation {
    pub log: CallLog,
}

impl DonationApi for FakeDonation {
    fn address(&self) -> Address {
        DONATION
    }

    async fn donate_eth(&self, _author: U256, value: U256) -> BlockchainResult<TxHash> {
        self.log.push(Call::DonateEth { value });
        Ok(self.log.tx_hash())
    }

    async fn donate_from_swap(
        &self,
        token: Address,
        amount: U256,
        _author: U256,
    ) -> BlockchainResult<TxHash> {
        self.log.push(Call::DonateFromSwap { token, amount });
        Ok(self.log.tx_hash())
    }
}

pub struct FakeMainNft {
    pub log: CallLog,
    pub price: U256,
    pub owned: Vec<U256>,
    pub donation_tokens: Vec<Address>,
}

impl MainNftApi for FakeMainNft {
    async fn price_to_mint(&self, _minter: Address) -> BlockchainResult<U256> {
        Ok(self.price)
    }

    async fn safe_mint(&self, value: U256) -> BlockchainResult<TxHash> {
        self.log.push(Call::Mint { value });
        Ok(self.log.tx_hash())
    }

    async fn balance_of(&self, _owner: Address) -> BlockchainResult<U256> {
        Ok(U256::from(self.owned.len()))
    }

    async fn token_of_owner_by_index(&self, _owner: Address, index: U256) -> BlockchainResult<U256> {
        self.owned
            .get(index.to::<usize>())
            .copied()
            .ok_or_else(|| BlockchainError::contract("tokenOfOwnerByIndex", "index out of bounds"))
    }

    async fn donation_token_count(&self, _author: U256) -> BlockchainResult<U256> {
        Ok(U256::from(self.donation_tokens.len()))
    }

    async fn donation_token_at(&self, _author: U256, index: U256) -> BlockchainResult<Address> {
        self.donation_tokens
            .get(index.to::<usize>())
            .copied()
            .ok_or_else(|| {
                BlockchainError::contract("donateTokenAddressesByAuthor", "index out of bounds")
            })
    }
}

/// Confirms everything immediately at `block_number`, except `reverted`.
pub struct InstantConfirmer {
    pub log: CallLog,
    pub block_number: u64,
    pub reverted: Option<TxHash>,
}

impl InstantConfirmer {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            block_number: 1,
            reverted: None,
        }
    }
}

impl Confirmer for InstantConfirmer {
    async fn wait_for_confirmations(&self, tx_hash: TxHash, required: u64) -> BlockchainResult<u64> {
        self.log.push(Call::Wait { tx_hash, required });
        if self.reverted == Some(tx_hash) {
            return Err(BlockchainError::Reverted(tx_hash));
        }
        Ok(self.block_number)
    }
}

/// In-memory chain history for the event reconciler.
#[derive(Default)]
pub struct FakeReader {
    pub head: u64,
    pub logs: Vec<Log>,
    /// Block number to timestamp in seconds.
    pub timestamps: HashMap<u64, u64>,
    pub filters: Mutex<Vec<Filter>>,
    pub timestamp_requests: Mutex<Vec<u64>>,
}

impl FakeReader {
    pub fn timestamp_requests(&self) -> Vec<u64> {
        self.timestamp_requests.lock().unwrap().clone()
    }
}

impl ChainReader for FakeReader {
    async fn block_number(&self) -> BlockchainResult<u64> {
        Ok(self.head)
    }

    async fn logs(&self, filter: &Filter) -> BlockchainResult<Vec<Log>> {
        self.filters.lock().unwrap().push(filter.clone());
        let topic = filter.topics[0].clone();
        Ok(self
            .logs
            .iter()
            .filter(|log| log.topic0().is_some_and(|t| topic.matches(t)))
            .cloned()
            .collect())
    }

    async fn block_timestamp(&self, block_number: u64) -> BlockchainResult<u64> {
        self.timestamp_requests.lock().unwrap().push(block_number);
        self.timestamps
            .get(&block_number)
            .copied()
            .ok_or_else(|| BlockchainError::NotAvailable(format!("block {}", block_number)))
    }
}

/// Wrap an event into an RPC log emitted by `address` at `block_number`.
pub fn event_log<E: SolEvent>(address: Address, event: &E, block_number: u64) -> Log {
    Log {
        inner: alloy::primitives::Log {
            address,
            data: event.encode_log_data(),
        },
        block_number: Some(block_number),
        transaction_hash: Some(TxHash::with_last_byte(block_number as u8)),
        ..Default::default()
    }
}

/// Serve `body` with `status` to every connection; returns the bound address.
pub async fn start_mock_explorer(status: u16, body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let body = body.clone();
            tokio::spawn(async move {
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;

                let status_text = match status {
                    200 => "200 OK",
                    404 => "404 Not Found",
                    500 => "500 Internal Server Error",
                    _ => "200 OK",
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
                tokio::time::sleep(Duration::from_millis(10)).await;
            });
        }
    });

    addr
}
