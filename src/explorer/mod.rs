//! Etherscan-compatible block explorer API.

pub mod client;

pub use client::{parse_abi_response, ExplorerClient, ExplorerError};
