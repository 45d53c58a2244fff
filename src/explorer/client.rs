//! ABI lookup through an Etherscan-compatible API.
//!
//! `GET {api_url}?module=contract&action=getabi&address=..&apikey=..`
//! answers `{"status":"1","message":"OK","result":"<abi json string>"}`.

use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ExplorerConfig;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("explorer returned status {status}: {message}")]
    Api { status: String, message: String },

    #[error("invalid ABI in explorer response: {0}")]
    Abi(#[from] serde_json::Error),

    #[error("ETHERSCAN_API_KEY is not set")]
    MissingApiKey,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    message: String,
    result: String,
}

/// Parse a `getabi` response body.
pub fn parse_abi_response(body: &str) -> Result<JsonAbi, ExplorerError> {
    let response: ApiResponse = serde_json::from_str(body)?;
    if response.status != "1" {
        return Err(ExplorerError::Api {
            status: response.status,
            message: format!("{} ({})", response.message, response.result),
        });
    }
    Ok(serde_json::from_str(&response.result)?)
}

/// Thin client for the explorer's contract endpoints.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ExplorerClient {
    pub fn new(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
        if config.api_key.is_empty() {
            return Err(ExplorerError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetch the verified ABI of `address`.
    pub async fn fetch_abi(&self, address: Address) -> Result<JsonAbi, ExplorerError> {
        let address = address.to_string();
        let body = self
            .http
            .get(&self.api_url)
            .query(&[
                ("module", "contract"),
                ("action", "getabi"),
                ("address", address.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let abi = parse_abi_response(&body)?;
        tracing::info!(
            address = %address,
            functions = abi.functions.len(),
            events = abi.events.len(),
            "Fetched ABI"
        );
        Ok(abi)
    }
}
