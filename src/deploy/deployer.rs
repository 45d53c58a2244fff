//! Contract deployment.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use std::fmt;
use std::path::Path;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::transaction::Confirmer;
use crate::config::DeploymentConfig;
use crate::deploy::artifact::{deploy_code, encode_constructor_args, Artifact};
use crate::deploy::DeployError;
use crate::observability::metrics;

/// What a deployment produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub name: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// ABI-encoded constructor arguments, as explorers expect them for
    /// source verification.
    pub constructor_args: Bytes,
}

impl fmt::Display for DeployReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Contract {} deployed to {}", self.name, self.address)?;
        writeln!(f, "Deployment tx: {} (block {})", self.tx_hash, self.block_number)?;
        write!(f, "Constructor arguments (ABI-encoded): {}", self.constructor_args)
    }
}

/// Deploy one configured contract and wait for its confirmations.
pub async fn deploy<C>(
    client: &BlockchainClient,
    confirmer: &C,
    deployment: &DeploymentConfig,
) -> Result<DeployReport, DeployError>
where
    C: Confirmer + Sync,
{
    let artifact = Artifact::load(Path::new(&deployment.artifact))?;
    let constructor_args = encode_constructor_args(&deployment.constructor_args)?;
    let code = deploy_code(&artifact.creation_code()?, &constructor_args);

    if let Some(owner) = client.signer_address() {
        tracing::info!(owner = %owner, contract = %artifact.contract_name, "Deploying");
    }

    let tx = TransactionRequest::default().with_deploy_code(code);
    let tx_hash = client.send_transaction(tx).await?;
    metrics::record_transaction("deploy");
    tracing::info!(tx_hash = %tx_hash, contract = %artifact.contract_name, "Deployment submitted");

    let block_number = confirmer
        .wait_for_confirmations(tx_hash, deployment.confirmations)
        .await?;

    let receipt = client
        .get_transaction_receipt(tx_hash)
        .await?
        .ok_or(DeployError::MissingContractAddress(tx_hash))?;
    let address = receipt
        .contract_address
        .ok_or(DeployError::MissingContractAddress(tx_hash))?;

    tracing::info!(address = %address, contract = %deployment.name, "Contract deployed");

    Ok(DeployReport {
        name: deployment.name.clone(),
        address,
        tx_hash,
        block_number,
        constructor_args,
    })
}
