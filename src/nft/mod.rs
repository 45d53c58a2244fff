//! MainNFT workflows: minting and count-then-fetch enumerations.

use alloy::primitives::{Address, TxHash, U256};

use crate::blockchain::transaction::Confirmer;
use crate::blockchain::types::BlockchainResult;
use crate::contracts::MainNftApi;

/// Tokens held by an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedTokens {
    pub balance: U256,
    pub token_ids: Vec<U256>,
}

/// Mint one token, paying the price the contract asks of `minter`.
pub async fn safe_mint<N, C>(
    nft: &N,
    confirmer: &C,
    minter: Address,
    confirmations: u64,
) -> BlockchainResult<TxHash>
where
    N: MainNftApi + Sync,
    C: Confirmer + Sync,
{
    let price = nft.price_to_mint(minter).await?;
    tracing::info!(minter = %minter, price = %price, "Minting");

    let tx_hash = nft.safe_mint(price).await?;
    confirmer.wait_for_confirmations(tx_hash, confirmations).await?;
    Ok(tx_hash)
}

/// List the token ids held by `owner`.
pub async fn owned_tokens<N>(nft: &N, owner: Address) -> BlockchainResult<OwnedTokens>
where
    N: MainNftApi + Sync,
{
    let balance = nft.balance_of(owner).await?;
    let mut token_ids = Vec::new();
    let mut index = U256::ZERO;
    while index < balance {
        token_ids.push(nft.token_of_owner_by_index(owner, index).await?);
        index += U256::from(1);
    }
    Ok(OwnedTokens { balance, token_ids })
}

/// Mint only when `owner` holds no token yet. Returns the mint tx, if any.
pub async fn mint_if_missing<N, C>(
    nft: &N,
    confirmer: &C,
    owner: Address,
    confirmations: u64,
) -> BlockchainResult<Option<TxHash>>
where
    N: MainNftApi + Sync,
    C: Confirmer + Sync,
{
    let owned = owned_tokens(nft, owner).await?;
    if !owned.balance.is_zero() {
        tracing::info!(owner = %owner, balance = %owned.balance, "Owner already holds a token");
        return Ok(None);
    }
    safe_mint(nft, confirmer, owner, confirmations).await.map(Some)
}

/// Tokens an author accepts for donations, fetched by index up to the
/// count the contract reports.
pub async fn donation_tokens<N>(nft: &N, author: U256) -> BlockchainResult<Vec<Address>>
where
    N: MainNftApi + Sync,
{
    let count = nft.donation_token_count(author).await?;
    let mut addresses = Vec::new();
    let mut index = U256::ZERO;
    while index < count {
        addresses.push(nft.donation_token_at(author, index).await?);
        index += U256::from(1);
    }
    Ok(addresses)
}
