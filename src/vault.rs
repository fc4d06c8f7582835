use std::collections::{HashMap, hash_map::Entry};

use thiserror::Error;

use crate::{
    broadcast::{DeploymentLog, DeploymentTransaction},
    types::{ChainId, UnderlyingAsset, VaultExtensions, VaultInfo},
};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("underlying asset {asset} of vault {vault} not found in token deployments")]
    UnderlyingAssetNotFound { vault: String, asset: String },

    #[error("{contract} is missing deploy argument '{argument}'")]
    MissingArgument {
        contract: String,
        argument: &'static str,
    },

    #[error("token {token} has invalid decimals '{value}'")]
    InvalidDecimals { token: String, value: String },
}

/// Token deployments indexed by the address they were deployed to.
#[derive(Debug, Default)]
pub struct TokenPool<'a> {
    by_address: HashMap<&'a str, &'a DeploymentTransaction>,
}

impl<'a> TokenPool<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_logs(logs: &'a [DeploymentLog]) -> Self {
        let mut pool = Self::new();
        for log in logs {
            pool.extend(&log.transactions);
        }
        pool
    }

    /// Keeps the earliest transaction for an address.
    pub fn extend(&mut self, transactions: &'a [DeploymentTransaction]) {
        for transaction in transactions {
            if let Entry::Vacant(entry) = self
                .by_address
                .entry(transaction.contract_address.as_str())
            {
                entry.insert(transaction);
            }
        }
    }

    pub fn get(&self, address: &str) -> Option<&'a DeploymentTransaction> {
        self.by_address.get(address).copied()
    }

    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenMetadata<'a> {
    name: &'a str,
    symbol: &'a str,
    decimals: u8,
}

fn argument<'a>(
    arguments: &'a [String],
    index: usize,
    contract: &str,
    label: &'static str,
) -> Result<&'a str, VaultError> {
    arguments
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| VaultError::MissingArgument {
            contract: contract.to_string(),
            argument: label,
        })
}

fn underlying_asset<'a>(
    pool: &TokenPool<'a>,
    vault_address: &str,
    asset_address: &str,
) -> Result<TokenMetadata<'a>, VaultError> {
    let deployment = pool
        .get(asset_address)
        .ok_or_else(|| VaultError::UnderlyingAssetNotFound {
            vault: vault_address.to_string(),
            asset: asset_address.to_string(),
        })?;

    // ERC20Mintable(name, symbol, decimals)
    let arguments = deployment.arguments.as_slice();
    let name = argument(arguments, 0, asset_address, "name")?;
    let symbol = argument(arguments, 1, asset_address, "symbol")?;
    let decimals = argument(arguments, 2, asset_address, "decimals")?;

    let decimals = decimals
        .parse::<u8>()
        .map_err(|_| VaultError::InvalidDecimals {
            token: asset_address.to_string(),
            value: decimals.to_string(),
        })?;

    Ok(TokenMetadata {
        name,
        symbol,
        decimals,
    })
}

/// Builds the vault list entry for a mint-rate vault from its deploy
/// arguments `[asset, name, symbol, ...]`.
pub fn vault_info(
    pool: &TokenPool<'_>,
    chain_id: ChainId,
    address: &str,
    arguments: &[String],
    yield_source: &str,
) -> Result<VaultInfo, VaultError> {
    let asset_address = argument(arguments, 0, address, "asset")?;
    let name = argument(arguments, 1, address, "name")?;
    let symbol = argument(arguments, 2, address, "symbol")?;

    let asset = underlying_asset(pool, address, asset_address)?;

    Ok(VaultInfo {
        chain_id,
        address: address.to_string(),
        name: name.to_string(),
        decimals: asset.decimals,
        symbol: symbol.to_string(),
        extensions: VaultExtensions {
            yield_source: yield_source.to_string(),
            underlying_asset: UnderlyingAsset {
                chain_id,
                address: asset_address.to_string(),
                symbol: asset.symbol.to_string(),
                name: asset.name.to_string(),
                decimals: asset.decimals,
            },
        },
    })
}
