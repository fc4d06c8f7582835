use std::{collections::HashSet, path::Path};

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::debug;

use crate::{
    artifact::{ArtifactError, ArtifactStore},
    broadcast::{DeploymentLog, ReadError, read_deployment_log, read_deployment_logs},
    naming::parse_contract_name,
    resolve::{AddressBook, ResolvedDeployment, resolve_transactions},
    types::{ChainId, Contract, ContractList, VaultList, Version},
    vault::{TokenPool, VaultError, vault_info},
};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("contract {address} is deployed more than once on chain {chain_id}")]
    DuplicateContract { chain_id: ChainId, address: String },

    #[error("invalid package version: {0}")]
    PackageVersion(#[from] semver::Error),
}

#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Written as the document timestamp when set.
    pub generated_at: Option<DateTime<Utc>>,
    /// ABIs are embedded in contract list entries when set.
    pub artifacts: Option<ArtifactStore>,
    pub yield_source: String,
}

/// Release version of this tool, stamped on every generated document.
pub fn package_version() -> Result<Version, semver::Error> {
    let version = semver::Version::parse(env!("CARGO_PKG_VERSION"))?;
    Ok(Version::new(version.major, version.minor, version.patch))
}

fn timestamp(options: &ListOptions) -> Option<String> {
    options
        .generated_at
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn format_contract(
    pool: &TokenPool<'_>,
    chain_id: ChainId,
    deployment: &ResolvedDeployment<'_>,
    options: &ListOptions,
) -> Result<Contract, GenerateError> {
    let parsed = parse_contract_name(deployment.name.as_deref());

    let abi = options
        .artifacts
        .as_ref()
        .map(|store| store.abi(&parsed.kind))
        .transpose()?;

    let tokens = if parsed.is_mint_rate_vault() {
        Some(vec![vault_info(
            pool,
            chain_id,
            deployment.address,
            deployment.arguments,
            &options.yield_source,
        )?])
    } else {
        None
    };

    Ok(Contract {
        chain_id,
        address: deployment.address.to_string(),
        version: parsed.version,
        kind: parsed.published_kind().to_string(),
        abi,
        tokens,
    })
}

/// Folds every contract created in `logs` into one list.
///
/// Logs share one address book, so a factory deployed by an earlier log names
/// the contracts it creates in a later one.
pub fn build_contract_list(
    name: &str,
    logs: &[DeploymentLog],
    token_logs: &[DeploymentLog],
    options: &ListOptions,
) -> Result<ContractList, GenerateError> {
    let pool = TokenPool::from_logs(token_logs);
    let mut book = AddressBook::new();
    let mut seen: HashSet<(ChainId, &str)> = HashSet::new();
    let mut contracts = Vec::new();

    for log in logs {
        for deployment in resolve_transactions(&mut book, &log.transactions) {
            if !seen.insert((log.chain, deployment.address)) {
                return Err(GenerateError::DuplicateContract {
                    chain_id: log.chain,
                    address: deployment.address.to_string(),
                });
            }

            contracts.push(format_contract(&pool, log.chain, &deployment, options)?);
        }
    }

    debug!(
        list = name,
        contracts = contracts.len(),
        known_addresses = book.len(),
        "Built contract list"
    );

    Ok(ContractList {
        name: name.to_string(),
        version: package_version()?,
        timestamp: timestamp(options),
        contracts,
    })
}

pub fn build_vault_list(
    name: &str,
    keywords: &[&str],
    vault_log: &DeploymentLog,
    token_logs: &[DeploymentLog],
    options: &ListOptions,
) -> Result<VaultList, GenerateError> {
    let pool = TokenPool::from_logs(token_logs);
    let mut book = AddressBook::new();
    let mut tokens = Vec::new();

    for deployment in resolve_transactions(&mut book, &vault_log.transactions) {
        let parsed = parse_contract_name(deployment.name.as_deref());
        if !parsed.is_mint_rate_vault() {
            continue;
        }

        tokens.push(vault_info(
            &pool,
            vault_log.chain,
            deployment.address,
            deployment.arguments,
            &options.yield_source,
        )?);
    }

    debug!(list = name, vaults = tokens.len(), "Built vault list");

    Ok(VaultList {
        name: name.to_string(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        version: package_version()?,
        timestamp: timestamp(options),
        tokens,
    })
}

pub fn generate_contract_list<P: AsRef<Path>>(
    name: &str,
    deployment_paths: &[P],
    token_paths: &[P],
    options: &ListOptions,
) -> Result<ContractList, GenerateError> {
    let logs = read_deployment_logs(deployment_paths)?;
    let token_logs = read_deployment_logs(token_paths)?;

    build_contract_list(name, &logs, &token_logs, options)
}

pub fn generate_vault_list<P: AsRef<Path>>(
    name: &str,
    keywords: &[&str],
    vault_path: P,
    token_paths: &[P],
    options: &ListOptions,
) -> Result<VaultList, GenerateError> {
    let vault_log = read_deployment_log(vault_path)?;
    let token_logs = read_deployment_logs(token_paths)?;

    build_vault_list(name, keywords, &vault_log, &token_logs, options)
}
