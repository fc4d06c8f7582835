use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

use crate::types::{ChainId, ContractAddress, ContractName};

/// File name Foundry gives the latest broadcast of a deployment script.
pub const BROADCAST_FILE_NAME: &str = "run-latest.json";

#[derive(Debug, Deserialize, Clone)]
pub struct DeploymentLog {
    pub chain: ChainId,
    pub transactions: Vec<DeploymentTransaction>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTransaction {
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub contract_name: Option<ContractName>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_address: ContractAddress,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arguments: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_contracts: Vec<AdditionalContract>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalContract {
    pub transaction_type: TransactionType,
    pub address: ContractAddress,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "CREATE")]
    Create,
    #[serde(rename = "CALL")]
    Call,
    /// CREATE2 and anything else Foundry records
    #[serde(other)]
    Other,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read deployment log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid deployment log {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn read_deployment_log(path_to_folder: impl AsRef<Path>) -> Result<DeploymentLog, ReadError> {
    let path = path_to_folder.as_ref().join(BROADCAST_FILE_NAME);

    let file = File::open(&path).map_err(|source| ReadError::Io {
        path: path.clone(),
        source,
    })?;
    let reader = BufReader::new(file);
    let log: DeploymentLog =
        serde_json::from_reader(reader).map_err(|source| ReadError::Parse {
            path: path.clone(),
            source,
        })?;

    debug!(
        path = %path.display(),
        chain_id = log.chain,
        transactions = log.transactions.len(),
        "Read deployment log"
    );

    Ok(log)
}

pub fn read_deployment_logs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<DeploymentLog>, ReadError> {
    paths.iter().map(read_deployment_log).collect()
}
