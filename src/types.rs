use serde::Serialize;

pub type ChainId = u64;

pub type ContractAddress = String;

pub type ContractName = String;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub chain_id: ChainId,
    pub address: ContractAddress,
    pub version: Version,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abi: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<VaultInfo>>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VaultInfo {
    pub chain_id: ChainId,
    pub address: ContractAddress,
    pub name: String,
    pub decimals: u8,
    pub symbol: String,
    pub extensions: VaultExtensions,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VaultExtensions {
    pub yield_source: String,
    pub underlying_asset: UnderlyingAsset,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnderlyingAsset {
    pub chain_id: ChainId,
    pub address: ContractAddress,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

#[derive(Debug, Serialize)]
pub struct ContractList {
    pub name: String,
    pub version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub contracts: Vec<Contract>,
}

#[derive(Debug, Serialize)]
pub struct VaultList {
    pub name: String,
    pub keywords: Vec<String>,
    pub version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub tokens: Vec<VaultInfo>,
}
