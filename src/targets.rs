use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

use crate::{
    list::{GenerateError, ListOptions, generate_contract_list, generate_vault_list},
    types::ChainId,
    write::{JsonStyle, write_list},
};

pub const CONTRACT_LIST_NAME: &str = "Hyperstructure Testnet";
pub const VAULT_LIST_NAME: &str = "PoolTogether Testnet Vault List";
pub const VAULT_LIST_KEYWORDS: &[&str] = &["pooltogether"];
pub const DEFAULT_YIELD_SOURCE: &str = "YieldVault";

const CONTRACTS_FILE_NAME: &str = "contracts";
const VAULTS_FILE_NAME: &str = "vaults";

const STABLE_TOKEN_SCRIPT: &str = "DeployStableToken";
const TOKEN_SCRIPT: &str = "DeployToken";
const POOL_SCRIPT: &str = "DeployPool";
const YIELD_VAULT_SCRIPT: &str = "DeployYieldVault";
const VAULT_SCRIPT: &str = "DeployVault";

/// Scripts whose broadcasts make up the contract list, in deployment order.
const DEPLOYMENT_SCRIPTS: &[&str] = &[
    STABLE_TOKEN_SCRIPT,
    TOKEN_SCRIPT,
    POOL_SCRIPT,
    YIELD_VAULT_SCRIPT,
    VAULT_SCRIPT,
];

/// Scripts that deploy the underlying tokens of vaults.
const TOKEN_SCRIPTS: &[&str] = &[STABLE_TOKEN_SCRIPT, TOKEN_SCRIPT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub name: &'static str,
    pub chain_id: ChainId,
}

pub const LOCAL_TARGETS: &[Target] = &[Target {
    name: "local",
    chain_id: 31337,
}];

pub const TESTNET_TARGETS: &[Target] = &[
    Target {
        name: "ethGoerli",
        chain_id: 5,
    },
    Target {
        name: "ethSepolia",
        chain_id: 11155111,
    },
    Target {
        name: "mumbai",
        chain_id: 80001,
    },
];

impl Target {
    /// `<root>/broadcast/<script>.s.sol/<chain_id>`
    pub fn broadcast_path(&self, root: &Path, script: &str) -> PathBuf {
        root.join("broadcast")
            .join(format!("{}.s.sol", script))
            .join(self.chain_id.to_string())
    }

    pub fn deployment_paths(&self, root: &Path) -> Vec<PathBuf> {
        DEPLOYMENT_SCRIPTS
            .iter()
            .map(|script| self.broadcast_path(root, script))
            .collect()
    }

    pub fn token_paths(&self, root: &Path) -> Vec<PathBuf> {
        TOKEN_SCRIPTS
            .iter()
            .map(|script| self.broadcast_path(root, script))
            .collect()
    }

    pub fn vault_path(&self, root: &Path) -> PathBuf {
        self.broadcast_path(root, VAULT_SCRIPT)
    }

    pub fn output_folder(&self) -> String {
        format!("deployments/{}", self.name)
    }
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("failed to generate lists for {target}: {source}")]
    Generate {
        target: &'static str,
        #[source]
        source: GenerateError,
    },

    #[error("{failed} of {total} lists for {target} could not be written")]
    Write {
        target: &'static str,
        failed: usize,
        total: usize,
    },
}

/// Generates and writes the contract and vault lists of one target.
///
/// Generation errors abort before anything is written. A failed write is
/// logged and the remaining lists are still written.
pub fn run_target(
    root: &Path,
    target: &Target,
    options: &ListOptions,
    style: JsonStyle,
) -> Result<Vec<PathBuf>, TargetError> {
    let generate_error = |source: GenerateError| TargetError::Generate {
        target: target.name,
        source,
    };

    let token_paths = target.token_paths(root);

    let contract_list = generate_contract_list(
        CONTRACT_LIST_NAME,
        &target.deployment_paths(root),
        &token_paths,
        options,
    )
    .map_err(generate_error)?;

    let vault_list = generate_vault_list(
        VAULT_LIST_NAME,
        VAULT_LIST_KEYWORDS,
        target.vault_path(root),
        &token_paths,
        options,
    )
    .map_err(generate_error)?;

    let folder = target.output_folder();
    let results = [
        write_list(root, &folder, CONTRACTS_FILE_NAME, &contract_list, style),
        write_list(root, &folder, VAULTS_FILE_NAME, &vault_list, style),
    ];
    let total = results.len();

    let mut written = Vec::with_capacity(total);
    for result in results {
        match result {
            Ok(path) => written.push(path),
            Err(err) => error!(network = target.name, error = %err, "Failed to write list"),
        }
    }

    if written.len() < total {
        return Err(TargetError::Write {
            target: target.name,
            failed: total - written.len(),
            total,
        });
    }

    info!(
        network = target.name,
        chain_id = target.chain_id,
        contracts = contract_list.contracts.len(),
        vaults = vault_list.tokens.len(),
        "Generated lists"
    );

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_path() {
        let target = TESTNET_TARGETS[1];
        let path = target.broadcast_path(Path::new("/repo"), "DeployPool");

        assert_eq!(path, PathBuf::from("/repo/broadcast/DeployPool.s.sol/11155111"));
    }

    #[test]
    fn test_token_paths_come_first_in_deployment_paths() {
        let root = Path::new("/repo");
        let target = LOCAL_TARGETS[0];

        let deployment_paths = target.deployment_paths(root);
        let token_paths = target.token_paths(root);

        assert_eq!(deployment_paths.len(), 5);
        assert_eq!(&deployment_paths[..2], token_paths.as_slice());
        assert_eq!(deployment_paths[4], target.vault_path(root));
    }

    #[test]
    fn test_output_folder() {
        assert_eq!(LOCAL_TARGETS[0].output_folder(), "deployments/local");
        assert_eq!(TESTNET_TARGETS[2].output_folder(), "deployments/mumbai");
    }

    #[test]
    fn test_target_chain_ids_are_unique() {
        let mut chain_ids: Vec<ChainId> = LOCAL_TARGETS
            .iter()
            .chain(TESTNET_TARGETS)
            .map(|target| target.chain_id)
            .collect();
        let total = chain_ids.len();
        chain_ids.sort_unstable();
        chain_ids.dedup();

        assert_eq!(chain_ids.len(), total);
    }

    #[test]
    fn test_run_target_without_broadcasts() {
        let root = tempfile::tempdir().unwrap();
        let options = ListOptions {
            generated_at: None,
            artifacts: None,
            yield_source: DEFAULT_YIELD_SOURCE.to_string(),
        };

        let result = run_target(root.path(), &LOCAL_TARGETS[0], &options, JsonStyle::Compact);

        match result {
            Err(TargetError::Generate { target, source }) => {
                assert_eq!(target, "local");
                assert!(matches!(source, GenerateError::Read(_)));
            }
            _ => panic!("Expected Generate error"),
        }
        assert!(!root.path().join("deployments").exists());
    }
}
