use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{TimeZone, Utc};
use deployment_catalog::{
    artifact::{ArtifactError, ArtifactStore},
    list::{GenerateError, ListOptions, generate_contract_list, package_version},
    targets::{DEFAULT_YIELD_SOURCE, LOCAL_TARGETS, TargetError, run_target},
    types::Version,
    write::JsonStyle,
};
use serde_json::Value;

const FIXTURES: &str = "tests/fixtures";

const USDC: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
const LIQUIDATION_PAIR_FACTORY: &str = "0x5FC8d32690cc91D4c39d9d3abcBD16989F875707";
const FIRST_PAIR: &str = "0xa16E02E87b7454126E5E10d957A927A7F5B5d2be";
const SECOND_PAIR: &str = "0xB7A5bd0345EF1Cc5E66bf61BdeC17D2461fBd968";
const VAULT: &str = "0x2279B7A0a67DB372996a5FaB50D91eAA73d2eBe6";

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}

fn project() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    copy_dir(Path::new(FIXTURES), root.path());
    root
}

fn options() -> ListOptions {
    ListOptions {
        generated_at: Some(Utc.with_ymd_and_hms(2023, 7, 22, 4, 26, 40).unwrap()),
        artifacts: None,
        yield_source: DEFAULT_YIELD_SOURCE.to_string(),
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn version_json() -> Value {
    let Version {
        major,
        minor,
        patch,
    } = package_version().unwrap();
    serde_json::json!({"major": major, "minor": minor, "patch": patch})
}

#[test]
fn test_generate_local_lists() {
    let root = project();

    let written = run_target(
        root.path(),
        &LOCAL_TARGETS[0],
        &options(),
        JsonStyle::Compact,
    )
    .unwrap();

    let folder = root.path().join("deployments/local");
    assert_eq!(
        written,
        vec![folder.join("contracts.json"), folder.join("vaults.json")]
    );

    let contracts = read_json(&folder.join("contracts.json"));
    assert_eq!(contracts["name"], "Hyperstructure Testnet");
    assert_eq!(contracts["version"], version_json());
    assert_eq!(contracts["timestamp"], "2023-07-22T04:26:40.000Z");

    let entries = contracts["contracts"].as_array().unwrap();
    let summary: Vec<(&str, &str)> = entries
        .iter()
        .map(|c| (c["address"].as_str().unwrap(), c["type"].as_str().unwrap()))
        .collect();
    assert_eq!(summary.len(), 11);
    assert_eq!(summary[0], (USDC, "ERC20Mintable"));
    assert_eq!(summary[5], (LIQUIDATION_PAIR_FACTORY, "LiquidationPair"));
    assert_eq!(summary[6], (FIRST_PAIR, "LiquidationPair"));
    assert_eq!(summary[7], (SECOND_PAIR, "LiquidationPair"));
    assert_eq!(summary[8].1, "Claimer");
    assert_eq!(summary[9].1, "YieldVault");
    assert_eq!(summary[10], (VAULT, "Vault"));

    for entry in entries {
        assert_eq!(entry["chainId"], 31337);
        assert!(entry.get("abi").is_none());
    }
    assert_eq!(
        entries[8]["version"],
        serde_json::json!({"major": 1, "minor": 1, "patch": 0})
    );

    let vaults = read_json(&folder.join("vaults.json"));
    assert_eq!(vaults["name"], "PoolTogether Testnet Vault List");
    assert_eq!(vaults["keywords"], serde_json::json!(["pooltogether"]));
    assert_eq!(vaults["version"], version_json());

    let tokens = vaults["tokens"].as_array().unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(
        tokens[0],
        serde_json::json!({
            "chainId": 31337,
            "address": VAULT,
            "name": "Prize USDC",
            "decimals": 6,
            "symbol": "PUSDC",
            "extensions": {
                "yieldSource": DEFAULT_YIELD_SOURCE,
                "underlyingAsset": {
                    "chainId": 31337,
                    "address": USDC,
                    "symbol": "USDC",
                    "name": "USD Coin",
                    "decimals": 6
                }
            }
        })
    );
}

#[test]
fn test_vault_is_listed_in_contract_list_with_tokens() {
    let root = project();
    let target = LOCAL_TARGETS[0];

    let list = generate_contract_list(
        "list",
        &target.deployment_paths(root.path()),
        &target.token_paths(root.path()),
        &options(),
    )
    .unwrap();

    let vaults: Vec<_> = list
        .contracts
        .iter()
        .filter(|contract| contract.tokens.is_some())
        .collect();
    assert_eq!(vaults.len(), 1);
    assert_eq!(vaults[0].address, VAULT);
    assert_eq!(vaults[0].kind, "Vault");
}

#[test]
fn test_missing_broadcast_aborts_before_writing() {
    let root = project();
    fs::remove_dir_all(root.path().join("broadcast/DeployYieldVault.s.sol")).unwrap();

    let result = run_target(
        root.path(),
        &LOCAL_TARGETS[0],
        &options(),
        JsonStyle::Compact,
    );

    assert!(matches!(
        result,
        Err(TargetError::Generate {
            source: GenerateError::Read(_),
            ..
        })
    ));
    assert!(!root.path().join("deployments").exists());
}

#[test]
fn test_vault_without_token_deployments_fails() {
    let root = project();
    let target = LOCAL_TARGETS[0];
    let no_tokens: Vec<PathBuf> = vec![];

    let result = generate_contract_list(
        "list",
        &target.deployment_paths(root.path()),
        &no_tokens,
        &options(),
    );

    assert!(matches!(result, Err(GenerateError::Vault(_))));
}

#[test]
fn test_embed_abi_requires_artifacts() {
    let root = project();
    let options = ListOptions {
        artifacts: Some(ArtifactStore::new(root.path().join("out"))),
        ..options()
    };

    let result = run_target(root.path(), &LOCAL_TARGETS[0], &options, JsonStyle::Pretty);

    match result {
        Err(TargetError::Generate {
            source: GenerateError::Artifact(ArtifactError::NotFound { kind, .. }),
            ..
        }) => assert_eq!(kind, "ERC20Mintable"),
        _ => panic!("Expected missing artifact"),
    }
}

#[test]
fn test_write_failure_still_writes_sibling_list() {
    let root = project();
    let folder = root.path().join("deployments/local");
    // a directory where the contract list file should go
    fs::create_dir_all(folder.join("contracts.json")).unwrap();

    let result = run_target(
        root.path(),
        &LOCAL_TARGETS[0],
        &options(),
        JsonStyle::Compact,
    );

    match result {
        Err(TargetError::Write { failed, total, .. }) => {
            assert_eq!(failed, 1);
            assert_eq!(total, 2);
        }
        _ => panic!("Expected Write error"),
    }
    assert!(folder.join("vaults.json").is_file());
}
