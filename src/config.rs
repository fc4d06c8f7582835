use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use deployment_catalog::targets::{LOCAL_TARGETS, TESTNET_TARGETS, Target};

/// Generate contract and vault lists from Foundry broadcast logs
#[derive(Parser, Debug)]
#[command(name = "deployment-catalog")]
#[command(about = "Generate contract and vault lists from deployment broadcasts", long_about = None)]
pub struct Config {
    /// Networks to generate lists for
    #[arg(value_enum)]
    pub network: Network,

    /// Project root containing `broadcast/`, `out/` and `deployments/`
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Pretty-print the written JSON
    #[arg(long)]
    pub pretty: bool,

    /// Embed each contract's ABI from `<root>/out` in the contract list
    #[arg(long)]
    pub embed_abi: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Local,
    Testnet,
}

impl Network {
    pub fn targets(self) -> &'static [Target] {
        match self {
            Network::Local => LOCAL_TARGETS,
            Network::Testnet => TESTNET_TARGETS,
        }
    }
}
