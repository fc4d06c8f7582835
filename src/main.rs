mod config;

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use config::Config;
use deployment_catalog::{
    artifact::ArtifactStore,
    list::ListOptions,
    targets::{DEFAULT_YIELD_SOURCE, TargetError, run_target},
    write::JsonStyle,
};
use tracing::error;

fn main() -> ExitCode {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = ListOptions {
        generated_at: Some(Utc::now()),
        artifacts: config
            .embed_abi
            .then(|| ArtifactStore::new(config.root.join("out"))),
        yield_source: DEFAULT_YIELD_SOURCE.to_string(),
    };
    let style = if config.pretty {
        JsonStyle::Pretty
    } else {
        JsonStyle::Compact
    };

    let mut failed = false;
    for target in config.network.targets() {
        match run_target(&config.root, target, &options, style) {
            Ok(_) => {}
            Err(err @ TargetError::Write { .. }) => {
                error!(error = %err, "Some lists were not written");
                failed = true;
            }
            Err(err) => {
                error!(error = %err, "Failed to generate lists");
                return ExitCode::FAILURE;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
