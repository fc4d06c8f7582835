use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("no compiled artifact for '{kind}' at {path}")]
    NotFound { kind: String, path: PathBuf },

    #[error("failed to read compiled artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid compiled artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("compiled artifact {path} has no abi")]
    MissingAbi { path: PathBuf },
}

#[derive(Debug, Deserialize)]
struct CompiledOutput {
    #[serde(default)]
    abi: Option<Value>,
}

/// Forge build output directory (`out/`).
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    out_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// `<out>/<kind>.sol/<kind>.json`
    pub fn artifact_path(&self, kind: &str) -> PathBuf {
        self.out_dir
            .join(format!("{}.sol", kind))
            .join(format!("{}.json", kind))
    }

    pub fn abi(&self, kind: &str) -> Result<Value, ArtifactError> {
        let path = self.artifact_path(kind);

        let file = File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ArtifactError::NotFound {
                kind: kind.to_string(),
                path: path.clone(),
            },
            _ => ArtifactError::Io {
                path: path.clone(),
                source,
            },
        })?;

        let output: CompiledOutput = serde_json::from_reader(BufReader::new(file)).map_err(
            |source| ArtifactError::Parse {
                path: path.clone(),
                source,
            },
        )?;

        output.abi.ok_or(ArtifactError::MissingAbi { path })
    }
}
