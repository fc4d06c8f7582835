use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    Compact,
    Pretty,
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serde {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Writes `list` to `<root>/<folder>/<file_name>.json` and returns the path.
///
/// The file is flushed before this returns.
pub fn write_list<T: Serialize>(
    root: &Path,
    folder: &str,
    file_name: &str,
    list: &T,
    style: JsonStyle,
) -> Result<PathBuf, WriteError> {
    let folder_path = root.join(folder);
    let path = folder_path.join(format!("{}.json", file_name));

    let io_error = |source: std::io::Error| WriteError::Io {
        path: path.clone(),
        source,
    };

    if !folder_path.exists() {
        fs::create_dir_all(&folder_path).map_err(io_error)?;
    }

    let file = File::create(&path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    let serialized = match style {
        JsonStyle::Compact => serde_json::to_writer(&mut writer, list),
        JsonStyle::Pretty => serde_json::to_writer_pretty(&mut writer, list),
    };
    serialized.map_err(|source| WriteError::Serde {
        path: path.clone(),
        source,
    })?;

    writer.flush().map_err(io_error)?;

    info!(path = %path.display(), "Wrote list");

    Ok(path)
}
