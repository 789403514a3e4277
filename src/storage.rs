//! Raw-data artifact on disk.
//!
//! The artifact is a single JSON array holding every fetched snapshot in
//! date order. It is written once at the end of a retrieval run.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::RawSnapshot;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid raw data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Write snapshots as one JSON array, replacing any existing file.
pub fn write_snapshots(path: &Path, snapshots: &[RawSnapshot]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| StorageError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshots)
        .map_err(|e| StorageError::json(path, e))?;
    writer.flush().map_err(|e| StorageError::io(path, e))?;

    tracing::info!(
        "Wrote {} snapshots to {}",
        snapshots.len(),
        path.display()
    );
    Ok(())
}

/// Read the snapshot array written by [`write_snapshots`].
pub fn read_snapshots(path: &Path) -> Result<Vec<RawSnapshot>, StorageError> {
    let file = File::open(path).map_err(|e| StorageError::io(path, e))?;
    let snapshots: Vec<RawSnapshot> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| StorageError::json(path, e))?;
    tracing::debug!("Read {} snapshots from {}", snapshots.len(), path.display());
    Ok(snapshots)
}
