//! Loading proof tables from disk.

use crate::types::ProofTable;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur while loading a proof table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ProofTable {
    /// Parse a proof table from a JSON document.
    ///
    /// # Errors
    /// Returns error if the bytes are not a valid proof table document
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Read and parse a proof table file.
    ///
    /// # Errors
    /// Returns [`LoadError::Read`] if the file cannot be read and
    /// [`LoadError::Parse`] if its contents are not a valid document
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(bytes = bytes.len(), "Read proof table file");

        Self::from_json(&bytes).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
