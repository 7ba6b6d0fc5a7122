//! JSON document loading with a default on any failure.
//!
//! [`try_load`] reports exactly what went wrong; [`load_or`] is what request
//! handlers use: it logs the failure and substitutes the caller's default, so a
//! broken data file degrades a page instead of failing it.

use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Why a document could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and deserialize a JSON document.
pub fn try_load<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::Missing(path.to_path_buf()))
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON document, returning `default` if it is missing or unparsable.
pub fn load_or<T: DeserializeOwned>(path: &Path, default: T) -> T {
    match try_load(path) {
        Ok(doc) => doc,
        Err(LoadError::Missing(_)) => {
            debug!(path = %path.display(), "data file missing, using default");
            default
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load data file, using default");
            default
        }
    }
}
