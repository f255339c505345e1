//! Error types for the boundaries library.
//!
//! Link and query derivation never fails; only catalog file operations do.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing boundary catalogs.
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// IO error when reading or writing files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog JSON could not be parsed or serialized.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog file does not exist.
    #[error("Catalog file not found: {path}")]
    CatalogNotFound { path: PathBuf },
}

/// Result type alias using [`BoundaryError`].
pub type Result<T> = std::result::Result<T, BoundaryError>;
