//! Error types for annota I/O boundaries.
//!
//! Parsing and exporting are total and never fail; these errors only arise
//! when reading outline files, loading configuration, or starting the CLI.

use thiserror::Error;

/// Errors that can occur around the annotation pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logger setup failed: {0}")]
    Logger(String),
}

pub type Result<T> = std::result::Result<T, Error>;
