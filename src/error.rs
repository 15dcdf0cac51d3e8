//! Error types for the fallible edges of the crate
//!
//! The simulation itself never fails; only loading configuration and
//! talking to the file-backed high score store can.

/// Crate-wide error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
