//! Error types for the console

use thiserror::Error;

/// Failures that can reach a handler.
///
/// Reading the roster never fails (an unreadable file is an empty roster),
/// so only the write path produces these.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
