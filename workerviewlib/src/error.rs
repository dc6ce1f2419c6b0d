//! Error types for workerviewlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading snapshots or reporting upstream failures
#[derive(Error, Debug)]
pub enum WorkerviewError {
    /// Failed to read a snapshot file
    #[error("failed to read snapshot '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot document is not valid JSON or has the wrong shape
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// State collection failed upstream; the message is shown verbatim
    #[error("{0}")]
    Collect(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
