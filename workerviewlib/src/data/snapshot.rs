//! JSON snapshot documents consumed by the CLI.
//!
//! A snapshot bundles everything one status call needs:
//!
//! ```json
//! {
//!   "error": "connection refused",
//!   "workers": { "http": [ ... ] },
//!   "services": { "consumer": [ ... ] },
//!   "jobs": [ ... ]
//! }
//! ```
//!
//! Every section is optional. Plugin and service maps are ordered by name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use super::records::{JobQueueRecord, WorkerRecord};
use crate::error::WorkerviewError;
use crate::Result;

/// A collected state snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Upstream collection failure, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Worker pools keyed by plugin name
    #[serde(default)]
    pub workers: BTreeMap<String, Vec<WorkerRecord>>,
    /// Service processes keyed by service name
    #[serde(default)]
    pub services: BTreeMap<String, Vec<WorkerRecord>>,
    /// Job pipelines
    #[serde(default)]
    pub jobs: Vec<JobQueueRecord>,
}

impl Snapshot {
    /// The upstream failure as an error value, ready to hand to a table builder
    pub fn error(&self) -> Option<WorkerviewError> {
        self.error.clone().map(WorkerviewError::Collect)
    }
}

/// Parse a snapshot from a JSON string.
pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    Ok(serde_json::from_str(json)?)
}

/// Load a snapshot from a file, or from stdin when `path` is `-`.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();

    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path).map_err(|source| WorkerviewError::FileRead {
            path: path.to_path_buf(),
            source,
        })?
    };

    let snapshot = parse_snapshot(&contents)?;
    tracing::debug!(
        plugins = snapshot.workers.len(),
        services = snapshot.services.len(),
        jobs = snapshot.jobs.len(),
        has_error = snapshot.error.is_some(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::WorkerStatus;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "workers": {
            "http": [
                {"pid": 42, "status": "working", "created": 0},
                {"pid": 7, "status": "ready", "created": 0}
            ],
            "grpc": []
        },
        "services": {
            "consumer": [{"pid": 3, "status": "working", "created": 0, "command": "php consumer.php"}]
        },
        "jobs": [{"pipeline": "emails", "driver": "amqp", "queue": "default", "ready": true}]
    }"#;

    #[test]
    fn test_parse_full_snapshot() {
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        assert!(snapshot.error.is_none());
        assert!(snapshot.error().is_none());
        let plugins: Vec<&str> = snapshot.workers.keys().map(|k| k.as_str()).collect();
        assert_eq!(plugins, vec!["grpc", "http"]);
        assert_eq!(snapshot.workers["http"][0].status, WorkerStatus::Working);
        assert_eq!(snapshot.services["consumer"][0].command, "php consumer.php");
        assert!(snapshot.jobs[0].ready);
    }

    #[test]
    fn test_parse_empty_document() {
        let snapshot = parse_snapshot("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_error_section() {
        let snapshot = parse_snapshot(r#"{"error": "connection refused"}"#).unwrap();
        let err = snapshot.error().unwrap();
        assert!(matches!(err, WorkerviewError::Collect(_)));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_snapshot("{not json").unwrap_err();
        assert!(matches!(err, WorkerviewError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, SAMPLE).unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.workers["http"].len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_snapshot(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, WorkerviewError::FileRead { .. }));
    }
}
