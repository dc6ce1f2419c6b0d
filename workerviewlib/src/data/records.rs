//! State records for worker processes and job queues.
//!
//! Records are plain snapshots: the library reads them and never writes back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state reported for a worker process.
///
/// The known states are closed variants; anything the server reports that
/// this crate does not know about is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkerStatus {
    Inactive,
    Ready,
    Working,
    Invalid,
    Stopped,
    Errored,
    Other(String),
}

impl WorkerStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &str {
        match self {
            WorkerStatus::Inactive => "inactive",
            WorkerStatus::Ready => "ready",
            WorkerStatus::Working => "working",
            WorkerStatus::Invalid => "invalid",
            WorkerStatus::Stopped => "stopped",
            WorkerStatus::Errored => "errored",
            WorkerStatus::Other(s) => s,
        }
    }
}

impl From<&str> for WorkerStatus {
    fn from(s: &str) -> Self {
        match s {
            "inactive" => WorkerStatus::Inactive,
            "ready" => WorkerStatus::Ready,
            "working" => WorkerStatus::Working,
            "invalid" => WorkerStatus::Invalid,
            "stopped" => WorkerStatus::Stopped,
            "errored" => WorkerStatus::Errored,
            other => WorkerStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for WorkerStatus {
    fn from(s: String) -> Self {
        match WorkerStatus::from(s.as_str()) {
            WorkerStatus::Other(_) => WorkerStatus::Other(s),
            known => known,
        }
    }
}

impl From<WorkerStatus> for String {
    fn from(status: WorkerStatus) -> Self {
        match status {
            WorkerStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics for a single worker (or service) process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Process identifier, unique within a snapshot
    pub pid: u32,
    /// Reported lifecycle state
    pub status: WorkerStatus,
    /// Number of executions handled so far
    #[serde(default)]
    pub num_execs: u64,
    /// Resident memory in bytes
    #[serde(default)]
    pub memory_usage: u64,
    /// CPU usage as a percentage
    #[serde(default)]
    pub cpu_percent: f64,
    /// Process start time (unix nanoseconds on the wire)
    #[serde(with = "chrono::serde::ts_nanoseconds")]
    pub created: DateTime<Utc>,
    /// Command line; only meaningful for service processes
    #[serde(default)]
    pub command: String,
}

impl WorkerRecord {
    /// Create a record with zeroed counters and an empty command
    pub fn new(pid: u32, status: impl Into<WorkerStatus>, created: DateTime<Utc>) -> Self {
        Self {
            pid,
            status: status.into(),
            num_execs: 0,
            memory_usage: 0,
            cpu_percent: 0.0,
            created,
            command: String::new(),
        }
    }

    /// Builder: set execution count
    pub fn num_execs(mut self, num_execs: u64) -> Self {
        self.num_execs = num_execs;
        self
    }

    /// Builder: set memory usage in bytes
    pub fn memory_usage(mut self, bytes: u64) -> Self {
        self.memory_usage = bytes;
        self
    }

    /// Builder: set CPU percentage
    pub fn cpu_percent(mut self, cpu: f64) -> Self {
        self.cpu_percent = cpu;
        self
    }

    /// Builder: set the command line
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }
}

/// Counters for one job pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQueueRecord {
    /// Pipeline name, the sort key
    pub pipeline: String,
    /// Queue driver (amqp, redis, memory, ...)
    #[serde(default)]
    pub driver: String,
    /// Queue name on the driver side
    #[serde(default)]
    pub queue: String,
    /// Whether the pipeline is consuming
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub delayed: u64,
    #[serde(default)]
    pub reserved: u64,
}

impl JobQueueRecord {
    /// Create a paused pipeline with zeroed counters
    pub fn new(
        pipeline: impl Into<String>,
        driver: impl Into<String>,
        queue: impl Into<String>,
    ) -> Self {
        Self {
            pipeline: pipeline.into(),
            driver: driver.into(),
            queue: queue.into(),
            ready: false,
            active: 0,
            delayed: 0,
            reserved: 0,
        }
    }

    /// Builder: set the ready flag
    pub fn ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// Builder: set active, delayed and reserved counters
    pub fn counters(mut self, active: u64, delayed: u64, reserved: u64) -> Self {
        self.active = active;
        self.delayed = delayed;
        self.reserved = reserved;
        self
    }
}
