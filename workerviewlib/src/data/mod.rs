//! Data: state records and snapshot documents.
//!
//! This module holds the input side of rendering:
//!
//! - **Records**: `WorkerRecord`, `WorkerStatus`, `JobQueueRecord`
//! - **Snapshots**: JSON documents bundling worker pools, services and jobs
//!
//! ## Example
//!
//! ```rust,ignore
//! use workerviewlib::data::load_snapshot;
//!
//! let snapshot = load_snapshot("status.json")?;
//! println!("{} plugins", snapshot.workers.len());
//! ```

pub mod records;
pub mod snapshot;

pub use records::{JobQueueRecord, WorkerRecord, WorkerStatus};
pub use snapshot::{load_snapshot, parse_snapshot, Snapshot};
