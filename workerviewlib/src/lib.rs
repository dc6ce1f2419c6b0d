//! # workerviewlib
//!
//! Turns worker, service and job-queue state snapshots into sorted,
//! color-annotated tables for terminal output.
//!
//! ## Overview
//!
//! Rendering is a single pass over a snapshot the caller already collected:
//!
//! - **Data**: Records (`WorkerRecord`, `JobQueueRecord`) and JSON snapshot documents
//! - **Format**: Per-field renderers (status label, byte sizes, CPU, relative age)
//! - **Table**: Row assembly, sorting, the sentinel error row, and drawing
//!
//! Builders never mutate the records they are given and never fail. When a
//! snapshot comes with an upstream error, the table holds a single row that
//! carries the error message and `ERROR` markers instead of data.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use workerviewlib::{worker_table, RenderOptions, WorkerRecord, WorkerStatus};
//!
//! let workers = vec![
//!     WorkerRecord::new(42, WorkerStatus::Working, Utc::now()).num_execs(1500),
//!     WorkerRecord::new(7, WorkerStatus::Ready, Utc::now()),
//! ];
//!
//! let table = worker_table(&workers, None, &RenderOptions::new());
//! assert_eq!(table.rows[0][0].text, "7");
//! assert_eq!(table.rows[1][2].text, "1,500");
//! ```

pub mod data;
pub mod error;
pub mod format;
pub mod options;
pub mod table;

pub use data::{load_snapshot, parse_snapshot, JobQueueRecord, Snapshot, WorkerRecord, WorkerStatus};
pub use error::WorkerviewError;
pub use format::{StatusColor, StatusLabel};
pub use options::{ByteUnits, ColorMode, OutputFormat, RenderOptions};
pub use table::{
    job_table, render_job_table, render_service_worker_table, render_worker_table,
    service_worker_table, worker_table, StatusTable, TableCell, TableKind, TableLayout,
};

/// Result type for workerviewlib operations
pub type Result<T> = std::result::Result<T, WorkerviewError>;
