//! Table builders: sort a snapshot and turn it into display rows.
//!
//! The data flow is:
//! 1. Snapshot (`&[WorkerRecord]`, `&[JobQueueRecord]`, optional error)
//! 2. `StatusTable` (headers plus rows of formatted cells)
//! 3. Drawn text (see [`draw`])
//!
//! `StatusTable` is pure presentation data and serializes to JSON as-is.
//! Builders borrow the snapshot and sort a view of it; the caller's slice
//! keeps its order.
//!
//! When an upstream error accompanies a snapshot, the records are ignored and
//! the table holds one sentinel row: the error message followed by `ERROR`
//! in every other column.

pub mod draw;
pub mod rows;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::io::{self, Write};

use crate::data::records::{JobQueueRecord, WorkerRecord};
use crate::format::StatusColor;
use crate::options::{ColorMode, RenderOptions};

pub use rows::{job_row, service_worker_row, worker_row};

/// Filler for the non-message columns of the sentinel error row.
pub const ERROR_MARKER: &str = "ERROR";

pub const WORKER_HEADERS: [&str; 6] = ["PID", "Status", "Execs", "Memory", "CPU%", "Created"];
pub const SERVICE_WORKER_HEADERS: [&str; 4] = ["PID", "Memory", "CPU%", "Command"];
pub const JOB_HEADERS: [&str; 7] = [
    "Status", "Pipeline", "Driver", "Queue", "Active", "Delayed", "Reserved",
];

/// Which view a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Workers,
    ServiceWorkers,
    Jobs,
}

/// A single display cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StatusColor>,
}

impl TableCell {
    /// A cell with no color
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }
}

/// Layout hints for the drawing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Maximum rendered width in columns
    pub max_width: u16,
    /// Upper-case header labels when drawing
    pub header_auto_format: bool,
    /// Reflow long cells to fit `max_width`
    pub wrap: bool,
}

impl TableLayout {
    fn from_options(opts: &RenderOptions, wrap: bool) -> Self {
        Self {
            max_width: opts.max_width,
            header_auto_format: true,
            wrap,
        }
    }
}

/// Table-ready status data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTable {
    pub kind: TableKind,
    /// Column headers, exactly as defined for the kind
    pub headers: Vec<String>,
    /// Data rows, or the single sentinel error row
    pub rows: Vec<Vec<TableCell>>,
    pub layout: TableLayout,
}

impl StatusTable {
    fn new(kind: TableKind, headers: &[&str], layout: TableLayout) -> Self {
        Self {
            kind,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            layout,
        }
    }

    /// Replace all rows with the sentinel error row.
    fn set_error(&mut self, err: &dyn Error) {
        let mut row = Vec::with_capacity(self.headers.len());
        row.push(TableCell::plain(err.to_string()));
        row.extend((1..self.headers.len()).map(|_| TableCell::plain(ERROR_MARKER)));

        tracing::debug!(kind = ?self.kind, error = %err, "rendering error row");
        self.rows = vec![row];
    }

    /// True when the table holds the sentinel error row instead of data
    pub fn is_error(&self) -> bool {
        matches!(self.rows.as_slice(), [row] if row.len() > 1 && row[1..].iter().all(|c| c.text == ERROR_MARKER))
    }
}

/// Build the worker table: `PID, Status, Execs, Memory, CPU%, Created`.
///
/// Rows are ordered by ascending pid. Relative ages are measured against the
/// time of this call.
pub fn worker_table(
    workers: &[WorkerRecord],
    error: Option<&dyn Error>,
    opts: &RenderOptions,
) -> StatusTable {
    let mut table = StatusTable::new(
        TableKind::Workers,
        &WORKER_HEADERS,
        TableLayout::from_options(opts, true),
    );

    if let Some(err) = error {
        table.set_error(err);
        return table;
    }

    let mut sorted: Vec<&WorkerRecord> = workers.iter().collect();
    sorted.sort_by_key(|w| w.pid);

    let now = Utc::now();
    table.rows = sorted
        .into_iter()
        .map(|w| worker_row(w, opts.byte_units, now))
        .collect();

    tracing::debug!(rows = table.rows.len(), "built worker table");
    table
}

/// Build the service-worker table: `PID, Memory, CPU%, Command`.
///
/// There is no error path; callers validate the snapshot beforehand.
pub fn service_worker_table(workers: &[WorkerRecord], opts: &RenderOptions) -> StatusTable {
    let mut table = StatusTable::new(
        TableKind::ServiceWorkers,
        &SERVICE_WORKER_HEADERS,
        TableLayout::from_options(opts, true),
    );

    let mut sorted: Vec<&WorkerRecord> = workers.iter().collect();
    sorted.sort_by_key(|w| w.pid);

    table.rows = sorted
        .into_iter()
        .map(|w| service_worker_row(w, opts.byte_units))
        .collect();

    tracing::debug!(rows = table.rows.len(), "built service worker table");
    table
}

/// Build the job table: `Status, Pipeline, Driver, Queue, Active, Delayed, Reserved`.
///
/// Rows are ordered by pipeline name. Long names are never wrapped.
pub fn job_table(
    jobs: &[JobQueueRecord],
    error: Option<&dyn Error>,
    opts: &RenderOptions,
) -> StatusTable {
    let mut table = StatusTable::new(
        TableKind::Jobs,
        &JOB_HEADERS,
        TableLayout::from_options(opts, false),
    );

    if let Some(err) = error {
        table.set_error(err);
        return table;
    }

    let mut sorted: Vec<&JobQueueRecord> = jobs.iter().collect();
    sorted.sort_by(|a, b| a.pipeline.cmp(&b.pipeline));

    table.rows = sorted.into_iter().map(job_row).collect();

    tracing::debug!(rows = table.rows.len(), "built job table");
    table
}

/// Build the worker table and draw it into `sink`.
pub fn render_worker_table<W: Write>(
    sink: &mut W,
    workers: &[WorkerRecord],
    error: Option<&dyn Error>,
    opts: &RenderOptions,
    color: ColorMode,
) -> io::Result<StatusTable> {
    let table = worker_table(workers, error, opts);
    table.write_to(sink, color)?;
    Ok(table)
}

/// Build the service-worker table and draw it into `sink`.
pub fn render_service_worker_table<W: Write>(
    sink: &mut W,
    workers: &[WorkerRecord],
    opts: &RenderOptions,
    color: ColorMode,
) -> io::Result<StatusTable> {
    let table = service_worker_table(workers, opts);
    table.write_to(sink, color)?;
    Ok(table)
}

/// Build the job table and draw it into `sink`.
pub fn render_job_table<W: Write>(
    sink: &mut W,
    jobs: &[JobQueueRecord],
    error: Option<&dyn Error>,
    opts: &RenderOptions,
    color: ColorMode,
) -> io::Result<StatusTable> {
    let table = job_table(jobs, error, opts);
    table.write_to(sink, color)?;
    Ok(table)
}
