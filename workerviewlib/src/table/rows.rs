//! Row assemblers: one record in, one row of display cells out.
//!
//! Column order is fixed and matches the headers in the parent module.

use chrono::{DateTime, Utc};

use super::TableCell;
use crate::data::records::{JobQueueRecord, WorkerRecord};
use crate::format::{
    format_bytes, format_cpu, format_elapsed, format_execs, ready_label, status_label,
};
use crate::options::ByteUnits;

/// `[pid, status, execs, memory, cpu, created]`
pub fn worker_row(worker: &WorkerRecord, units: ByteUnits, now: DateTime<Utc>) -> Vec<TableCell> {
    let status = status_label(&worker.status);

    vec![
        TableCell::plain(worker.pid.to_string()),
        TableCell {
            text: status.text,
            color: status.color,
        },
        TableCell::plain(format_execs(worker.num_execs)),
        TableCell::plain(format_bytes(worker.memory_usage, units)),
        TableCell::plain(format_cpu(worker.cpu_percent)),
        TableCell::plain(format_elapsed(worker.created, now)),
    ]
}

/// `[pid, memory, cpu, command]`
pub fn service_worker_row(worker: &WorkerRecord, units: ByteUnits) -> Vec<TableCell> {
    vec![
        TableCell::plain(worker.pid.to_string()),
        TableCell::plain(format_bytes(worker.memory_usage, units)),
        TableCell::plain(format_cpu(worker.cpu_percent)),
        TableCell::plain(worker.command.clone()),
    ]
}

/// `[ready, pipeline, driver, queue, active, delayed, reserved]`
pub fn job_row(job: &JobQueueRecord) -> Vec<TableCell> {
    vec![
        TableCell::plain(ready_label(job.ready)),
        TableCell::plain(job.pipeline.clone()),
        TableCell::plain(job.driver.clone()),
        TableCell::plain(job.queue.clone()),
        TableCell::plain(job.active.to_string()),
        TableCell::plain(job.delayed.to_string()),
        TableCell::plain(job.reserved.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::WorkerStatus;
    use crate::format::StatusColor;
    use chrono::TimeDelta;

    fn texts(row: &[TableCell]) -> Vec<&str> {
        row.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_worker_row_columns() {
        let now = Utc::now();
        let worker = WorkerRecord::new(42, WorkerStatus::Working, now - TimeDelta::seconds(90))
            .num_execs(1500)
            .memory_usage(2_000_000)
            .cpu_percent(12.345);

        let row = worker_row(&worker, ByteUnits::Decimal, now);
        assert_eq!(
            texts(&row),
            vec!["42", "working", "1,500", "2.0 MB", "12.35", "1 minute ago"]
        );
        assert_eq!(row[1].color, Some(StatusColor::Green));
        assert!(row.iter().enumerate().all(|(i, c)| i == 1 || c.color.is_none()));
    }

    #[test]
    fn test_worker_row_unknown_status_uncolored() {
        let now = Utc::now();
        let worker = WorkerRecord::new(1, "booting", now);
        let row = worker_row(&worker, ByteUnits::Decimal, now);
        assert_eq!(row[1].text, "booting");
        assert_eq!(row[1].color, None);
    }

    #[test]
    fn test_service_worker_row_columns() {
        let worker = WorkerRecord::new(9, WorkerStatus::Errored, Utc::now())
            .num_execs(77)
            .memory_usage(1536)
            .cpu_percent(0.5)
            .command("php consumer.php --queue=default");

        let row = service_worker_row(&worker, ByteUnits::Binary);
        assert_eq!(
            texts(&row),
            vec!["9", "1.5 KiB", "0.50", "php consumer.php --queue=default"]
        );
    }

    #[test]
    fn test_job_row_columns() {
        let job = JobQueueRecord::new("emails", "amqp", "default")
            .ready(true)
            .counters(3, 10, 1);
        assert_eq!(
            texts(&job_row(&job)),
            vec!["READY", "emails", "amqp", "default", "3", "10", "1"]
        );

        let paused = JobQueueRecord::new("reports", "redis", "low");
        assert_eq!(job_row(&paused)[0].text, "PAUSED/STOPPED");
    }
}
