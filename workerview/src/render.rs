//! Turn a loaded snapshot into titled table sections and emit them.

use anyhow::{anyhow, bail};
use console::style;
use serde::Serialize;
use std::io::Write;
use workerviewlib::{
    job_table, service_worker_table, worker_table, ColorMode, OutputFormat, RenderOptions,
    Snapshot, StatusTable,
};

/// One table plus the line printed above it
#[derive(Debug, Serialize)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub table: StatusTable,
}

/// Worker tables, one per plugin in name order.
///
/// With an upstream error, a single error table replaces all pools.
pub fn worker_sections(
    snapshot: &Snapshot,
    plugins: &[String],
    opts: &RenderOptions,
) -> anyhow::Result<Vec<Section>> {
    if let Some(err) = snapshot.error() {
        return Ok(vec![Section {
            title: Some("Workers:".to_string()),
            table: worker_table(&[], Some(&err), opts),
        }]);
    }

    for name in plugins {
        if !snapshot.workers.contains_key(name) {
            bail!("unknown plugin '{}'", name);
        }
    }

    let sections: Vec<Section> = snapshot
        .workers
        .iter()
        .filter(|(name, _)| plugins.is_empty() || plugins.contains(*name))
        .map(|(name, workers)| Section {
            title: Some(format!("Workers of [{}]:", style(name).yellow())),
            table: worker_table(workers, None, opts),
        })
        .collect();

    if sections.is_empty() {
        tracing::info!("snapshot has no worker pools");
    }
    Ok(sections)
}

/// Service tables, one per service in name order.
///
/// The service table has no error row, so an upstream error is refused here.
pub fn service_sections(snapshot: &Snapshot, opts: &RenderOptions) -> anyhow::Result<Vec<Section>> {
    if let Some(err) = snapshot.error() {
        return Err(anyhow!(err));
    }

    Ok(snapshot
        .services
        .iter()
        .map(|(name, workers)| Section {
            title: Some(format!("Service [{}]:", style(name).yellow())),
            table: service_worker_table(workers, opts),
        })
        .collect())
}

/// The job table, or its error row.
pub fn job_sections(snapshot: &Snapshot, opts: &RenderOptions) -> Vec<Section> {
    let err = snapshot.error();
    vec![Section {
        title: Some("Jobs:".to_string()),
        table: job_table(
            &snapshot.jobs,
            err.as_ref().map(|e| e as &dyn std::error::Error),
            opts,
        ),
    }]
}

/// Every section the snapshot supports.
///
/// Service tables are left out when the snapshot carries an error.
pub fn all_sections(snapshot: &Snapshot, opts: &RenderOptions) -> anyhow::Result<Vec<Section>> {
    let mut sections = worker_sections(snapshot, &[], opts)?;

    match service_sections(snapshot, opts) {
        Ok(services) => sections.extend(services),
        Err(e) => tracing::warn!(error = %e, "skipping service tables"),
    }

    sections.extend(job_sections(snapshot, opts));
    Ok(sections)
}

/// Write sections as drawn tables or as JSON.
pub fn emit<W: Write>(
    out: &mut W,
    sections: &[Section],
    format: OutputFormat,
    color: ColorMode,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, sections)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            for section in sections {
                if let Some(title) = &section.title {
                    writeln!(out, "{}", title)?;
                }
                section.table.write_to(out, color)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use workerviewlib::parse_snapshot;

    const SAMPLE: &str = r#"{
        "workers": {
            "http": [
                {"pid": 42, "status": "working", "created": 0},
                {"pid": 7, "status": "ready", "created": 0}
            ],
            "grpc": [{"pid": 3, "status": "stopped", "created": 0}]
        },
        "services": {
            "consumer": [{"pid": 11, "status": "working", "created": 0, "command": "php consumer.php"}]
        },
        "jobs": [
            {"pipeline": "sms", "driver": "redis", "queue": "q", "ready": true},
            {"pipeline": "emails", "driver": "amqp", "queue": "default"}
        ]
    }"#;

    fn no_color() {
        console::set_colors_enabled(false);
    }

    #[test]
    fn test_worker_sections_per_plugin() {
        no_color();
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        let sections = worker_sections(&snapshot, &[], &RenderOptions::new()).unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title.as_deref(), Some("Workers of [grpc]:"));
        assert_eq!(sections[1].title.as_deref(), Some("Workers of [http]:"));
        assert_eq!(sections[1].table.rows[0][0].text, "7");
    }

    #[test]
    fn test_worker_sections_plugin_filter() {
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        let sections =
            worker_sections(&snapshot, &["http".to_string()], &RenderOptions::new()).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].table.rows.len(), 2);

        let err = worker_sections(&snapshot, &["tcp".to_string()], &RenderOptions::new());
        assert!(err.is_err());
    }

    #[test]
    fn test_error_snapshot() {
        let snapshot = parse_snapshot(r#"{"error": "connection refused"}"#).unwrap();
        let opts = RenderOptions::new();

        let workers = worker_sections(&snapshot, &[], &opts).unwrap();
        assert_eq!(workers.len(), 1);
        assert!(workers[0].table.is_error());

        let err = service_sections(&snapshot, &opts).unwrap_err();
        assert_eq!(err.to_string(), "connection refused");

        let jobs = job_sections(&snapshot, &opts);
        assert_eq!(jobs[0].table.rows[0][0].text, "connection refused");

        let all = all_sections(&snapshot, &opts).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_all_sections_order() {
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        let all = all_sections(&snapshot, &RenderOptions::new()).unwrap();
        let kinds: Vec<_> = all.iter().map(|s| s.table.kind).collect();
        assert_eq!(
            kinds,
            vec![
                workerviewlib::TableKind::Workers,
                workerviewlib::TableKind::Workers,
                workerviewlib::TableKind::ServiceWorkers,
                workerviewlib::TableKind::Jobs,
            ]
        );
    }

    #[test]
    fn test_emit_json() {
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        let sections = job_sections(&snapshot, &RenderOptions::new());
        let mut out = Vec::new();
        emit(&mut out, &sections, OutputFormat::Json, ColorMode::Never).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["title"], "Jobs:");
        assert_eq!(parsed[0]["table"]["rows"][0][1]["text"], "emails");
    }

    #[test]
    fn test_emit_table() {
        no_color();
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        let sections = service_sections(&snapshot, &RenderOptions::new()).unwrap();
        let mut out = Vec::new();
        emit(&mut out, &sections, OutputFormat::Table, ColorMode::Never).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Service [consumer]:\n"));
        assert!(text.contains("COMMAND"));
        assert!(text.contains("php consumer.php"));
    }
}
