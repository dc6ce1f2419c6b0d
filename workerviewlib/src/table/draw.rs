//! Drawing: hand a `StatusTable` to comfy-table and emit text.

use comfy_table::{presets, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::io::{self, Write};

use super::{StatusTable, TableCell};
use crate::format::StatusColor;
use crate::options::ColorMode;

impl From<StatusColor> for Color {
    fn from(color: StatusColor) -> Self {
        match color {
            StatusColor::Yellow => Color::Yellow,
            StatusColor::Cyan => Color::Cyan,
            StatusColor::Green => Color::Green,
            StatusColor::Red => Color::Red,
        }
    }
}

fn to_cell(cell: &TableCell) -> Cell {
    let out = Cell::new(&cell.text);
    match cell.color {
        Some(color) => out.fg(color.into()),
        None => out,
    }
}

impl StatusTable {
    /// Build the comfy-table for this status table.
    pub fn draw(&self, color: ColorMode) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);

        if self.layout.wrap {
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_width(self.layout.max_width);
        } else {
            table.set_content_arrangement(ContentArrangement::Disabled);
        }

        if color.enabled() {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }

        let headers: Vec<Cell> = self
            .headers
            .iter()
            .map(|h| {
                if self.layout.header_auto_format {
                    Cell::new(h.to_uppercase())
                } else {
                    Cell::new(h)
                }
            })
            .collect();
        table.set_header(headers);

        for row in &self.rows {
            table.add_row(row.iter().map(to_cell).collect::<Vec<_>>());
        }

        for column in table.column_iter_mut() {
            column.set_cell_alignment(CellAlignment::Left);
        }

        table
    }

    /// Draw the table and write it, newline-terminated, into `sink`.
    pub fn write_to<W: Write>(&self, sink: &mut W, color: ColorMode) -> io::Result<()> {
        writeln!(sink, "{}", self.draw(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{JobQueueRecord, WorkerRecord, WorkerStatus};
    use crate::options::RenderOptions;
    use crate::table::{job_table, service_worker_table, worker_table};
    use chrono::Utc;

    #[test]
    fn test_headers_upper_cased() {
        let table = worker_table(&[], None, &RenderOptions::new());
        let text = table.draw(ColorMode::Never).to_string();
        for header in ["PID", "STATUS", "EXECS", "MEMORY", "CPU%", "CREATED"] {
            assert!(text.contains(header), "missing {header} in\n{text}");
        }
    }

    #[test]
    fn test_no_ansi_when_colors_disabled() {
        let workers = vec![WorkerRecord::new(1, WorkerStatus::Working, Utc::now())];
        let text = worker_table(&workers, None, &RenderOptions::new())
            .draw(ColorMode::Never)
            .to_string();
        assert!(text.contains("working"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_ansi_when_colors_forced() {
        let workers = vec![WorkerRecord::new(1, WorkerStatus::Stopped, Utc::now())];
        let text = worker_table(&workers, None, &RenderOptions::new())
            .draw(ColorMode::Always)
            .to_string();
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_width_is_bounded() {
        let long = "x".repeat(400);
        let workers = vec![WorkerRecord::new(1, WorkerStatus::Ready, Utc::now()).command(long)];
        let text = service_worker_table(&workers, &RenderOptions::new())
            .draw(ColorMode::Never)
            .to_string();
        assert!(text.lines().all(|l| l.chars().count() <= 150));
    }

    #[test]
    fn test_job_table_does_not_wrap() {
        let long = "pipeline-".repeat(30);
        let jobs = vec![JobQueueRecord::new(long.clone(), "amqp", "default")];
        let text = job_table(&jobs, None, &RenderOptions::new())
            .draw(ColorMode::Never)
            .to_string();
        assert!(text.contains(&long));
    }

    #[test]
    fn test_write_to_appends_newline() {
        let mut out = Vec::new();
        worker_table(&[], None, &RenderOptions::new())
            .write_to(&mut out, ColorMode::Never)
            .unwrap();
        assert!(out.ends_with(b"\n"));
    }
}
