//! Field renderers: turn one raw record field into display text.
//!
//! Every function here is total. None of them touch the terminal; colors are
//! returned as [`StatusColor`] tags and left to the drawing layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::data::records::WorkerStatus;
use crate::options::ByteUnits;

/// Label shown for a pipeline that is consuming.
pub const READY: &str = "READY";
/// Label shown for a pipeline that is paused or stopped.
pub const PAUSED: &str = "PAUSED/STOPPED";

/// Suffix for timestamps in the past.
const PAST_LABEL: &str = "ago";
/// Suffix for timestamps in the future.
const FUTURE_LABEL: &str = "";

/// Semantic color attached to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Yellow,
    Cyan,
    Green,
    Red,
}

/// Display text for a worker status plus its color tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabel {
    pub text: String,
    pub color: Option<StatusColor>,
}

/// Map a worker status to its label and color.
///
/// Unknown statuses pass through unchanged with no color.
pub fn status_label(status: &WorkerStatus) -> StatusLabel {
    let color = match status {
        WorkerStatus::Inactive => Some(StatusColor::Yellow),
        WorkerStatus::Ready => Some(StatusColor::Cyan),
        WorkerStatus::Working => Some(StatusColor::Green),
        WorkerStatus::Invalid => Some(StatusColor::Yellow),
        WorkerStatus::Stopped => Some(StatusColor::Red),
        WorkerStatus::Errored => Some(StatusColor::Red),
        WorkerStatus::Other(_) => None,
    };

    StatusLabel {
        text: status.as_str().to_string(),
        color,
    }
}

/// `READY` or `PAUSED/STOPPED`.
pub fn ready_label(ready: bool) -> &'static str {
    if ready {
        READY
    } else {
        PAUSED
    }
}

/// Execution count with thousands separators: `1,234,567`.
pub fn format_execs(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

const DECIMAL_SIZES: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
const BINARY_SIZES: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Byte count scaled to the largest unit that keeps the mantissa >= 1.
///
/// `2000000` -> `"2.0 MB"`, `12000000` -> `"12 MB"`, `9` -> `"9 B"`.
pub fn format_bytes(bytes: u64, units: ByteUnits) -> String {
    let (base, sizes) = match units {
        ByteUnits::Decimal => (1000.0_f64, &DECIMAL_SIZES),
        ByteUnits::Binary => (1024.0_f64, &BINARY_SIZES),
    };

    if bytes < 10 {
        return format!("{} B", bytes);
    }

    let value = bytes as f64;
    let exp = (value.ln() / base.ln()).floor();
    let suffix = sizes[(exp as usize).min(sizes.len() - 1)];
    let mantissa = (value / base.powf(exp) * 10.0 + 0.5).floor() / 10.0;

    if mantissa < 10.0 {
        format!("{:.1} {}", mantissa, suffix)
    } else {
        format!("{:.0} {}", mantissa, suffix)
    }
}

/// CPU percentage with exactly two decimals.
pub fn format_cpu(cpu: f64) -> String {
    format!("{:.2}", cpu)
}

const SECOND: u64 = 1;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 12 * MONTH;
const LONG_TIME: u64 = 37 * YEAR;

enum Phrase {
    Now,
    Fixed(&'static str),
    Count(&'static str, u64),
}

/// Upper bounds (exclusive, in seconds) and the phrase used below each.
static MAGNITUDES: [(u64, Phrase); 17] = [
    (SECOND, Phrase::Now),
    (2 * SECOND, Phrase::Fixed("1 second")),
    (MINUTE, Phrase::Count("seconds", SECOND)),
    (2 * MINUTE, Phrase::Fixed("1 minute")),
    (HOUR, Phrase::Count("minutes", MINUTE)),
    (2 * HOUR, Phrase::Fixed("1 hour")),
    (DAY, Phrase::Count("hours", HOUR)),
    (2 * DAY, Phrase::Fixed("1 day")),
    (WEEK, Phrase::Count("days", DAY)),
    (2 * WEEK, Phrase::Fixed("1 week")),
    (MONTH, Phrase::Count("weeks", WEEK)),
    (2 * MONTH, Phrase::Fixed("1 month")),
    (YEAR, Phrase::Count("months", MONTH)),
    (18 * MONTH, Phrase::Fixed("1 year")),
    (2 * YEAR, Phrase::Fixed("2 years")),
    (LONG_TIME, Phrase::Count("years", YEAR)),
    (u64::MAX, Phrase::Fixed("a long while")),
];

/// Age of `created` relative to `now`: `"3 minutes ago"`.
///
/// Timestamps ahead of `now` get the empty future label, so the phrase keeps
/// its trailing space (`"3 minutes "`).
pub fn format_elapsed(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (label, delta) = if created > now {
        (FUTURE_LABEL, created - now)
    } else {
        (PAST_LABEL, now - created)
    };
    let diff = delta.to_std().unwrap_or(Duration::ZERO);

    let (_, phrase) = MAGNITUDES
        .iter()
        .find(|(bound, _)| Duration::from_secs(*bound) > diff)
        .unwrap_or(&MAGNITUDES[MAGNITUDES.len() - 1]);

    match phrase {
        Phrase::Now => "now".to_string(),
        Phrase::Fixed(text) => format!("{} {}", text, label),
        Phrase::Count(unit, div_by) => format!("{} {} {}", diff.as_secs() / div_by, unit, label),
    }
}

/// Age of `created` measured against the current time.
pub fn render_elapsed(created: DateTime<Utc>) -> String {
    format_elapsed(created, Utc::now())
}
