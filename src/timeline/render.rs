use std::io::{self, Write};

use chrono::{DateTime, FixedOffset};

use crate::domain::{Issue, StatusEvent};

/// Zone-local timestamp, e.g. `2023-06-30 18:05:09.12 +0900`.
///
/// Fractional seconds drop trailing zeros and vanish entirely when zero.
pub fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    let nanos = at.format("%.9f").to_string();
    let fraction = nanos.trim_end_matches('0').trim_end_matches('.');
    format!(
        "{}{} {}",
        at.format("%Y-%m-%d %H:%M:%S"),
        fraction,
        at.format("%z")
    )
}

/// Lines for one issue block: the `key,summary` header followed by one
/// `,timestamp,status` line per event.
///
/// Commas inside values are written as-is.
pub fn render(issue: &Issue, events: &[StatusEvent]) -> Vec<String> {
    std::iter::once(format!("{},{}", issue.key, issue.summary))
        .chain(
            events
                .iter()
                .map(|event| format!(",{},{}", format_timestamp(&event.at), event.status)),
        )
        .collect()
}

pub fn write_issue<W: Write>(out: &mut W, issue: &Issue, events: &[StatusEvent]) -> io::Result<()> {
    for line in render(issue, events) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
