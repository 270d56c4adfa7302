use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::domain::{HistoryEntry, StatusEvent};
use crate::timezone::Timezone;

/// Jira's `created` format, e.g. `2023-01-01T09:30:00.000+0900`.
const JIRA_CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

#[derive(Error, Debug)]
#[error("cannot parse {created:?}")]
pub struct MalformedTimestamp {
    pub created: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Parse a history entry's `created` value. RFC 3339 is accepted as well as
/// Jira's own format.
pub fn parse_created(created: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(created, JIRA_CREATED_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(created))
}

/// Status transitions of one issue, in the order the history lists them.
///
/// Every status item of an entry yields its own event carrying the entry's
/// timestamp. The first unparseable `created` aborts extraction.
pub fn extract_status_events(
    entries: &[HistoryEntry],
    zone: &Timezone,
) -> Result<Vec<StatusEvent>, MalformedTimestamp> {
    let mut events = Vec::new();
    for entry in entries {
        let created = parse_created(&entry.created).map_err(|source| MalformedTimestamp {
            created: entry.created.clone(),
            source,
        })?;
        let at = zone.convert(&created);
        events.extend(
            entry
                .items
                .iter()
                .filter(|item| item.is_status())
                .map(|item| StatusEvent {
                    at,
                    status: item.to_string.clone(),
                }),
        );
    }
    Ok(events)
}
