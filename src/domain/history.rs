use chrono::{DateTime, FixedOffset};

/// Field name whose changes make up a timeline.
pub const STATUS_FIELD: &str = "status";

/// One audit-trail record: every field edited at the same instant.
///
/// `created` is kept exactly as the tracker sent it and parsed on extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub created: String,
    pub items: Vec<ChangeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeItem {
    pub field: String,
    pub to_string: String,
}

impl ChangeItem {
    pub fn is_status(&self) -> bool {
        self.field == STATUS_FIELD
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub at: DateTime<FixedOffset>,
    pub status: String,
}
