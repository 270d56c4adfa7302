use super::HistoryEntry;

/// A work item returned by the tracker's search.
///
/// `changelog` is `None` when the tracker did not send change history for
/// the issue. That is treated the same as an empty history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub changelog: Option<Vec<HistoryEntry>>,
}

impl Issue {
    pub fn histories(&self) -> &[HistoryEntry] {
        self.changelog.as_deref().unwrap_or_default()
    }
}
