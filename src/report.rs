//! Drives one run: search once, then extract and render each issue in order.

use std::io::Write;

use crate::client::IssueTracker;
use crate::error::{TimelineError, TimelineResult};
use crate::timeline::{extract_status_events, write_issue};
use crate::timezone::Timezone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub jql: String,
    pub timezone: String,
    pub max_results: u32,
}

/// Write the timeline of every issue matching the request to `out`.
///
/// The timezone is resolved before the tracker is contacted. An issue's
/// events are extracted in full before its header is written, so a bad
/// timestamp stops the run without emitting any part of that issue.
pub async fn run<W: Write>(
    tracker: &dyn IssueTracker,
    request: &ReportRequest,
    out: &mut W,
) -> TimelineResult<usize> {
    let zone = Timezone::resolve(&request.timezone)?;
    tracing::debug!("Rendering timestamps in {}", zone);

    tracing::info!("Searching issues: {}", request.jql);
    let issues = tracker
        .search_issues(&request.jql, request.max_results)
        .await?;
    tracing::info!("Found {} issues", issues.len());
    if issues.len() >= request.max_results as usize {
        tracing::warn!(
            "Result cap of {} reached, further matching issues were not fetched",
            request.max_results
        );
    }

    for issue in &issues {
        let events = extract_status_events(issue.histories(), &zone).map_err(|source| {
            TimelineError::MalformedTimestamp {
                key: issue.key.clone(),
                source,
            }
        })?;
        tracing::debug!("{}: {} status changes", issue.key, events.len());
        write_issue(out, issue, &events)?;
    }
    out.flush()?;

    Ok(issues.len())
}
