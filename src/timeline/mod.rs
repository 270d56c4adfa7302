//! Status timelines built from issue change history.
//!
//! The history is trusted to arrive in chronological order. Nothing here
//! re-sorts it, so a tracker that returned entries out of order would produce
//! a misordered timeline.

pub mod extract;
pub mod render;

pub use extract::{extract_status_events, parse_created, MalformedTimestamp};
pub use render::{format_timestamp, render, write_issue};
