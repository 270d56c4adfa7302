use async_trait::async_trait;
use thiserror::Error;

use crate::domain::*;

/// Largest batch a single search may ask for.
pub const MAX_RESULTS: u32 = 100;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("authentication failed: {0}")]
    AuthenticationError(String),
    #[error("could not search the issues: {0}")]
    QueryError(String),
    #[error("could not connect to Jira: {0}")]
    ConnectionError(String),
    #[error("parse error: {0}")]
    ParseError(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Issues matching `jql`, with change history, in the tracker's order.
    async fn search_issues(&self, jql: &str, max_results: u32) -> ClientResult<Vec<Issue>>;
}
