pub mod jira;
pub mod traits;

pub use jira::JiraClient;
pub use traits::*;
