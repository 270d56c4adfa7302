pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod timeline;
pub mod timezone;
