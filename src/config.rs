use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::client::MAX_RESULTS;
use crate::report::ReportRequest;
use crate::timezone::LOCAL;

#[derive(Parser, Debug)]
#[command(name = "jira-timeline", about = "Status transition timelines for Jira issues")]
pub struct Cli {
    /// Jira base URL
    #[arg(long, env = "JIRA_URL")]
    pub url: Option<String>,

    /// Username of the Jira user
    #[arg(long, env = "JIRA_USERNAME")]
    pub username: Option<String>,

    /// Password or API token of the Jira user
    #[arg(long, env = "JIRA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// JQL selecting the issues
    #[arg(long, env = "JIRA_JQL")]
    pub jql: Option<String>,

    /// Timezone for timestamps (IANA name, UTC or Local)
    #[arg(long = "tz", env = "JIRA_TZ")]
    pub timezone: Option<String>,

    /// Maximum number of issues to fetch
    #[arg(long, default_value_t = MAX_RESULTS, value_parser = clap::value_parser!(u32).range(1..=MAX_RESULTS as i64))]
    pub max_results: u32,

    /// Config file path (defaults to the user config directory)
    #[arg(long, env = "JIRA_TIMELINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path
    #[arg(long, env = "JIRA_TIMELINE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub jql: Option<String>,
    pub timezone: Option<String>,
}

impl ConfigFile {
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("jira-timeline").join("config.toml"))
    }

    /// Read the config file. A missing default file is not an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.display().to_string(), e))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Read(String, std::io::Error),
    #[error("invalid config {0}: {1}")]
    Parse(String, toml::de::Error),
    #[error("missing {0} (pass --{0} or set it in the config file)")]
    Missing(&'static str),
}

/// Settings for one run, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub username: String,
    pub password: Option<String>,
    pub jql: String,
    pub timezone: String,
    pub max_results: u32,
}

impl Config {
    /// Command-line and environment values win over the config file.
    pub fn from_sources(cli: Cli, file: ConfigFile) -> Result<Self, ConfigError> {
        let url = cli.url.or(file.url).ok_or(ConfigError::Missing("url"))?;
        let jql = cli.jql.or(file.jql).ok_or(ConfigError::Missing("jql"))?;

        Ok(Self {
            url,
            username: cli.username.or(file.username).unwrap_or_default(),
            password: cli.password.or(file.password),
            jql,
            timezone: cli
                .timezone
                .or(file.timezone)
                .unwrap_or_else(|| LOCAL.to_string()),
            max_results: cli.max_results.min(MAX_RESULTS),
        })
    }

    pub fn report_request(&self) -> ReportRequest {
        ReportRequest {
            jql: self.jql.clone(),
            timezone: self.timezone.clone(),
            max_results: self.max_results,
        }
    }
}
