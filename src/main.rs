use std::io::{self, BufWriter};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use jira_timeline::client::JiraClient;
use jira_timeline::config::{Cli, Config, ConfigFile};
use jira_timeline::report;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file
    let _guard = init_logging(&cli)?;

    let file = ConfigFile::load(cli.config.as_deref())?;
    let config = Config::from_sources(cli, file)?;

    let client = JiraClient::new(&config.url, config.username.clone(), config.password.clone())
        .wrap_err_with(|| format!("could not set up a client for {}", config.url))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    report::run(&client, &config.report_request(), &mut out).await?;

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the timeline, so logs never go there
    let Some(ref log_file) = cli.log_file else {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(filter)
            .init();
        return Ok(None);
    };

    let file = std::fs::File::create(log_file)
        .wrap_err_with(|| format!("could not create log file {}", log_file.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(Some(guard))
}
