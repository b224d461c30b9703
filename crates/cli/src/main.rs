//! TinyYummy CLI - storefront client

mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::{AppContext, Commands};
use std::path::PathBuf;
use std::time::Duration;
use tinyyummy_core::{FileStore, MemoryStore, TokenStore};
use tinyyummy_http::{ApiClient, SessionSupervisor};
use tracing::{Level, error, info};

/// File in the data directory that plays the durable ("remember me") area
const DURABLE_STORE_FILE: &str = "session.json";

#[derive(Parser)]
#[command(name = "tinyyummy")]
#[command(about = "Shop, track orders and manage the TinyYummy storefront")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Data directory for the stored session and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to ./tinyyummy.toml if present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Timeout for the whole command in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let app_config = config::AppConfig::load(cli.config.as_deref())?;
    let data_dir = config::resolve_data_dir(cli.data_dir.clone(), &app_config);
    logging::init_logging(cli.log_level.into(), &data_dir, cli.no_file_log)?;

    info!(data_dir = %data_dir.display(), base_url = %app_config.client.base_url, "Starting TinyYummy CLI");

    let store = TokenStore::new(
        FileStore::open(data_dir.join(DURABLE_STORE_FILE))?,
        MemoryStore::new(),
    );
    let client = ApiClient::from_config(&app_config.client, store.clone())?;

    let supervisor = SessionSupervisor::new(
        store.clone(),
        |route: &str| eprintln!("Your session has ended. Please sign in again ({route})."),
        app_config.client.redirect_delay(),
    )
    .spawn(client.subscribe());

    let ctx = AppContext { client, store };
    let outcome = if cli.timeout == 0 {
        // No timeout - run until the backend answers
        cli.command.execute(&ctx).await
    } else {
        let timeout_duration = Duration::from_secs(cli.timeout);
        match tokio::time::timeout(timeout_duration, cli.command.execute(&ctx)).await {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!(
                "Command timed out after {} seconds",
                cli.timeout
            )),
        }
    };

    // Dropping the last client closes the event channel so the supervisor
    // finishes any pending sign-out and exits
    drop(ctx);
    if let Err(e) = supervisor.await {
        error!("Session supervisor stopped unexpectedly: {e}");
    }

    match outcome {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_login() {
        let cli = Cli::try_parse_from([
            "tinyyummy",
            "login",
            "--email",
            "a@b.com",
            "--password",
            "x",
            "--remember-me",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Login { remember_me: true, .. }
        ));
    }
}
