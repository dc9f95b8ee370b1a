use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dashboard;

use config::AppConfig;
use dashboard::DashboardOptions;

#[derive(Parser)]
#[command(name = "homeboard")]
#[command(about = "Personal dashboard for the terminal", long_about = None)]
struct Cli {
    /// Path to the config file (default: ~/.homeboard/config.toml)
    #[arg(short = 'c', long = "config")]
    config_path: Option<String>,

    /// Log the authorization URL instead of opening a browser
    #[arg(long = "no-open", default_value_t = false)]
    no_open: bool,

    /// Seconds to wait for the authorization redirect to come back
    #[arg(long = "auth-timeout", default_value_t = 180)]
    auth_timeout: u64,

    /// Enable debug output
    #[arg(long = "debug", default_value_t = false)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // The TUI owns the terminal, so logs go to a file next to the config.
    let log_dir = config.log_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory: {}", e);
        std::process::exit(1);
    }
    let file_appender = tracing_appender::rolling::daily(&log_dir, "homeboard.log");
    let (log_writer, _log_guard) = tracing_appender::non_blocking(file_appender);
    let default_filter = if cli.debug { "debug" } else { "error" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_writer)
                .with_ansi(false),
        )
        .init();

    let options = DashboardOptions {
        no_open: cli.no_open,
        auth_timeout: Duration::from_secs(cli.auth_timeout),
    };
    if let Err(e) = dashboard::run(config, options).await {
        eprintln!("Dashboard error: {}", e);
        std::process::exit(1);
    }
}
