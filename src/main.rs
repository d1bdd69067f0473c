use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tourforge::{run_server, util, Config, ServerConfig, TourforgeCore, WebAppState};

/// Product tour authoring and playback backend
#[derive(Debug, Parser)]
#[command(name = "tourforge", version)]
struct Args {
    /// Host address to bind the web server to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Override the data directory (default ~/.tourforge)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    util::init_data_dir(args.data_dir);

    // Initialize logging to file (~/.tourforge/logs/tourforge.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    // Config file first, command line flags on top
    let config = Config::load();
    let server = ServerConfig {
        host: args.host.unwrap_or_else(|| config.host.clone()),
        port: args.port.unwrap_or(config.port),
        cors_permissive: true,
    };

    let state = WebAppState::new(TourforgeCore::new(config));
    run_server(state, server).await
}
