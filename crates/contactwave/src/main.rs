// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ContactWave - bulk SMS, WhatsApp, and Telegram messaging from a contact sheet.
//!
//! This is the binary entry point.

mod send;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use contactwave_config::WaveConfig;
use contactwave_core::{HeaderDirectory, WaveError};

/// ContactWave - bulk messaging from a contact sheet.
#[derive(Parser, Debug)]
#[command(name = "contactwave", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log in with this email or mobile number before running the command.
    #[arg(long, global = true)]
    identity: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check credentials against the server.
    Login,
    /// Show the active contact sheet and its columns.
    Headers,
    /// Send a message to selected rows, or to a single test number.
    Send(send::SendArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => contactwave_config::load_and_validate_path(path),
        None => contactwave_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            contactwave_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);
    tracing::debug!(base_url = %config.server.base_url, "configuration loaded");

    if let Err(e) = run(cli, config).await {
        eprintln!("contactwave: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: WaveConfig) -> Result<(), WaveError> {
    match cli.command {
        Commands::Login => {
            let identity = cli
                .identity
                .or_else(|| config.session.identity.clone())
                .ok_or_else(|| {
                    WaveError::Config(
                        "no identity given, pass --identity or set session.identity".into(),
                    )
                })?;
            session::connect(&config, Some(identity.as_str())).await?;
            println!("Login successful.");
            Ok(())
        }
        Commands::Headers => {
            let client = session::connect(&config, cli.identity.as_deref()).await?;
            let source = client.active_source().await?;
            let headers = client.headers(&source).await?;
            println!("Active sheet: {source}");
            for (index, name) in headers.iter().enumerate() {
                println!("{index:>3}  {name}");
            }
            Ok(())
        }
        Commands::Send(args) => {
            let plan = send::SendPlan::prepare(args, &config)?;
            let client = session::connect(&config, cli.identity.as_deref()).await?;
            plan.run(client).await
        }
    }
}

/// Initializes the tracing subscriber on stderr with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("contactwave={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
