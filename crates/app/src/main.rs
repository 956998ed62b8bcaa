//! Sambharalu - command-line client for the festival records API
//!
//! Resolves the client configuration from the settings file, the
//! environment and the global flags, then runs one command.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sambharalu_infrastructure::{build_client, load_client_config};

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = load_client_config(cli.settings.as_deref()).await;
    if let Some(demo_mode) = cli.mode_override() {
        config = config.with_demo_mode(demo_mode);
    }
    if let Some(base) = &cli.api_base {
        config = config.with_base_url(base);
    }
    if let Some(token) = &cli.token {
        config = config.with_token(token.as_str());
    }

    if config.demo_mode {
        tracing::info!("demo mode: no requests leave this machine");
    }

    let mut client = build_client(config)?;
    commands::run(&mut client, cli.command, cli.settings.as_deref()).await
}
