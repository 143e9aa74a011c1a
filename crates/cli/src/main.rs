//! `filegate` — signed-token file access gateway.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use filegate_core::FILEGATE_LOG_VAR;

mod commands;

use commands::Commands;

#[derive(Parser)]
#[command(name = "filegate")]
#[command(about = "Token-gated file streaming over an object store", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(FILEGATE_LOG_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_level(true).with_target(true))
        .with(filter)
        .init();

    cli.command.execute().await
}
