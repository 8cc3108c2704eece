mod admin;
mod catalog;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use luxcat_remote::RemoteClient;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "luxcat")]
#[command(about = "Lighting-catalog storefront and back-office CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the public catalog.
    #[command(subcommand)]
    Catalog(catalog::CatalogCommand),
    /// Back-office operations (admin login required).
    Admin {
        #[command(flatten)]
        credentials: admin::Credentials,
        #[command(subcommand)]
        command: admin::AdminCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = luxcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let remote = Arc::new(RemoteClient::from_config(&config)?);

    // One token scopes every store this invocation creates; ctrl-c cancels
    // it so in-flight requests abort instead of patching state mid-teardown.
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("received ctrl-c, cancelling in-flight operations");
                cancel.cancel();
            }
        }
    });

    let cli = Cli::parse();
    match cli.command {
        Commands::Catalog(command) => catalog::run(command, &config, remote, cancel).await,
        Commands::Admin {
            credentials,
            command,
        } => admin::run(&credentials, command, remote, cancel).await,
    }
}
