use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cairn::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    cli::run(Cli::parse()).await
}
