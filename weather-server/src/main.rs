//! Binary crate for the `weather-server` tool router.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration of the OpenWeather API key
//! - Serving the tool dispatcher over HTTP

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_server=info,weather_tools=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
