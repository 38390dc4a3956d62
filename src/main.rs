use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use tracing_subscriber::EnvFilter;

use returnboard::server::{self, AppState};
use returnboard::source::{DataSource, DEFAULT_SOURCE};
use returnboard::table::Table;

#[derive(Parser, Debug)]
#[command(name = "returnboard")]
#[command(about = "Serve an interactive dashboard of fund return history", long_about = None)]
struct Args {
    #[arg(short = 's', long = "source", default_value = DEFAULT_SOURCE, help = "CSV location (http(s) URL or file path)")]
    source: String,

    #[arg(long = "bind", default_value = "127.0.0.1", help = "Address to listen on")]
    bind: IpAddr,

    #[arg(short = 'p', long = "port", default_value = "8050", help = "Port to listen on")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let source = DataSource::parse(&args.source);
    let table = Table::load(&source)
        .await
        .context("Failed to load return data")?;

    let addr = SocketAddr::new(args.bind, args.port);
    server::serve(addr, AppState::new(table)).await
}
