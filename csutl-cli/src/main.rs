//! csutl - command line utility for the CoinSpot REST API
//!
//! Usage examples:
//! ```bash
//! csutl get /pubapi/v2/latest/BTC
//! csutl balance -t BTC
//! csutl price_history -s -a 3d BTC
//! echo '{"cointype":"BTC"}' | csutl post /api/v2/ro/my/balances
//! csutl market buy BTC aud 100
//! ```
//!
//! Private commands read credentials from `COINSPOT_API_KEY` and
//! `COINSPOT_API_SECRET`.

mod args;
mod commands;
mod output;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use csutl_rest::{ClientConfig, CoinSpotClient};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.debug);

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if args.debug {
                error!("{:?}", e);
            } else {
                error!("{:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<()> {
    let config = ClientConfig::new()
        .with_base_url(&args.base_url)
        .with_raw_output(args.raw_output);
    let client = CoinSpotClient::with_config(config).context("failed to create HTTP client")?;

    let output = commands::run(&args.command, &client, args.raw_output, io::stdin().lock())?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output).context("failed to write output")?;
    stdout.flush().context("failed to flush output")?;
    Ok(())
}

/// Log to stderr, `-d` raises the level to debug and `RUST_LOG` overrides both
fn init_logger(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
