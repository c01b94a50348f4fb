//! Instrument snapshot tool
//!
//! Fetches active instrument metadata (instrument hash + base decimals)
//! from the GRVT market-data API and writes it to a JSON file that the
//! signer can use offline.
//!
//! Usage:
//!   cargo run --bin fetch_instruments -- [output.json]
//!
//! Environment variables (a .env file is honored):
//!   GRVT_ENV  dev | staging | testnet | prod (default: testnet)

use anyhow::Result;
use dotenv::dotenv;
use std::env;
use tracing::info;

use grvt_order_signer::{fetch_instruments, save_instruments_file, Environment};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    grvt_order_signer::init_logging();

    let output = env::args().nth(1).unwrap_or_else(|| "instruments.json".to_string());
    let environment: Environment = env::var("GRVT_ENV")
        .unwrap_or_else(|_| "testnet".to_string())
        .parse()?;

    let instruments = fetch_instruments(environment).await?;
    save_instruments_file(&instruments, &output)?;
    info!("Saved {} instruments to {}", instruments.len(), output);

    Ok(())
}
