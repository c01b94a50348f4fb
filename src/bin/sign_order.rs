//! GRVT Order Signer
//!
//! Signs an order JSON file with EIP-712 and prints the signature, the
//! auditable `{domain, types, message}` structure, and the complete
//! order payload ready for API submission.
//!
//! Usage:
//!   cargo run --bin sign_order -- <order.json> [instruments.json]
//!
//! Environment variables (a .env file is honored):
//!   GRVT_PRIVATE_KEY  hex private key, with or without 0x prefix (required)
//!   GRVT_ENV          dev | staging | testnet | prod (default: testnet)
//!   GRVT_CHAIN_ID     optional chain id override
//!
//! When no instruments file is given, instrument metadata is fetched from
//! the environment's market-data API.

use anyhow::{Context, Result};
use chrono::DateTime;
use dotenv::dotenv;
use std::env;
use std::fs;
use tracing::info;

use grvt_order_signer::{
    fetch_instruments, load_instruments_file, sign_order_with_chain_id, Environment,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    grvt_order_signer::init_logging();

    let mut args = env::args().skip(1);
    let order_path = args.next().unwrap_or_else(|| "create_order_data.json".to_string());
    let instruments_path = args.next();

    let environment: Environment = env::var("GRVT_ENV")
        .unwrap_or_else(|_| "testnet".to_string())
        .parse()?;
    let private_key =
        env::var("GRVT_PRIVATE_KEY").context("GRVT_PRIVATE_KEY must be set (never passed as an argument)")?;
    let chain_id = match env::var("GRVT_CHAIN_ID") {
        Ok(raw) => Some(raw.parse::<u64>().context("GRVT_CHAIN_ID must be an integer")?),
        Err(_) => None,
    };

    let order_json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(&order_path)
            .with_context(|| format!("failed to read order file {}", order_path))?,
    )
    .with_context(|| format!("invalid JSON in {}", order_path))?;

    let instruments = match &instruments_path {
        Some(path) => {
            info!("Loading instruments from {}", path);
            load_instruments_file(path)?
        }
        None => fetch_instruments(environment).await?,
    };

    info!("Signing order from {} for {}", order_path, environment);
    let result = sign_order_with_chain_id(
        &order_json,
        &instruments,
        &private_key,
        environment,
        chain_id,
    )?;

    println!("Signer: {}", result.signer);
    println!("R: {}", result.r);
    println!("S: {}", result.s);
    println!("V: {}", result.v);
    println!("Digest: {}", result.digest);

    let expiration = result.payload_to_sign.message["expiration"]
        .as_i64()
        .unwrap_or_default();
    if let Some(when) = DateTime::from_timestamp(
        expiration.div_euclid(1_000_000_000),
        expiration.rem_euclid(1_000_000_000) as u32,
    ) {
        println!("Expiration: {} ({})", expiration, when.to_rfc3339());
    }

    println!("\nPayload to sign:");
    println!("{}", serde_json::to_string_pretty(&result.payload_to_sign)?);

    println!("\nComplete order payload (ready for API submission):");
    println!("{}", serde_json::to_string_pretty(&result.complete_order_payload)?);

    Ok(())
}
