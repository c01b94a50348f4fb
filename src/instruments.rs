/// Instrument metadata provider
///
/// The signing core consumes an already-validated instrument map; this
/// module is the collaborator that produces one, either from the GRVT
/// market-data API or from a local JSON snapshot. Network timeouts live
/// here, never in the core.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::env::Environment;
use crate::error::{Result, SignerError};
use crate::types::{Instrument, InstrumentMap};

#[derive(Debug, Deserialize)]
struct AllInstrumentsResponse {
    #[serde(default)]
    result: Vec<InstrumentEntry>,
}

#[derive(Debug, Deserialize)]
struct InstrumentEntry {
    instrument: String,
    instrument_hash: String,
    base_decimals: u32,
}

/// Fetch active instruments from the environment's market-data endpoint
pub async fn fetch_instruments(env: Environment) -> Result<InstrumentMap> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("grvt-order-signer/0.1.0")
        .build()?;

    let url = env.market_data_url();
    debug!("Fetching instruments for {} from {}", env, url);

    let response = client.post(url).json(&json!({ "is_active": true })).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!("Market-data API error: {} - {}", status, error_text);
        return Err(SignerError::ApiError(format!(
            "HTTP {}: {}",
            status, error_text
        )));
    }

    let body: AllInstrumentsResponse = response.json().await?;

    let mut instruments = InstrumentMap::new();
    for entry in body.result {
        instruments.insert(
            entry.instrument,
            Instrument {
                instrument_hash: entry.instrument_hash,
                base_decimals: entry.base_decimals,
            },
        );
    }

    info!("Fetched {} instruments from {}", instruments.len(), env);
    Ok(instruments)
}

/// Load an instrument map from a JSON snapshot file
pub fn load_instruments_file<P: AsRef<Path>>(path: P) -> Result<InstrumentMap> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Save an instrument map as a pretty-printed JSON snapshot
pub fn save_instruments_file<P: AsRef<Path>>(instruments: &InstrumentMap, path: P) -> Result<()> {
    let contents = serde_json::to_string_pretty(instruments)?;
    fs::write(path, contents)?;
    Ok(())
}
