/// GRVT environment registry
///
/// Each environment maps to a fixed chain id (used in the EIP-712 domain,
/// so signatures cannot be replayed across environments) and a market-data
/// endpoint for fetching instrument metadata.

use crate::error::SignerError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Dev,
    Staging,
    Testnet,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::Dev,
        Environment::Staging,
        Environment::Testnet,
        Environment::Prod,
    ];

    /// Chain id used in the EIP-712 domain for this environment.
    ///
    /// These are fixed by the exchange's settlement contracts. An order
    /// signed against the wrong chain id is rejected with no feedback,
    /// so the table is never inferred from order content.
    pub fn chain_id(self) -> u64 {
        match self {
            Environment::Dev => 327,
            Environment::Staging => 327,
            Environment::Testnet => 326,
            Environment::Prod => 325,
        }
    }

    /// Market-data endpoint serving instrument metadata for this environment
    pub fn market_data_url(self) -> &'static str {
        match self {
            Environment::Dev => "https://market-data.dev.gravitymarkets.io/full/v1/all_instruments",
            Environment::Staging => {
                "https://market-data.staging.gravitymarkets.io/full/v1/all_instruments"
            }
            Environment::Testnet => "https://market-data.testnet.grvt.io/full/v1/all_instruments",
            Environment::Prod => "https://market-data.grvt.io/full/v1/all_instruments",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Testnet => "testnet",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "testnet" => Ok(Environment::Testnet),
            "prod" | "mainnet" => Ok(Environment::Prod),
            other => Err(SignerError::ConfigurationError(other.to_string())),
        }
    }
}
