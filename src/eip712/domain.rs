/// EIP-712 domain separator data for GRVT
///
/// The domain binds every signature to the exchange contract and a
/// specific chain, preventing replay across environments. Name and
/// version are fixed by the contract; only the chain id varies per
/// environment.

use serde_json::{json, Value};

use crate::env::Environment;

pub const CONTRACT_NAME: &str = "GRVT Exchange";
pub const CONTRACT_VERSION: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
}

impl Eip712Domain {
    /// Domain for a given environment, using its fixed chain id
    pub fn new(env: Environment) -> Self {
        Self::with_chain_id(env.chain_id())
    }

    /// Domain with an explicit chain id override
    pub fn with_chain_id(chain_id: u64) -> Self {
        Self {
            name: CONTRACT_NAME.to_string(),
            version: CONTRACT_VERSION.to_string(),
            chain_id,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "version": self.version,
            "chainId": self.chain_id,
        })
    }
}
