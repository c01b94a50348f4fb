use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use crate::eip712::u256_to_hex;
use crate::error::SignerError;

/// Time in force for an order, as it appears in the order JSON.
///
/// The EIP-712 message carries the numeric wire code, not the string;
/// the mapping is closed and unmapped strings are rejected at the
/// boundary rather than defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    GoodTillTime,
    AllOrNone,
    ImmediateOrCancel,
    FillOrKill,
}

impl TimeInForce {
    /// Numeric code used in the signed message
    pub fn wire_code(self) -> u8 {
        match self {
            TimeInForce::GoodTillTime => 1,
            TimeInForce::AllOrNone => 2,
            TimeInForce::ImmediateOrCancel => 3,
            TimeInForce::FillOrKill => 4,
        }
    }
}

impl FromStr for TimeInForce {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GOOD_TILL_TIME" => Ok(TimeInForce::GoodTillTime),
            "ALL_OR_NONE" => Ok(TimeInForce::AllOrNone),
            "IMMEDIATE_OR_CANCEL" => Ok(TimeInForce::ImmediateOrCancel),
            "FILL_OR_KILL" => Ok(TimeInForce::FillOrKill),
            other => Err(SignerError::InvalidTimeInForce(other.to_string())),
        }
    }
}

/// Instrument metadata needed for signing: the contract asset id and the
/// number of decimal places implied by the contract's size unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    pub instrument_hash: String,
    pub base_decimals: u32,
}

pub type InstrumentMap = HashMap<String, Instrument>;

/// One leg of an order as provided by the caller.
///
/// Size and price stay as decimal strings until the message builder
/// converts them with exact arithmetic; parsing them into a binary float
/// here would corrupt the digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLegRequest {
    pub instrument: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub size: String,
    #[serde(deserialize_with = "de::string_or_number")]
    pub limit_price: String,
    pub is_buying_asset: bool,
}

/// Nonce and expiration supplied by the caller; carried into the signed
/// message unchanged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureParams {
    #[serde(deserialize_with = "de::u32_flexible")]
    pub nonce: u32,
    #[serde(deserialize_with = "de::i64_flexible")]
    pub expiration: i64,
}

fn default_time_in_force() -> String {
    "GOOD_TILL_TIME".to_string()
}

/// Canonical order shape after boundary normalization.
///
/// The caller may supply the order directly or wrapped under an `order`
/// key; `OrderRequest::from_json` unwraps before deserializing so every
/// internal component sees one fixed shape. Unknown fields (client order
/// ids, metadata, ...) are preserved for the final payload via the raw
/// JSON value, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    #[serde(deserialize_with = "de::u64_flexible")]
    pub sub_account_id: u64,
    #[serde(default)]
    pub is_market: bool,
    #[serde(default = "default_time_in_force")]
    pub time_in_force: String,
    #[serde(default)]
    pub post_only: bool,
    #[serde(default)]
    pub reduce_only: bool,
    pub legs: Vec<OrderLegRequest>,
    pub signature: SignatureParams,
}

impl OrderRequest {
    /// Normalize a possibly-wrapped order JSON value into the canonical shape
    pub fn from_json(value: &Value) -> crate::error::Result<Self> {
        Ok(serde_json::from_value(unwrap_order(value).clone())?)
    }
}

/// Strip the optional `{"order": ...}` wrapper
pub fn unwrap_order(value: &Value) -> &Value {
    value.get("order").unwrap_or(value)
}

/// One leg of the typed EIP-712 message, in contract units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegMessage {
    /// 256-bit asset id, big-endian
    pub asset_id: [u8; 32],
    pub contract_size: u64,
    pub limit_price: u64,
    pub is_buying_contract: bool,
}

impl LegMessage {
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "assetID": u256_to_hex(&self.asset_id),
            "contractSize": self.contract_size,
            "limitPrice": self.limit_price,
            "isBuyingContract": self.is_buying_contract,
        })
    }
}

/// The typed EIP-712 order message: exactly what gets hashed and signed.
///
/// Field order mirrors the contract's Order struct; the hasher walks
/// these fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    pub sub_account_id: u64,
    pub is_market: bool,
    pub time_in_force: u8,
    pub post_only: bool,
    pub reduce_only: bool,
    pub legs: Vec<LegMessage>,
    pub nonce: u32,
    pub expiration: i64,
}

impl OrderMessage {
    /// Render the message as it appears in the auditable `{domain, types,
    /// message}` structure
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "subAccountID": self.sub_account_id,
            "isMarket": self.is_market,
            "timeInForce": self.time_in_force,
            "postOnly": self.post_only,
            "reduceOnly": self.reduce_only,
            "legs": self.legs.iter().map(LegMessage::to_json).collect::<Vec<_>>(),
            "nonce": self.nonce,
            "expiration": self.expiration,
        })
    }
}

/// Deserialization helpers for fields that arrive either as JSON numbers
/// or as decimal strings (the GRVT API uses strings for 64-bit values)
mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr<T> {
        Num(T),
        Str(String),
    }

    pub fn u64_flexible<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        match NumOrStr::<u64>::deserialize(d)? {
            NumOrStr::Num(n) => Ok(n),
            NumOrStr::Str(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }

    pub fn u32_flexible<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        match NumOrStr::<u32>::deserialize(d)? {
            NumOrStr::Num(n) => Ok(n),
            NumOrStr::Str(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }

    pub fn i64_flexible<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        match NumOrStr::<i64>::deserialize(d)? {
            NumOrStr::Num(n) => Ok(n),
            NumOrStr::Str(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }

    /// Keep the exact decimal text; numbers are rendered via their JSON
    /// literal so no binary floating-point value is ever constructed here
    pub fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        match NumOrStr::<serde_json::Number>::deserialize(d)? {
            NumOrStr::Num(n) => Ok(n.to_string()),
            NumOrStr::Str(s) => Ok(s),
        }
    }
}
