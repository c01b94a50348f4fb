/// Top-level order signing flow
///
/// Wires the pipeline together: normalize the order JSON, build the typed
/// message against the instrument map, derive the EIP-712 domain for the
/// environment, hash, sign, and assemble the submission payload. Every
/// stage is a pure function of its inputs; concurrent calls share nothing
/// but the constant schema and chain-id tables.

use serde::Serialize;
use serde_json::Value;

use crate::eip712::{self, Eip712Domain};
use crate::env::Environment;
use crate::error::Result;
use crate::message::build_order_message;
use crate::payload::build_signed_payload;
use crate::types::{InstrumentMap, OrderRequest};

/// The exact `{domain, types, message}` structure that was hashed,
/// exposed for independent verification and auditing
#[derive(Debug, Clone, Serialize)]
pub struct TypedData {
    pub domain: Value,
    pub types: Value,
    pub message: Value,
}

/// Everything a caller needs from one signing operation
#[derive(Debug, Clone, Serialize)]
pub struct SigningResult {
    pub signer: String,
    pub r: String,
    pub s: String,
    pub v: u8,
    /// The 32-byte digest that was signed, for debugging/auditing
    pub digest: String,
    pub payload_to_sign: TypedData,
    /// Ready-to-submit order payload, original fields merged with the
    /// signature
    pub complete_order_payload: Value,
}

/// Sign an order for the given environment using its fixed chain id
pub fn sign_order(
    order_json: &Value,
    instruments: &InstrumentMap,
    private_key: &str,
    env: Environment,
) -> Result<SigningResult> {
    sign_order_with_chain_id(order_json, instruments, private_key, env, None)
}

/// Sign an order, optionally overriding the environment's chain id
pub fn sign_order_with_chain_id(
    order_json: &Value,
    instruments: &InstrumentMap,
    private_key: &str,
    env: Environment,
    chain_id: Option<u64>,
) -> Result<SigningResult> {
    let order = OrderRequest::from_json(order_json)?;
    let message = build_order_message(&order, instruments)?;

    let domain = match chain_id {
        Some(id) => Eip712Domain::with_chain_id(id),
        None => Eip712Domain::new(env),
    };

    let digest = eip712::signing_digest(&domain, &message);
    let signature = eip712::sign_digest(&digest, private_key)?;

    let complete_order_payload = build_signed_payload(
        order_json,
        &signature,
        message.nonce,
        message.expiration,
    )?;

    Ok(SigningResult {
        signer: signature.signer.to_checksum(),
        r: signature.r_hex(),
        s: signature.s_hex(),
        v: signature.v,
        digest: format!("0x{}", hex::encode(digest)),
        payload_to_sign: TypedData {
            domain: domain.to_json(),
            types: eip712::types_json(),
            message: message.to_json(),
        },
        complete_order_payload,
    })
}
