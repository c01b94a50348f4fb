/// EIP-712 (Ethereum typed structured data) implementation for GRVT order
/// signing
///
/// This module implements the full EIP-712 pipeline in pure Rust, without
/// delegating to a structured-hashing library: the digest algorithm is the
/// system's entire safety property, so it is spelled out here and pinned by
/// fixed test vectors.
///
/// The pipeline:
/// - `schema` — the fixed Order/OrderLeg type graph and canonical
///   `encodeType` strings
/// - `domain` — the EIP-712 domain ("GRVT Exchange", version "0", per-
///   environment chain id)
/// - `hash` — Keccak-256 type hashes, recursive struct hashing, and the
///   final `0x1901 ‖ domainSeparator ‖ structHash` digest
/// - `signing` — deterministic secp256k1 ECDSA over the digest, recovery
///   id, and signer address derivation

mod domain;
mod hash;
mod schema;
mod signing;

pub use domain::{Eip712Domain, CONTRACT_NAME, CONTRACT_VERSION};
pub use hash::{
    hash_domain, hash_order, hash_order_leg, keccak256, signing_digest, type_hash,
};
pub use schema::{encode_type, types_json};
pub use signing::{recover_signer, sign_digest, Address, OrderSignature};

/// Parse a hex string (with or without 0x prefix) into a 32-byte
/// big-endian uint256
pub fn hex_to_u256_bytes(hex_str: &str) -> Result<[u8; 32], String> {
    let cleaned = hex_str.trim_start_matches("0x");
    if cleaned.is_empty() {
        return Err("empty hex string".to_string());
    }

    // Allow odd-length inputs like "0x301" by left-padding a nibble
    let padded;
    let even = if cleaned.len() % 2 == 0 {
        cleaned
    } else {
        padded = format!("0{}", cleaned);
        &padded
    };

    let bytes = hex::decode(even).map_err(|e| format!("Failed to parse hex: {}", e))?;
    if bytes.len() > 32 {
        return Err(format!("value is {} bytes, exceeds uint256", bytes.len()));
    }

    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

/// Render a 32-byte big-endian uint256 as compact 0x-prefixed hex
pub fn u256_to_hex(bytes: &[u8; 32]) -> String {
    let first = bytes.iter().position(|&b| b != 0);
    match first {
        Some(i) => format!("0x{}", hex::encode(&bytes[i..])),
        None => "0x0".to_string(),
    }
}
