/// ECDSA signing of the EIP-712 digest on secp256k1
///
/// Nonce generation is deterministic (RFC 6979), so the same digest and
/// key always produce the same signature bytes. `s` is normalized to the
/// lower half of the curve order and `v` is the Ethereum-style recovery
/// indicator (27/28), letting a verifier recover the signer's public key
/// from (digest, r, s, v) alone.

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use std::fmt;
use zeroize::Zeroizing;

use super::keccak256;
use crate::error::{Result, SignerError};

/// 20-byte Ethereum account address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// EIP-55 checksummed rendering: nibbles of the address are
    /// uppercased where the keccak hash of the lowercase hex is >= 8
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());
        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

/// A complete order signature: the (r, s) pair, the recovery indicator,
/// and the derived signer address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub v: u8,
    pub signer: Address,
}

impl OrderSignature {
    pub fn r_hex(&self) -> String {
        format!("0x{}", hex::encode(self.r))
    }

    pub fn s_hex(&self) -> String {
        format!("0x{}", hex::encode(self.s))
    }
}

/// Address derivation: low-order 20 bytes of the keccak hash of the
/// uncompressed public key (x ‖ y, format byte excluded)
fn derive_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Address(out)
}

/// Parse hex private key material into a signing key.
///
/// The decoded bytes live in a zeroizing buffer and the key itself wipes
/// its scalar on drop; nothing here logs or retains the material.
fn parse_signing_key(private_key: &str) -> Result<SigningKey> {
    let stripped = private_key.trim().trim_start_matches("0x");
    let bytes = Zeroizing::new(
        hex::decode(stripped)
            .map_err(|_| SignerError::InvalidKeyMaterial("not valid hex".to_string()))?,
    );
    if bytes.len() != 32 {
        return Err(SignerError::InvalidKeyMaterial(format!(
            "expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    // Rejects zero and scalars outside the curve order
    SigningKey::from_slice(&bytes)
        .map_err(|_| SignerError::InvalidKeyMaterial("scalar out of curve order range".to_string()))
}

/// Sign a 32-byte EIP-712 digest, producing (r, s, v) and the signer
/// address
pub fn sign_digest(digest: &[u8; 32], private_key: &str) -> Result<OrderSignature> {
    let key = parse_signing_key(private_key)?;

    let (signature, recovery_id) = key
        .sign_prehash_recoverable(digest)
        .map_err(|e| SignerError::InvalidKeyMaterial(format!("signing failed: {}", e)))?;

    // k256 already emits low-s signatures; if that ever changes, fold s
    // into the lower half and flip the recovery parity to match
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(normalized) => (
            normalized,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    };

    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    Ok(OrderSignature {
        r,
        s,
        v: 27 + recovery_id.to_byte(),
        signer: derive_address(key.verifying_key()),
    })
}

/// Recover the signer address from (digest, r, s, v); used by tests and
/// external verifiers to audit a signature without the private key
pub fn recover_signer(digest: &[u8; 32], r: &[u8; 32], s: &[u8; 32], v: u8) -> Result<Address> {
    let recovery_id = v
        .checked_sub(27)
        .and_then(RecoveryId::from_byte)
        .ok_or_else(|| SignerError::InvalidKeyMaterial(format!("invalid v: {}", v)))?;
    let signature = EcdsaSignature::from_scalars(*r, *s)
        .map_err(|e| SignerError::InvalidKeyMaterial(format!("invalid r/s: {}", e)))?;
    let key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
        .map_err(|e| SignerError::InvalidKeyMaterial(format!("recovery failed: {}", e)))?;
    Ok(derive_address(&key))
}
