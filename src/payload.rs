/// Assembles the final submission payload
///
/// A pure merge: the original order fields (metadata and any extra keys
/// included, untouched) with the `signature` object replaced by the real
/// signature components plus the caller's nonce and expiration. Inputs
/// are never mutated.

use serde_json::{json, Map, Value};

use crate::eip712::OrderSignature;
use crate::error::Result;
use crate::types::unwrap_order;

pub fn build_signed_payload(
    order_json: &Value,
    signature: &OrderSignature,
    nonce: u32,
    expiration: i64,
) -> Result<Value> {
    let mut order: Map<String, Value> = serde_json::from_value(unwrap_order(order_json).clone())?;

    order.insert(
        "signature".to_string(),
        json!({
            "r": signature.r_hex(),
            "s": signature.s_hex(),
            "v": signature.v,
            "expiration": expiration,
            "nonce": nonce,
            "signer": signature.signer.to_checksum(),
        }),
    );

    Ok(json!({ "order": Value::Object(order) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eip712::Address;

    fn dummy_signature() -> OrderSignature {
        OrderSignature {
            r: [0x11; 32],
            s: [0x22; 32],
            v: 27,
            signer: Address([0xab; 20]),
        }
    }

    #[test]
    fn test_merges_signature_and_preserves_fields() {
        let order = json!({
            "order": {
                "sub_account_id": "507846889459127",
                "legs": [{ "instrument": "BTC_USDT_Perp", "size": "1.5",
                           "limit_price": "115038.01", "is_buying_asset": true }],
                "signature": { "expiration": "1697788800000000000", "nonce": 1234567890 },
                "metadata": { "client_order_id": "23042" }
            }
        });

        let payload =
            build_signed_payload(&order, &dummy_signature(), 1234567890, 1697788800000000000)
                .unwrap();

        let signed = &payload["order"];
        // untouched pass-through
        assert_eq!(signed["metadata"]["client_order_id"], "23042");
        assert_eq!(signed["sub_account_id"], "507846889459127");
        assert_eq!(signed["legs"][0]["instrument"], "BTC_USDT_Perp");
        // replaced signature block
        let sig = &signed["signature"];
        assert_eq!(sig["r"], format!("0x{}", "11".repeat(32)));
        assert_eq!(sig["s"], format!("0x{}", "22".repeat(32)));
        assert_eq!(sig["v"], 27);
        assert_eq!(sig["nonce"], 1234567890);
        assert_eq!(sig["expiration"], 1697788800000000000i64);
        assert_eq!(sig["signer"], Address([0xab; 20]).to_checksum());

        // inputs were not mutated
        assert_eq!(order["order"]["signature"]["nonce"], 1234567890);
        assert!(order["order"]["signature"].get("r").is_none());
    }

    #[test]
    fn test_accepts_unwrapped_order() {
        let order = json!({
            "sub_account_id": 1,
            "legs": [],
            "signature": { "expiration": 5, "nonce": 7 }
        });
        let payload = build_signed_payload(&order, &dummy_signature(), 7, 5).unwrap();
        assert_eq!(payload["order"]["sub_account_id"], 1);
        assert_eq!(payload["order"]["signature"]["v"], 27);
    }
}
