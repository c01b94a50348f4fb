/// Builds the typed EIP-712 message from a caller order
///
/// This is the boundary where human-readable order fields become contract
/// units: instrument names resolve to 256-bit asset ids, decimal sizes and
/// prices become fixed-point integers, and the time-in-force string maps
/// to its numeric wire code. Leg order is preserved; it participates in
/// the hash.

use crate::decimal::{to_scaled_u64, PRICE_SCALE};
use crate::eip712::hex_to_u256_bytes;
use crate::error::{Result, SignerError};
use crate::types::{InstrumentMap, LegMessage, OrderMessage, OrderRequest, TimeInForce};

pub fn build_order_message(
    order: &OrderRequest,
    instruments: &InstrumentMap,
) -> Result<OrderMessage> {
    let mut legs = Vec::with_capacity(order.legs.len());
    for leg in &order.legs {
        let instrument = instruments
            .get(&leg.instrument)
            .ok_or_else(|| SignerError::InvalidInstrument(leg.instrument.clone()))?;

        let asset_id = hex_to_u256_bytes(&instrument.instrument_hash)
            .map_err(|_| SignerError::InvalidInstrument(leg.instrument.clone()))?;

        legs.push(LegMessage {
            asset_id,
            contract_size: to_scaled_u64(&leg.size, instrument.base_decimals)?,
            limit_price: to_scaled_u64(&leg.limit_price, PRICE_SCALE)?,
            is_buying_contract: leg.is_buying_asset,
        });
    }

    let time_in_force: TimeInForce = order.time_in_force.parse()?;

    Ok(OrderMessage {
        sub_account_id: order.sub_account_id,
        is_market: order.is_market,
        time_in_force: time_in_force.wire_code(),
        post_only: order.post_only,
        reduce_only: order.reduce_only,
        legs,
        nonce: order.signature.nonce,
        expiration: order.signature.expiration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Instrument;
    use serde_json::json;

    fn btc_instruments() -> InstrumentMap {
        let mut map = InstrumentMap::new();
        map.insert(
            "BTC_USDT_Perp".to_string(),
            Instrument {
                instrument_hash: "0x030501".to_string(),
                base_decimals: 9,
            },
        );
        map
    }

    fn sample_order() -> OrderRequest {
        OrderRequest::from_json(&json!({
            "sub_account_id": "507846889459127",
            "time_in_force": "GOOD_TILL_TIME",
            "legs": [{
                "instrument": "BTC_USDT_Perp",
                "size": "1.5",
                "limit_price": "115038.01",
                "is_buying_asset": true
            }],
            "signature": { "expiration": "1697788800000000000", "nonce": 1234567890 }
        }))
        .unwrap()
    }

    #[test]
    fn test_builds_contract_units() {
        let msg = build_order_message(&sample_order(), &btc_instruments()).unwrap();
        assert_eq!(msg.sub_account_id, 507846889459127);
        assert_eq!(msg.time_in_force, 1);
        assert_eq!(msg.legs.len(), 1);
        assert_eq!(msg.legs[0].contract_size, 1_500_000_000);
        assert_eq!(msg.legs[0].limit_price, 115_038_010_000_000);
        assert!(msg.legs[0].is_buying_contract);
        assert_eq!(&msg.legs[0].asset_id[29..], &[0x03, 0x05, 0x01]);
        assert_eq!(msg.nonce, 1234567890);
        assert_eq!(msg.expiration, 1697788800000000000);
    }

    #[test]
    fn test_missing_instrument_is_hard_error() {
        let mut order = sample_order();
        order.legs[0].instrument = "DOGE_USDT_Perp".to_string();
        let err = build_order_message(&order, &btc_instruments()).unwrap_err();
        assert!(matches!(err, SignerError::InvalidInstrument(ref name) if name == "DOGE_USDT_Perp"));
    }

    #[test]
    fn test_malformed_instrument_hash_is_rejected() {
        let mut map = btc_instruments();
        map.get_mut("BTC_USDT_Perp").unwrap().instrument_hash = "0xnothex".to_string();
        let err = build_order_message(&sample_order(), &map).unwrap_err();
        assert!(matches!(err, SignerError::InvalidInstrument(_)));
    }

    #[test]
    fn test_unmapped_time_in_force_is_rejected() {
        let mut order = sample_order();
        order.time_in_force = "UNTIL_FURTHER_NOTICE".to_string();
        let err = build_order_message(&order, &btc_instruments()).unwrap_err();
        assert!(matches!(err, SignerError::InvalidTimeInForce(_)));
    }

    #[test]
    fn test_leg_order_is_preserved() {
        let mut map = btc_instruments();
        map.insert(
            "ETH_USDT_Perp".to_string(),
            Instrument {
                instrument_hash: "0x030401".to_string(),
                base_decimals: 9,
            },
        );
        let order = OrderRequest::from_json(&json!({
            "sub_account_id": 1,
            "legs": [
                { "instrument": "ETH_USDT_Perp", "size": "2", "limit_price": "3500", "is_buying_asset": false },
                { "instrument": "BTC_USDT_Perp", "size": "0.1", "limit_price": "115000", "is_buying_asset": true }
            ],
            "signature": { "expiration": 1, "nonce": 1 }
        }))
        .unwrap();

        let msg = build_order_message(&order, &map).unwrap();
        assert_eq!(&msg.legs[0].asset_id[29..], &[0x03, 0x04, 0x01]);
        assert_eq!(&msg.legs[1].asset_id[29..], &[0x03, 0x05, 0x01]);
    }
}
