/// Fixed EIP-712 type schema for GRVT orders
///
/// These tables MUST match exactly what the settlement contract expects;
/// any change to a field name, type, or position breaks signature
/// verification. They are compile-time constants and are never derived
/// from the input message, so a crafted payload cannot alter the hash the
/// contract recomputes.

use serde_json::{json, Value};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: &'static str,
}

pub const ORDER_TYPE: &str = "Order";
pub const ORDER_LEG_TYPE: &str = "OrderLeg";
pub const DOMAIN_TYPE: &str = "EIP712Domain";

pub const ORDER_FIELDS: &[FieldDef] = &[
    FieldDef { name: "subAccountID", ty: "uint64" },
    FieldDef { name: "isMarket", ty: "bool" },
    FieldDef { name: "timeInForce", ty: "uint8" },
    FieldDef { name: "postOnly", ty: "bool" },
    FieldDef { name: "reduceOnly", ty: "bool" },
    FieldDef { name: "legs", ty: "OrderLeg[]" },
    FieldDef { name: "nonce", ty: "uint32" },
    FieldDef { name: "expiration", ty: "int64" },
];

pub const ORDER_LEG_FIELDS: &[FieldDef] = &[
    FieldDef { name: "assetID", ty: "uint256" },
    FieldDef { name: "contractSize", ty: "uint64" },
    FieldDef { name: "limitPrice", ty: "uint64" },
    FieldDef { name: "isBuyingContract", ty: "bool" },
];

// The domain here carries name, version and chainId only; there is no
// verifyingContract field in GRVT's domain
pub const DOMAIN_FIELDS: &[FieldDef] = &[
    FieldDef { name: "name", ty: "string" },
    FieldDef { name: "version", ty: "string" },
    FieldDef { name: "chainId", ty: "uint256" },
];

fn fields_of(type_name: &str) -> Option<&'static [FieldDef]> {
    match type_name {
        ORDER_TYPE => Some(ORDER_FIELDS),
        ORDER_LEG_TYPE => Some(ORDER_LEG_FIELDS),
        DOMAIN_TYPE => Some(DOMAIN_FIELDS),
        _ => None,
    }
}

/// Strip array suffixes: "OrderLeg[]" -> "OrderLeg"
fn base_type(ty: &str) -> &str {
    ty.split('[').next().unwrap_or(ty)
}

/// The type's own declaration: `TypeName(type1 name1,type2 name2,...)`
fn type_declaration(type_name: &str, fields: &[FieldDef]) -> String {
    let inner = fields
        .iter()
        .map(|f| format!("{} {}", f.ty, f.name))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}({})", type_name, inner)
}

/// Canonical EIP-712 `encodeType`: the root type's declaration first,
/// then the declaration of every transitively referenced struct type,
/// each exactly once, sorted lexicographically by type name.
pub fn encode_type(root: &str) -> String {
    let root_fields = fields_of(root).unwrap_or(&[]);

    let mut referenced: BTreeSet<&'static str> = BTreeSet::new();
    let mut pending: Vec<&[FieldDef]> = vec![root_fields];
    while let Some(fields) = pending.pop() {
        for field in fields {
            let base = base_type(field.ty);
            if base != root {
                if let Some(sub) = fields_of(base) {
                    // BTreeSet keeps the sorted, exactly-once property
                    if referenced.insert(base) {
                        pending.push(sub);
                    }
                }
            }
        }
    }

    let mut out = type_declaration(root, root_fields);
    for name in referenced {
        if let Some(fields) = fields_of(name) {
            out.push_str(&type_declaration(name, fields));
        }
    }
    out
}

/// The type map as exposed in the auditable `{domain, types, message}`
/// structure (domain type excluded, matching what verifiers expect to
/// supply themselves)
pub fn types_json() -> Value {
    let render = |fields: &[FieldDef]| -> Value {
        fields
            .iter()
            .map(|f| json!({ "name": f.name, "type": f.ty }))
            .collect()
    };
    json!({
        ORDER_TYPE: render(ORDER_FIELDS),
        ORDER_LEG_TYPE: render(ORDER_LEG_FIELDS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_encode_type() {
        let expected = concat!(
            "Order(uint64 subAccountID,bool isMarket,uint8 timeInForce,bool postOnly,",
            "bool reduceOnly,OrderLeg[] legs,uint32 nonce,int64 expiration)",
            "OrderLeg(uint256 assetID,uint64 contractSize,uint64 limitPrice,bool isBuyingContract)"
        );
        assert_eq!(encode_type(ORDER_TYPE), expected);
    }

    #[test]
    fn test_leaf_encode_type_has_no_references() {
        assert_eq!(
            encode_type(ORDER_LEG_TYPE),
            "OrderLeg(uint256 assetID,uint64 contractSize,uint64 limitPrice,bool isBuyingContract)"
        );
    }

    #[test]
    fn test_domain_encode_type() {
        assert_eq!(
            encode_type(DOMAIN_TYPE),
            "EIP712Domain(string name,string version,uint256 chainId)"
        );
    }

    #[test]
    fn test_types_json_shape() {
        let types = types_json();
        assert_eq!(types["Order"].as_array().unwrap().len(), 8);
        assert_eq!(types["OrderLeg"].as_array().unwrap().len(), 4);
        assert_eq!(types["Order"][5]["name"], "legs");
        assert_eq!(types["Order"][5]["type"], "OrderLeg[]");
    }
}
