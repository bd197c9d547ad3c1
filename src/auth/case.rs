//! Recursive snake-casing of JSON payloads
//!
//! The backend accepts snake_case keys only, while register payloads may
//! carry camelCase keys (profile fields loaded from user-supplied JSON).
//! Every payload is normalized before it goes on the wire.

use serde_json::Value;

/// Convert all object keys in a JSON tree to snake_case, recursing through
/// nested objects and arrays. Non-object values are returned unchanged.
pub fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(snake_case_keys).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (snake_case_key(&key), snake_case_keys(value)))
                .collect(),
        ),
        other => other,
    }
}

/// `companyName` -> `company_name`. Already-snake keys pass through.
fn snake_case_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// True when a key contains an ASCII uppercase letter anywhere in the tree.
/// Test helper for asserting outbound payloads are fully normalized.
pub fn has_camel_case_keys(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().any(has_camel_case_keys),
        Value::Object(map) => map.iter().any(|(key, value)| {
            key.chars().any(|c| c.is_ascii_uppercase()) || has_camel_case_keys(value)
        }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_keys_converted() {
        let converted = snake_case_keys(json!({
            "firstName": "Ada",
            "companyName": "Analytical Engines",
            "email": "ada@example.com"
        }));
        assert_eq!(
            converted,
            json!({
                "first_name": "Ada",
                "company_name": "Analytical Engines",
                "email": "ada@example.com"
            })
        );
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let converted = snake_case_keys(json!({
            "preferredIndustries": ["fintech", "health"],
            "previousInvestments": [
                { "companyName": "Acme", "investmentAmount": "50000" }
            ],
            "profile": { "riskTolerance": "high" }
        }));
        assert_eq!(
            converted,
            json!({
                "preferred_industries": ["fintech", "health"],
                "previous_investments": [
                    { "company_name": "Acme", "investment_amount": "50000" }
                ],
                "profile": { "risk_tolerance": "high" }
            })
        );
        assert!(!has_camel_case_keys(&converted));
    }

    #[test]
    fn test_snake_keys_unchanged() {
        let value = json!({ "first_name": "Ada", "tags": [1, 2] });
        assert_eq!(snake_case_keys(value.clone()), value);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(snake_case_keys(json!("camelCase")), json!("camelCase"));
        assert_eq!(snake_case_keys(json!(42)), json!(42));
        assert_eq!(snake_case_keys(Value::Null), Value::Null);
    }

    #[test]
    fn test_detects_camel_case_deep() {
        let value = json!({ "outer": [{ "inner": { "stillCamel": 1 } }] });
        assert!(has_camel_case_keys(&value));
    }
}
