//! Dynamic response objects and payload coercion.
//!
//! # Design
//! DTO parsers read attributes off a `StripeObject`, whichever path produced
//! it. `StripeClient` coerces parsed response bodies; `FakeClient` coerces
//! registered payloads. Both run through [`coerce`], so a fixture that omits
//! the `object` tag parses exactly like a live response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, StripeError};
use crate::types::StripeResource;

/// Tag written when an identifier prefix is not in the lookup table.
pub const UNKNOWN_OBJECT: &str = "unknown";

/// A Stripe API object with dynamic attribute access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StripeObject {
    values: Map<String, Value>,
}

impl StripeObject {
    pub fn id(&self) -> Option<&str> {
        self.str("id")
    }

    /// The `object` type tag, e.g. `customer`.
    pub fn object_type(&self) -> Option<&str> {
        self.str("object")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// True when the attribute exists and is not null.
    pub fn contains(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|value| !value.is_null())
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    /// A nested attribute as its own object, if it is a JSON object.
    pub fn nested(&self, key: &str) -> Option<StripeObject> {
        match self.values.get(key) {
            Some(Value::Object(map)) => Some(StripeObject { values: map.clone() }),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    /// Parse into a typed DTO.
    pub fn parse<T: StripeResource>(&self) -> Result<T> {
        T::from_object(self)
    }
}

impl From<StripeObject> for Value {
    fn from(object: StripeObject) -> Self {
        Value::Object(object.values)
    }
}

/// Convert a plain payload into a `StripeObject`.
///
/// When `object` is absent and `id` is a string, the tag is inferred from the
/// identifier prefix. An explicit tag is never replaced. Elements of a list
/// envelope's `data` array are coerced the same way.
pub fn coerce(payload: Value) -> Result<StripeObject> {
    match payload {
        Value::Object(mut values) => {
            tag_object(&mut values);
            if values.get("object").and_then(Value::as_str) == Some("list") {
                if let Some(Value::Array(items)) = values.get_mut("data") {
                    for item in items.iter_mut() {
                        if let Value::Object(map) = item {
                            tag_object(map);
                        }
                    }
                }
            }
            Ok(StripeObject { values })
        }
        other => Err(StripeError::Coercion(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn tag_object(values: &mut Map<String, Value>) {
    if values.contains_key("object") {
        return;
    }
    let inferred = match values.get("id").and_then(Value::as_str) {
        Some(id) => infer_object_type(id),
        None => return,
    };
    values.insert("object".to_string(), Value::String(inferred.to_string()));
}

/// Map an identifier prefix (the text before its first `_`) to an object tag.
pub fn infer_object_type(id: &str) -> &'static str {
    let prefix = id.split('_').next().unwrap_or_default();
    match prefix {
        "cus" => "customer",
        "prod" => "product",
        "price" => "price",
        "sub" => "subscription",
        "si" => "subscription_item",
        "in" => "invoice",
        "pi" => "payment_intent",
        "seti" => "setup_intent",
        "pm" => "payment_method",
        "we" => "webhook_endpoint",
        "ba" => "bank_account",
        "fca" => "financial_connections.account",
        "evt" => "event",
        "ch" => "charge",
        "re" => "refund",
        "card" => "card",
        _ => UNKNOWN_OBJECT,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn infers_tag_from_id_prefix() {
        let object = coerce(json!({"id": "cus_123", "email": "a@example.com"})).unwrap();
        assert_eq!(object.object_type(), Some("customer"));
        assert_eq!(object.str("email"), Some("a@example.com"));
    }

    #[test]
    fn explicit_tag_is_never_overridden() {
        let object = coerce(json!({"id": "cus_123", "object": "custom"})).unwrap();
        assert_eq!(object.object_type(), Some("custom"));
    }

    #[test]
    fn unknown_prefix_maps_to_unknown() {
        let object = coerce(json!({"id": "zzz_1"})).unwrap();
        assert_eq!(object.object_type(), Some(UNKNOWN_OBJECT));
    }

    #[test]
    fn payload_without_id_gets_no_tag() {
        let object = coerce(json!({"email": "a@example.com"})).unwrap();
        assert!(object.object_type().is_none());
    }

    #[test]
    fn list_items_are_tagged() {
        let object = coerce(json!({
            "object": "list",
            "data": [{"id": "prod_1"}, {"id": "price_1", "object": "price"}],
        }))
        .unwrap();
        let data = object.get("data").unwrap().as_array().unwrap();
        assert_eq!(data[0]["object"], "product");
        assert_eq!(data[1]["object"], "price");
    }

    #[test]
    fn non_object_payload_fails() {
        let err = coerce(json!(["cus_1"])).unwrap_err();
        assert!(matches!(err, StripeError::Coercion(msg) if msg.contains("array")));
    }

    #[test]
    fn contains_treats_null_as_absent() {
        let object = coerce(json!({"id": "cus_1", "name": null})).unwrap();
        assert!(object.contains("id"));
        assert!(!object.contains("name"));
        assert!(!object.contains("missing"));
    }

    #[test]
    fn nested_returns_child_object() {
        let object = coerce(json!({"id": "price_1", "recurring": {"interval": "month"}})).unwrap();
        assert_eq!(object.nested("recurring").unwrap().str("interval"), Some("month"));
        assert!(object.nested("id").is_none());
    }
}
