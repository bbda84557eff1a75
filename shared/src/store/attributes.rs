//! Conversion between JSON records and DynamoDB attribute maps.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine;
use serde_json::{Number, Value};

use crate::error::StoreError;
use crate::types::Item;

pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(to_attribute_map(map)),
    }
}

pub fn to_attribute_map(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(k, v)| (k.clone(), to_attribute(v)))
        .collect()
}

pub fn from_attribute(value: &AttributeValue) -> Result<Value, StoreError> {
    let json = match value {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_from_str(n),
        AttributeValue::B(blob) => Value::String(encode_blob(blob.as_ref())),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_from_str(n)).collect()),
        AttributeValue::Bs(set) => Value::Array(
            set.iter()
                .map(|blob| Value::String(encode_blob(blob.as_ref())))
                .collect(),
        ),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(from_attribute)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(from_attribute_map(map)?),
        other => return Err(StoreError::UnsupportedAttribute(format!("{:?}", other))),
    };
    Ok(json)
}

pub fn from_attribute_map(item: &HashMap<String, AttributeValue>) -> Result<Item, StoreError> {
    item.iter()
        .map(|(k, v)| Ok((k.clone(), from_attribute(v)?)))
        .collect()
}

// DynamoDB numbers are decimal strings; keep the string when JSON cannot hold them
fn number_from_str(n: &str) -> Value {
    if let Ok(i) = n.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(u) = n.parse::<u64>() {
        return Value::Number(u.into());
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(n.to_string()))
}

fn encode_blob(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;

    #[test]
    fn writes_nested_record() {
        let item = json!({
            "studentid": "S1",
            "age": 21,
            "active": true,
            "tags": ["a", "b"],
            "address": { "city": "Lagos", "unit": null }
        });
        let attrs = to_attribute_map(item.as_object().unwrap());

        assert_eq!(attrs["studentid"], AttributeValue::S("S1".into()));
        assert_eq!(attrs["age"], AttributeValue::N("21".into()));
        assert_eq!(attrs["active"], AttributeValue::Bool(true));
        assert_eq!(
            attrs["tags"],
            AttributeValue::L(vec![AttributeValue::S("a".into()), AttributeValue::S("b".into())])
        );
        let AttributeValue::M(address) = &attrs["address"] else {
            panic!("address should be a map");
        };
        assert_eq!(address["unit"], AttributeValue::Null(true));
    }

    #[test]
    fn reads_numbers_as_json_numbers() {
        assert_eq!(from_attribute(&AttributeValue::N("42".into())).unwrap(), json!(42));
        assert_eq!(from_attribute(&AttributeValue::N("2.5".into())).unwrap(), json!(2.5));
        assert_eq!(
            from_attribute(&AttributeValue::N("18446744073709551616".into())).unwrap(),
            json!(18446744073709551616.0)
        );
    }

    #[test]
    fn reads_sets_and_binary() {
        let set = AttributeValue::Ss(vec!["x".into(), "y".into()]);
        assert_eq!(from_attribute(&set).unwrap(), json!(["x", "y"]));

        let blob = AttributeValue::B(Blob::new(b"hi".to_vec()));
        assert_eq!(from_attribute(&blob).unwrap(), json!("aGk="));
    }

    #[test]
    fn reads_stored_item() {
        let stored = HashMap::from([
            ("studentid".to_string(), AttributeValue::S("S2".into())),
            ("fname".to_string(), AttributeValue::S("Grace".into())),
            (
                "scores".to_string(),
                AttributeValue::L(vec![AttributeValue::N("90".into())]),
            ),
        ]);
        let item = from_attribute_map(&stored).unwrap();

        assert_eq!(
            Value::Object(item),
            json!({ "studentid": "S2", "fname": "Grace", "scores": [90] })
        );
    }
}
