//! Strict JSON loading
//!
//! `serde_json` keeps the last occurrence of a repeated object key. Input
//! documents here must instead be rejected when any object, at any depth,
//! names the same key twice. This module deserializes through a custom
//! visitor that tracks the keys of each object scope and fails on the first
//! repeat, producing an insertion-ordered `serde_json::Map`.
//!
//! # Example
//!
//! ```
//! use iban_ledger::io::strict_json::load_object;
//!
//! let object = load_object(r#"{"alg": "SHA-256", "typ": "DEPOSIT"}"#).unwrap();
//! assert_eq!(object.keys().collect::<Vec<_>>(), vec!["alg", "typ"]);
//!
//! assert!(load_object(r#"{"alg": "SHA-256", "alg": "MD5"}"#).is_err());
//! ```

use crate::types::AccountError;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::fmt;

/// A JSON value whose objects are guaranteed free of duplicate keys
struct StrictValue(Value);

impl<'de> Deserialize<'de> for StrictValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StrictVisitor).map(StrictValue)
    }
}

struct StrictVisitor;

impl<'de> Visitor<'de> for StrictVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        StrictValue::deserialize(deserializer).map(|StrictValue(v)| v)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(StrictValue(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            if object.contains_key(&key) {
                return Err(de::Error::custom(format!(
                    "Duplicate {} key found in JSON",
                    key
                )));
            }
            let StrictValue(value) = map.next_value()?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

/// Parse any JSON document, rejecting duplicate keys at every nesting level
///
/// # Errors
///
/// Returns `AccountError::MalformedInput` if the text is not valid JSON or
/// if any object repeats a key.
pub fn load_document(text: &str) -> Result<Value, AccountError> {
    let StrictValue(value) = serde_json::from_str(text)?;
    Ok(value)
}

/// Parse a JSON document whose top level must be an object
///
/// Key order of the returned map follows the input text.
///
/// # Errors
///
/// Returns `AccountError::MalformedInput` for invalid JSON, duplicate keys,
/// or a top-level value that is not an object.
pub fn load_object(text: &str) -> Result<Map<String, Value>, AccountError> {
    match load_document(text)? {
        Value::Object(object) => Ok(object),
        other => Err(AccountError::malformed(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
