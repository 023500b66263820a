//! JSON output format
//!
//! Every file this crate writes is pretty-printed UTF-8 JSON with a fixed
//! four-space indent, so rewritten ledgers diff cleanly.

use crate::core::traits::Storage;
use crate::types::AccountError;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const INDENT: &[u8] = b"    ";

/// Serialize a value as four-space indented JSON
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AccountError> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer).map_err(|e| AccountError::Io {
        message: format!("Failed to serialize JSON: {}", e),
    })?;
    String::from_utf8(buffer).map_err(|e| AccountError::Io {
        message: format!("Serialized JSON is not UTF-8: {}", e),
    })
}

/// Serialize a value and store it under `key`, replacing any previous contents
pub fn write_json<S, T>(storage: &mut S, key: &str, value: &T) -> Result<(), AccountError>
where
    S: Storage + ?Sized,
    T: Serialize + ?Sized,
{
    let text = to_pretty_json(value)?;
    storage.write(key, &text)
}
