//! Deposit pipeline
//!
//! Reads a deposit request document, validates it, signs a `DepositRecord`
//! and writes it to its own output file.
//!
//! # Stages
//!
//! 1. **Load**: the input must exist and parse under the strict JSON rules
//! 2. **Validate**: required keys, header constants, then IBAN, amount, date
//! 3. **Sign**: build the record with a fresh timestamp
//! 4. **Persist**: write `deposit_<IBAN>_<seconds>.json`
//!
//! Any failure ends the pipeline before the write, so a rejected request
//! leaves storage untouched.

use crate::core::traits::{Clock, Storage};
use crate::core::validators::{parse_deposit_amount, validate_deposit_date, validate_iban};
use crate::io::json_format::write_json;
use crate::io::strict_json::load_document;
use crate::types::{AccountError, DepositRecord, DEPOSIT_ALGORITHM, DEPOSIT_OPERATION};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Keys every deposit request must carry
pub const REQUIRED_DEPOSIT_KEYS: [&str; 5] = ["alg", "typ", "iban", "amount", "deposit_date"];

/// Deposit pipeline over a storage backend and a clock
#[derive(Debug, Clone)]
pub struct DepositProcessor<S, C> {
    storage: S,
    clock: C,
}

impl<S: Storage, C: Clock> DepositProcessor<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        DepositProcessor { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Process the deposit request stored under `input_key`
    ///
    /// # Returns
    ///
    /// The 64-character SHA-256 signature of the recorded deposit.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if the input does not exist
    /// - `MalformedInput` for invalid JSON, invalid UTF-8, duplicate keys, or a
    ///   non-empty document that is not an object
    /// - `EmptyInput` for an empty document (`{}`, `[]`, `""`, `0`, `null`, `false`)
    /// - `MissingField` listing every absent required key
    /// - `InvalidConstant` if `alg` or `typ` has the wrong value
    /// - `InvalidIban`, `InvalidAmount`, `InvalidDate` from the field validators
    pub fn deposit_into_account(&mut self, input_key: &str) -> Result<String, AccountError> {
        if !self.storage.exists(input_key) {
            return Err(AccountError::file_not_found(input_key));
        }

        let text = self.storage.read(input_key)?;
        let request = request_object(load_document(&text)?)?;
        debug!(input = input_key, keys = request.len(), "deposit request loaded");

        let record = self.build_record(&request)?;
        debug!(iban = record.to_iban(), "deposit request validated");

        write_json(&mut self.storage, &record.file_name(), &record)?;
        info!(
            iban = record.to_iban(),
            amount = %record.amount(),
            signature = record.signature(),
            "deposit recorded"
        );

        Ok(record.signature().to_string())
    }

    /// Validate a loaded request and build the signed record
    fn build_record(&self, request: &Map<String, Value>) -> Result<DepositRecord, AccountError> {
        let missing: Vec<&str> = REQUIRED_DEPOSIT_KEYS
            .iter()
            .copied()
            .filter(|key| !request.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(AccountError::missing_fields(missing));
        }

        expect_constant(request, "alg", DEPOSIT_ALGORITHM)?;
        expect_constant(request, "typ", DEPOSIT_OPERATION)?;

        let iban = validate_iban(text_field(&request["iban"]))?;
        let amount = match request["amount"].as_str() {
            Some(text) => parse_deposit_amount(text)?,
            None => {
                return Err(AccountError::invalid_amount(
                    &request["amount"],
                    "must be a string",
                ))
            }
        };
        validate_deposit_date(text_field(&request["deposit_date"]))?;

        Ok(DepositRecord::new(iban, amount, self.clock.now()))
    }
}

/// Top-level request object; empty documents of any JSON type are `EmptyInput`
fn request_object(document: Value) -> Result<Map<String, Value>, AccountError> {
    match document {
        Value::Object(object) if !object.is_empty() => Ok(object),
        Value::Object(_) | Value::Null | Value::Bool(false) => Err(AccountError::EmptyInput),
        Value::Array(ref items) if items.is_empty() => Err(AccountError::EmptyInput),
        Value::String(ref text) if text.is_empty() => Err(AccountError::EmptyInput),
        Value::Number(ref number) if number.as_f64() == Some(0.0) => Err(AccountError::EmptyInput),
        _ => Err(AccountError::malformed("Deposit request must be a JSON object")),
    }
}

fn expect_constant(
    request: &Map<String, Value>,
    key: &str,
    expected: &str,
) -> Result<(), AccountError> {
    match request.get(key).and_then(Value::as_str) {
        Some(value) if value == expected => Ok(()),
        _ => Err(AccountError::invalid_constant(key, expected)),
    }
}

// Non-string values fail the validators through an empty string.
fn text_field(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}
