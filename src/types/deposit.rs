//! Deposit record
//!
//! A `DepositRecord` is built once per accepted deposit request and never
//! mutated afterwards. Its signature is derived from the other five fields
//! at construction time.

use super::timestamp::{epoch_seconds, truncate_to_micros};
use crate::core::signature;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Algorithm tag stamped on every deposit (and required in deposit input)
pub const DEPOSIT_ALGORITHM: &str = "SHA-256";

/// Operation tag stamped on every deposit (and required in deposit input)
pub const DEPOSIT_OPERATION: &str = "DEPOSIT";

/// An accepted deposit, as written to its per-operation output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositRecord {
    #[serde(rename = "alg")]
    algorithm: String,

    #[serde(rename = "type")]
    operation_type: String,

    to_iban: String,

    #[serde(rename = "deposit_amount", with = "rust_decimal::serde::float")]
    amount: Decimal,

    #[serde(rename = "deposit_date", with = "epoch_seconds")]
    timestamp: DateTime<Utc>,

    #[serde(rename = "deposit_signature")]
    signature: String,
}

impl DepositRecord {
    /// Create a signed deposit record
    ///
    /// The caller supplies already-validated values. `timestamp` is the
    /// construction instant; it is truncated to microseconds before signing.
    pub fn new(to_iban: &str, amount: Decimal, timestamp: DateTime<Utc>) -> Self {
        let timestamp = truncate_to_micros(timestamp);
        let signature = signature::deposit_signature(
            DEPOSIT_ALGORITHM,
            DEPOSIT_OPERATION,
            to_iban,
            &amount,
            &timestamp,
        );

        DepositRecord {
            algorithm: DEPOSIT_ALGORITHM.to_string(),
            operation_type: DEPOSIT_OPERATION.to_string(),
            to_iban: to_iban.to_string(),
            amount,
            timestamp,
            signature,
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn operation_type(&self) -> &str {
        &self.operation_type
    }

    pub fn to_iban(&self) -> &str {
        &self.to_iban
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// 64-character lowercase hex SHA-256 signature
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Name of the per-operation output file: `deposit_<IBAN>_<unix seconds>.json`
    pub fn file_name(&self) -> String {
        format!(
            "deposit_{}_{}.json",
            self.to_iban,
            self.timestamp.timestamp()
        )
    }

    /// Recompute the signature from the stored fields and compare
    pub fn verify(&self) -> bool {
        signature::deposit_signature(
            &self.algorithm,
            &self.operation_type,
            &self.to_iban,
            &self.amount,
            &self.timestamp,
        ) == self.signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DepositRecord {
        DepositRecord::new(
            "ES9121000418450200051332",
            Decimal::new(100050, 2),
            Utc.timestamp_opt(1_751_889_600, 250_000_000).unwrap(),
        )
    }

    #[test]
    fn test_new_deposit_is_signed() {
        let record = sample();
        assert_eq!(record.algorithm(), "SHA-256");
        assert_eq!(record.operation_type(), "DEPOSIT");
        assert_eq!(record.signature().len(), 64);
        assert!(record.verify());
    }

    #[test]
    fn test_file_name_uses_whole_seconds() {
        assert_eq!(
            sample().file_name(),
            "deposit_ES9121000418450200051332_1751889600.json"
        );
    }

    #[test]
    fn test_serialized_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "alg",
                "type",
                "to_iban",
                "deposit_amount",
                "deposit_date",
                "deposit_signature"
            ]
        );
        assert_eq!(object["deposit_amount"], serde_json::json!(1000.5));
    }

    #[test]
    fn test_reloaded_record_still_verifies() {
        let text = serde_json::to_string_pretty(&sample()).unwrap();
        let reloaded: DepositRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded.timestamp(), sample().timestamp());
        assert!(reloaded.verify());
    }

    #[test]
    fn test_tampered_record_fails_verification() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["to_iban"] = serde_json::json!("ES7921000813450200056789");
        let tampered: DepositRecord = serde_json::from_value(value).unwrap();
        assert!(!tampered.verify());
    }
}
