//! Transfer-related types
//!
//! This module defines the transfer type enumeration, the caller-facing
//! transfer request, the signed record appended to the transfer ledger, and
//! the lenient view of entries already stored there.

use super::error::AccountError;
use super::timestamp::{epoch_seconds, truncate_to_micros};
use crate::core::signature;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Transfer types accepted by the ledger
///
/// Parsing is case-sensitive: only the upper-case names are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferType {
    Ordinary,
    Urgent,
    Immediate,
}

impl TransferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferType::Ordinary => "ORDINARY",
            TransferType::Urgent => "URGENT",
            TransferType::Immediate => "IMMEDIATE",
        }
    }
}

impl FromStr for TransferType {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORDINARY" => Ok(TransferType::Ordinary),
            "URGENT" => Ok(TransferType::Urgent),
            "IMMEDIATE" => Ok(TransferType::Immediate),
            _ => Err(AccountError::invalid_transfer_type(s)),
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated transfer request as supplied by a caller
///
/// All fields are raw; the transfer pipeline validates them in order
/// (from IBAN, to IBAN, type, concept, date, amount).
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub from_iban: String,
    pub to_iban: String,
    pub concept: String,
    pub transfer_type: String,
    /// Date in `D/M/YYYY` form
    pub date: String,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        from_iban: &str,
        to_iban: &str,
        concept: &str,
        transfer_type: &str,
        date: &str,
        amount: Decimal,
    ) -> Self {
        TransferRequest {
            from_iban: from_iban.to_string(),
            to_iban: to_iban.to_string(),
            concept: concept.to_string(),
            transfer_type: transfer_type.to_string(),
            date: date.to_string(),
            amount,
        }
    }
}

/// A validated transfer, as stored in the transfer ledger
///
/// `transfer_code` is an MD5 digest over every other field, including the
/// construction timestamp. Two records share a code only when all business
/// fields match and they were built within the same microsecond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    from_iban: String,
    to_iban: String,
    transfer_type: TransferType,
    #[serde(with = "rust_decimal::serde::float")]
    transfer_amount: Decimal,
    transfer_concept: String,
    transfer_date: String,
    #[serde(rename = "time_stamp", with = "epoch_seconds")]
    timestamp: DateTime<Utc>,
    transfer_code: String,
}

impl TransferRecord {
    /// Build and sign a transfer record from validated values
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Signature` if the canonical form cannot be built.
    pub fn new(
        from_iban: &str,
        to_iban: &str,
        transfer_type: TransferType,
        concept: &str,
        transfer_date: &str,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, AccountError> {
        let mut record = TransferRecord {
            from_iban: from_iban.to_string(),
            to_iban: to_iban.to_string(),
            transfer_type,
            transfer_amount: amount,
            transfer_concept: concept.to_string(),
            transfer_date: transfer_date.to_string(),
            timestamp: truncate_to_micros(timestamp),
            transfer_code: String::new(),
        };
        record.transfer_code = record.compute_code()?;
        Ok(record)
    }

    fn compute_code(&self) -> Result<String, AccountError> {
        signature::transfer_code(&signature::TransferFields {
            from_iban: &self.from_iban,
            to_iban: &self.to_iban,
            transfer_type: self.transfer_type,
            concept: &self.transfer_concept,
            transfer_date: &self.transfer_date,
            amount: &self.transfer_amount,
            timestamp: &self.timestamp,
        })
    }

    pub fn from_iban(&self) -> &str {
        &self.from_iban
    }

    pub fn to_iban(&self) -> &str {
        &self.to_iban
    }

    pub fn transfer_type(&self) -> TransferType {
        self.transfer_type
    }

    pub fn concept(&self) -> &str {
        &self.transfer_concept
    }

    pub fn transfer_date(&self) -> &str {
        &self.transfer_date
    }

    pub fn amount(&self) -> Decimal {
        self.transfer_amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// 32-character lowercase hex MD5 transfer code
    pub fn transfer_code(&self) -> &str {
        &self.transfer_code
    }

    /// Recompute the code from the stored fields and compare
    pub fn verify(&self) -> bool {
        self.compute_code()
            .map(|code| code == self.transfer_code)
            .unwrap_or(false)
    }
}

/// One stored transfer ledger entry, kept exactly as it was read
///
/// Only `transfer_code` is ever inspected. Entries written by older tools
/// or edited by hand survive a load/save cycle unchanged, whatever their
/// other fields look like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerEntry(Value);

impl LedgerEntry {
    /// Ledger form of a freshly signed record
    pub fn from_record(record: &TransferRecord) -> Result<Self, AccountError> {
        serde_json::to_value(record)
            .map(LedgerEntry)
            .map_err(|e| AccountError::signature(e.to_string()))
    }

    /// The entry's `transfer_code`, if it has a string one
    pub fn transfer_code(&self) -> Option<&str> {
        self.0.get("transfer_code").and_then(Value::as_str)
    }

    /// Decode the entry as a full record, if it matches the record layout
    pub fn to_record(&self) -> Option<TransferRecord> {
        serde_json::from_value(self.0.clone()).ok()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
