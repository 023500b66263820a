//! Balance-related types
//!
//! `Transaction` is the balance pipeline's read-only view of an externally
//! produced ledger entry; `BalanceSnapshot` is the derived, overwritable
//! result of summing those entries for one IBAN.

use super::timestamp::epoch_seconds;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger entry key holding the account IBAN
pub const TRANSACTION_IBAN_KEY: &str = "IBAN";

/// Ledger entry key holding the amount text
pub const TRANSACTION_AMOUNT_KEY: &str = "amount";

/// A transaction ledger entry that matched a balance query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub iban: String,
    pub amount: Decimal,
}

/// Derived balance for a single IBAN
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    #[serde(rename = "IBAN")]
    pub iban: String,

    #[serde(with = "epoch_seconds")]
    pub timestamp: DateTime<Utc>,

    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl BalanceSnapshot {
    /// Name of the snapshot file: `balance_<IBAN>.json`
    pub fn file_name(&self) -> String {
        snapshot_file_name(&self.iban)
    }
}

/// Snapshot file name for an IBAN
pub fn snapshot_file_name(iban: &str) -> String {
    format!("balance_{}.json", iban)
}
