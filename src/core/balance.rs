//! Balance pipeline
//!
//! Recomputes an IBAN's balance from the externally produced transaction
//! ledger and writes a `balance_<IBAN>.json` snapshot.
//!
//! Ledger entries that are not objects, or lack an `IBAN` or `amount`
//! field, are skipped. A matching entry whose amount cannot be parsed
//! aborts the whole computation: totals never silently exclude data.

use crate::core::traits::{Clock, Storage};
use crate::core::validators::{parse_ledger_amount, validate_iban};
use crate::io::json_format::write_json;
use crate::types::balance::{TRANSACTION_AMOUNT_KEY, TRANSACTION_IBAN_KEY};
use crate::types::timestamp::truncate_to_micros;
use crate::types::{AccountError, BalanceSnapshot, Transaction};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info};

/// Balance pipeline over a storage backend and a clock
#[derive(Debug, Clone)]
pub struct BalanceCalculator<S, C> {
    storage: S,
    clock: C,
    transactions_key: String,
}

impl<S: Storage, C: Clock> BalanceCalculator<S, C> {
    /// Create a calculator reading the transaction ledger stored under `transactions_key`
    pub fn new(storage: S, clock: C, transactions_key: impl Into<String>) -> Self {
        BalanceCalculator {
            storage,
            clock,
            transactions_key: transactions_key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Every ledger entry recorded against `iban`, in ledger order
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if the ledger is absent
    /// - `MalformedInput` if it is not valid JSON
    /// - `InvalidFormat` if it is not a JSON array
    /// - `InvalidAmount` if a matching entry's amount cannot be parsed
    pub fn transactions_for(&self, iban: &str) -> Result<Vec<Transaction>, AccountError> {
        if !self.storage.exists(&self.transactions_key) {
            return Err(AccountError::file_not_found(&self.transactions_key));
        }

        let text = self.storage.read(&self.transactions_key)?;
        let ledger: Value = serde_json::from_str(&text)
            .map_err(|e| AccountError::malformed(format!("Error decoding JSON file: {}", e)))?;

        let entries = ledger
            .as_array()
            .ok_or_else(|| AccountError::invalid_format("expected a list of transactions"))?;

        let mut matched = Vec::new();
        for entry in entries {
            let Some(object) = entry.as_object() else {
                continue;
            };
            let (Some(entry_iban), Some(amount)) = (
                object.get(TRANSACTION_IBAN_KEY),
                object.get(TRANSACTION_AMOUNT_KEY),
            ) else {
                continue;
            };
            if entry_iban.as_str() != Some(iban) {
                continue;
            }

            matched.push(Transaction {
                iban: iban.to_string(),
                amount: amount_of(amount)?,
            });
        }

        debug!(iban, scanned = entries.len(), matched = matched.len(), "ledger filtered");
        Ok(matched)
    }

    /// Sum every ledger amount for `iban` and persist the snapshot
    ///
    /// # Errors
    ///
    /// - `InvalidIban` if `iban` is not a valid Spanish IBAN
    /// - Any error from [`transactions_for`](Self::transactions_for)
    /// - `IbanNotFound` if no entry matched
    pub fn calculate_balance(&mut self, iban: &str) -> Result<BalanceSnapshot, AccountError> {
        let iban = validate_iban(iban)?;
        let transactions = self.transactions_for(iban)?;
        if transactions.is_empty() {
            return Err(AccountError::iban_not_found(iban));
        }

        let balance = transactions
            .iter()
            .try_fold(Decimal::ZERO, |sum, tx| sum.checked_add(tx.amount))
            .ok_or_else(|| AccountError::invalid_amount(iban, "balance overflows"))?;

        let snapshot = BalanceSnapshot {
            iban: iban.to_string(),
            timestamp: truncate_to_micros(self.clock.now()),
            balance,
        };
        write_json(&mut self.storage, &snapshot.file_name(), &snapshot)?;
        info!(iban, balance = %balance, entries = transactions.len(), "balance snapshot written");

        Ok(snapshot)
    }
}

fn amount_of(value: &Value) -> Result<Decimal, AccountError> {
    match value {
        Value::String(text) => parse_ledger_amount(text),
        Value::Number(number) => parse_ledger_amount(&number.to_string()),
        other => Err(AccountError::invalid_amount(
            other,
            "invalid amount format in transactions file",
        )),
    }
}
