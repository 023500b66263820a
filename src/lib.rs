//! IBAN Ledger Library
//! # Overview
//!
//! This library validates and records simple financial operations against
//! flat JSON-file ledgers: account deposits, inter-account transfers, and
//! on-demand balance recomputation.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Records (deposit, transfer, balance) and the error taxonomy
//! - [`io`] - Strict JSON loading, JSON output, storage backends and the JSON ledger
//! - [`core`] - Business logic components:
//!   - [`core::validators`] - Pure field validators (IBAN, amounts, dates, concept, type)
//!   - [`core::signature`] - Deterministic record signatures (SHA-256 / MD5)
//!   - [`core::deposit`] - Deposit pipeline
//!   - [`core::transfer`] - Transfer pipeline with duplicate detection
//!   - [`core::balance`] - Balance pipeline
//! - [`config`] - File locations
//! - [`cli`] - CLI arguments parsing
//!
//! # Operations
//!
//! - **Deposit**: read a request file, validate it, write a signed deposit record
//! - **Transfer**: validate a transfer, sign it, append it to the transfer ledger
//! - **Balance**: sum an IBAN's entries in the transaction ledger into a snapshot
//!
//! # Concurrency
//!
//! Everything is synchronous and single-threaded. The transfer ledger is
//! rewritten whole on every append with no locking; callers must ensure a
//! single writer.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod types;

pub use config::LedgerConfig;
pub use core::{BalanceCalculator, DepositProcessor, TransferProcessor};
pub use types::{
    AccountError, BalanceSnapshot, DepositRecord, LedgerEntry, Transaction, TransferRecord,
    TransferRequest, TransferType,
};

use rust_decimal::Decimal;
use std::path::Path;

/// Record the deposit described by the JSON file at `input_file`
///
/// The signed record is written to `deposit_<IBAN>_<seconds>.json` in the
/// working directory. Returns the 64-character SHA-256 signature. A path
/// that is not valid UTF-8 is rejected with `InvalidFormat`.
pub fn deposit_into_account(input_file: impl AsRef<Path>) -> Result<String, AccountError> {
    let input = io::key_for_path(input_file.as_ref())?;
    LedgerConfig::default()
        .deposit_processor()
        .deposit_into_account(input)
}

/// Append a transfer to `transfers.json` in the working directory
///
/// Returns the 32-character MD5 transfer code.
pub fn transfer_request(
    from_iban: &str,
    to_iban: &str,
    concept: &str,
    transfer_type: &str,
    date: &str,
    amount: Decimal,
) -> Result<String, AccountError> {
    let request = TransferRequest::new(from_iban, to_iban, concept, transfer_type, date, amount);
    LedgerConfig::default()
        .transfer_processor()
        .transfer_request(&request)
}

/// Recompute `iban`'s balance from `transactions.json` in the working directory
///
/// Writes `balance_<IBAN>.json` and returns the snapshot.
pub fn calculate_balance(iban: &str) -> Result<BalanceSnapshot, AccountError> {
    LedgerConfig::default()
        .balance_calculator()
        .calculate_balance(iban)
}
