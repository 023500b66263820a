//! Core business logic module
//!
//! This module contains the validation and signing pipeline:
//! - `traits` - Storage, record store and clock seams
//! - `validators` - Pure field validators
//! - `signature` - Canonical record strings and their digests
//! - `deposit` - Deposit pipeline
//! - `transfer` - Transfer pipeline with duplicate detection
//! - `balance` - Balance recomputation from the transaction ledger

pub mod balance;
pub mod deposit;
pub mod signature;
pub mod traits;
pub mod transfer;
pub mod validators;

pub use balance::BalanceCalculator;
pub use deposit::DepositProcessor;
pub use traits::{Clock, FixedClock, RecordStore, Storage, SystemClock};
pub use transfer::TransferProcessor;
