//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `deposit`: Signed deposit records
//! - `transfer`: Transfer types, requests and signed ledger records
//! - `balance`: Transaction ledger entries and balance snapshots
//! - `timestamp`: Microsecond timestamps and their on-disk form
//! - `error`: Error taxonomy for the ledger

pub mod balance;
pub mod deposit;
pub mod error;
pub mod timestamp;
pub mod transfer;

pub use balance::{BalanceSnapshot, Transaction};
pub use deposit::{DepositRecord, DEPOSIT_ALGORITHM, DEPOSIT_OPERATION};
pub use error::AccountError;
pub use transfer::{LedgerEntry, TransferRecord, TransferRequest, TransferType};
