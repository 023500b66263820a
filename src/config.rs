//! Ledger configuration
//!
//! Where the pipelines read and write: a data directory plus the names of
//! the two shared ledger files inside it. Per-operation outputs (deposit
//! records, balance snapshots) are written to the same directory.

use crate::core::{BalanceCalculator, DepositProcessor, SystemClock, TransferProcessor};
use crate::io::{FileStorage, JsonLedger};
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_TRANSFERS_FILE: &str = "transfers.json";
pub const DEFAULT_TRANSACTIONS_FILE: &str = "transactions.json";

/// File locations used by the pipelines
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Directory holding ledgers and output files
    pub data_dir: PathBuf,
    /// Transfer ledger file name, relative to `data_dir`
    pub transfers_file: String,
    /// Transaction ledger file name, relative to `data_dir`
    pub transactions_file: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            transfers_file: DEFAULT_TRANSFERS_FILE.to_string(),
            transactions_file: DEFAULT_TRANSACTIONS_FILE.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Create a config; blank file names fall back to the defaults
    pub fn new(
        data_dir: impl Into<PathBuf>,
        transfers_file: &str,
        transactions_file: &str,
    ) -> Self {
        let default = Self::default();

        let transfers_file = if transfers_file.trim().is_empty() {
            warn!(
                default = %default.transfers_file,
                "blank transfers file name, using default"
            );
            default.transfers_file
        } else {
            transfers_file.to_string()
        };

        let transactions_file = if transactions_file.trim().is_empty() {
            warn!(
                default = %default.transactions_file,
                "blank transactions file name, using default"
            );
            default.transactions_file
        } else {
            transactions_file.to_string()
        };

        Self {
            data_dir: data_dir.into(),
            transfers_file,
            transactions_file,
        }
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }

    pub fn deposit_processor(&self) -> DepositProcessor<FileStorage, SystemClock> {
        DepositProcessor::new(self.storage(), SystemClock)
    }

    pub fn transfer_processor(&self) -> TransferProcessor<JsonLedger<FileStorage>, SystemClock> {
        TransferProcessor::new(
            JsonLedger::new(self.storage(), self.transfers_file.clone()),
            SystemClock,
        )
    }

    pub fn balance_calculator(&self) -> BalanceCalculator<FileStorage, SystemClock> {
        BalanceCalculator::new(self.storage(), SystemClock, self.transactions_file.clone())
    }
}
