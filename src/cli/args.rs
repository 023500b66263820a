use crate::config::{LedgerConfig, DEFAULT_TRANSACTIONS_FILE, DEFAULT_TRANSFERS_FILE};
use crate::types::TransferRequest;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Validate and record deposits and transfers in JSON ledgers
#[derive(Parser, Debug)]
#[command(name = "iban-ledger")]
#[command(about = "Validate and record deposits and transfers in JSON ledgers", long_about = None)]
pub struct CliArgs {
    /// Directory holding the ledgers and output files
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Transfer ledger file name inside the data directory
    #[arg(
        long = "transfers-file",
        value_name = "FILE",
        default_value = DEFAULT_TRANSFERS_FILE,
        global = true
    )]
    pub transfers_file: String,

    /// Transaction ledger file name inside the data directory
    #[arg(
        long = "transactions-file",
        value_name = "FILE",
        default_value = DEFAULT_TRANSACTIONS_FILE,
        global = true
    )]
    pub transactions_file: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed on the command line
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Record the deposit described by a JSON request file
    Deposit {
        /// Path to the deposit request file
        #[arg(value_name = "INPUT")]
        input_file: PathBuf,
    },

    /// Append a transfer to the transfer ledger
    Transfer {
        /// Sender IBAN
        #[arg(long = "from", value_name = "IBAN")]
        from_iban: String,
        /// Recipient IBAN
        #[arg(long = "to", value_name = "IBAN")]
        to_iban: String,
        /// Transfer concept (10-30 characters, at least two words)
        #[arg(long)]
        concept: String,
        /// ORDINARY, URGENT or IMMEDIATE
        #[arg(long = "type", value_name = "TYPE", default_value = "ORDINARY")]
        transfer_type: String,
        /// Transfer date as DD/MM/YYYY
        #[arg(long)]
        date: String,
        /// Amount between 10.00 and 10000.00
        #[arg(long)]
        amount: Decimal,
    },

    /// Recompute an IBAN's balance from the transaction ledger
    Balance {
        /// IBAN to compute the balance for
        iban: String,
    },
}

impl CliArgs {
    /// Build the ledger configuration from the global options
    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig::new(
            self.data_dir.clone(),
            &self.transfers_file,
            &self.transactions_file,
        )
    }
}

impl Command {
    /// Transfer request for the `transfer` subcommand
    pub fn to_transfer_request(&self) -> Option<TransferRequest> {
        match self {
            Command::Transfer {
                from_iban,
                to_iban,
                concept,
                transfer_type,
                date,
                amount,
            } => Some(TransferRequest::new(
                from_iban,
                to_iban,
                concept,
                transfer_type,
                date,
                *amount,
            )),
            _ => None,
        }
    }
}
