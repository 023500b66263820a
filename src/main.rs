//! IBAN Ledger CLI
//!
//! Command-line interface for recording deposits and transfers and for
//! recomputing balances from JSON ledgers.
//!
//! # Usage
//!
//! ```bash
//! iban-ledger deposit request.json
//! iban-ledger transfer --from ES9121000418450200051332 --to ES7921000813450200056789 \
//!     --concept "House Rent" --type ORDINARY --date 07/07/2030 --amount 500.75
//! iban-ledger --data-dir ledger balance ES9121000418450200051332
//! ```
//!
//! On success the signature, transfer code, or balance is printed to stdout.
//! Diagnostics go to stderr; set `RUST_LOG=debug` for pipeline tracing.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (validation failure, duplicate transfer, file not found, etc.)

use iban_ledger::cli::{self, Command};
use iban_ledger::io;
use iban_ledger::AccountError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    match run(&args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &cli::CliArgs) -> Result<String, AccountError> {
    let config = args.to_ledger_config();

    match &args.command {
        Command::Deposit { input_file } => {
            // Input paths are relative to the working directory, not the data directory
            let input = std::env::current_dir()?.join(input_file);
            config
                .deposit_processor()
                .deposit_into_account(io::key_for_path(&input)?)
        }
        Command::Transfer { .. } => {
            let request = args
                .command
                .to_transfer_request()
                .ok_or_else(|| AccountError::malformed("transfer arguments missing"))?;
            config.transfer_processor().transfer_request(&request)
        }
        Command::Balance { iban } => config
            .balance_calculator()
            .calculate_balance(iban)
            .map(|snapshot| snapshot.balance.to_string()),
    }
}
