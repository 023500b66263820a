//! Library entry points against the working directory
//!
//! `deposit_into_account`, `transfer_request` and `calculate_balance` use the
//! default configuration, which reads and writes the current directory. The
//! working directory is process-wide, so everything runs inside one test.

use iban_ledger::{calculate_balance, deposit_into_account, transfer_request, AccountError};
use rust_decimal::Decimal;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tempfile::TempDir;

fn fixture(path: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(path)
}

#[test]
fn test_entry_points_use_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::copy(fixture("deposit/valid.json"), dir.path().join("request.json")).unwrap();
    fs::copy(
        fixture("balance/transactions.json"),
        dir.path().join("transactions.json"),
    )
    .unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();

    let signature = deposit_into_account("request.json");
    let missing = deposit_into_account("absent.json");
    let amount = Decimal::from_str("500.75").unwrap();
    let code = transfer_request(
        "ES9121000418450200051332",
        "ES7921000813450200056789",
        "House Rent",
        "ORDINARY",
        "31/12/2050",
        amount,
    );
    let rejected = transfer_request(
        "ES9121000418450200051332",
        "ES7921000813450200056789",
        "House Rent",
        "FAST",
        "31/12/2050",
        amount,
    );
    let balance = calculate_balance("ES9121000418450200051332");
    let unknown = calculate_balance("ES3333333333333333333333");

    env::set_current_dir(&original).unwrap();

    let signature = signature.unwrap();
    assert_eq!(signature.len(), 64);
    let written: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("deposit_ES9121000418450200051332_"))
        .collect();
    assert_eq!(written.len(), 1);
    assert!(matches!(missing, Err(AccountError::FileNotFound { .. })));

    let code = code.unwrap();
    assert_eq!(code.len(), 32);
    let ledger = fs::read_to_string(dir.path().join("transfers.json")).unwrap();
    assert!(ledger.contains(&code));
    assert_eq!(rejected, Err(AccountError::invalid_transfer_type("FAST")));

    assert_eq!(balance.unwrap().balance, Decimal::from(150));
    assert!(dir
        .path()
        .join("balance_ES9121000418450200051332.json")
        .is_file());
    assert_eq!(
        unknown,
        Err(AccountError::iban_not_found("ES3333333333333333333333"))
    );
}

#[cfg(unix)]
#[test]
fn test_deposit_rejects_non_utf8_path() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let path = Path::new(OsStr::from_bytes(b"\xffrequest.json"));
    assert!(matches!(
        deposit_into_account(path),
        Err(AccountError::InvalidFormat { .. })
    ));
}
