//! Signature engine
//!
//! Builds the canonical string form of a record and digests it:
//! - deposits: `{alg:..,typ:..,iban:..,amount:..,deposit_date:..}` hashed with SHA-256
//! - transfers: `Transfer:` followed by a compact JSON object of the fields, hashed with MD5
//!
//! Both functions are pure. Identical field values always produce identical
//! output, and the timestamp is part of the input, so the digest doubles as
//! the duplicate-detection key for the transfer ledger.

use crate::types::timestamp::to_epoch_seconds;
use crate::types::{AccountError, TransferType};
use chrono::{DateTime, Utc};
use md5::Md5;
use rust_decimal::Decimal;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Literal prefix of the transfer canonical string
pub const TRANSFER_TAG: &str = "Transfer:";

/// Amount text used inside canonical strings: always two fractional digits
fn canonical_amount(amount: &Decimal) -> String {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount.to_string()
}

/// Canonical string signed for a deposit
pub fn deposit_signature_string(
    algorithm: &str,
    operation_type: &str,
    iban: &str,
    amount: &Decimal,
    timestamp: &DateTime<Utc>,
) -> String {
    format!(
        "{{alg:{},typ:{},iban:{},amount:{},deposit_date:{}}}",
        algorithm,
        operation_type,
        iban,
        canonical_amount(amount),
        to_epoch_seconds(timestamp)
    )
}

/// SHA-256 over the deposit canonical string, as 64 lowercase hex characters
pub fn deposit_signature(
    algorithm: &str,
    operation_type: &str,
    iban: &str,
    amount: &Decimal,
    timestamp: &DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(
        deposit_signature_string(algorithm, operation_type, iban, amount, timestamp).as_bytes(),
    );
    hex::encode(hasher.finalize())
}

/// Borrowed view of every signed transfer field, in canonical order
#[derive(Debug, Clone, Copy)]
pub struct TransferFields<'a> {
    pub from_iban: &'a str,
    pub to_iban: &'a str,
    pub transfer_type: TransferType,
    pub concept: &'a str,
    pub transfer_date: &'a str,
    pub amount: &'a Decimal,
    pub timestamp: &'a DateTime<Utc>,
}

// Serialized field order is the canonical order.
#[derive(Serialize)]
struct CanonicalTransfer<'a> {
    from_iban: &'a str,
    to_iban: &'a str,
    transfer_type: TransferType,
    transfer_concept: &'a str,
    transfer_date: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    transfer_amount: Decimal,
    time_stamp: f64,
}

/// Canonical string signed for a transfer
///
/// # Errors
///
/// Returns `AccountError::Signature` if the fields cannot be serialized.
pub fn transfer_signature_string(fields: &TransferFields<'_>) -> Result<String, AccountError> {
    let canonical = CanonicalTransfer {
        from_iban: fields.from_iban,
        to_iban: fields.to_iban,
        transfer_type: fields.transfer_type,
        transfer_concept: fields.concept,
        transfer_date: fields.transfer_date,
        transfer_amount: fields.amount.round_dp(2),
        time_stamp: to_epoch_seconds(fields.timestamp),
    };
    let body =
        serde_json::to_string(&canonical).map_err(|e| AccountError::signature(e.to_string()))?;
    Ok(format!("{}{}", TRANSFER_TAG, body))
}

/// MD5 over the transfer canonical string, as 32 lowercase hex characters
pub fn transfer_code(fields: &TransferFields<'_>) -> Result<String, AccountError> {
    let mut hasher = Md5::new();
    hasher.update(transfer_signature_string(fields)?.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    const IBAN_A: &str = "ES9121000418450200051332";
    const IBAN_B: &str = "ES7921000813450200056789";

    fn at(secs: i64, micros: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, micros * 1_000).unwrap()
    }

    #[test]
    fn test_deposit_signature_string_layout() {
        let s = deposit_signature_string(
            "SHA-256",
            "DEPOSIT",
            IBAN_A,
            &Decimal::new(100050, 2),
            &at(1_751_889_600, 500_000),
        );
        assert_eq!(
            s,
            "{alg:SHA-256,typ:DEPOSIT,iban:ES9121000418450200051332,amount:1000.50,deposit_date:1751889600.5}"
        );
    }

    #[test]
    fn test_deposit_signature_known_digest() {
        let mut hasher = Sha256::new();
        hasher.update(b"abc");
        assert_eq!(
            hex::encode(hasher.finalize()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_deposit_signature_is_deterministic() {
        let amount = Decimal::new(123456, 2);
        let ts = at(1_751_889_600, 42);
        let first = deposit_signature("SHA-256", "DEPOSIT", IBAN_A, &amount, &ts);
        let second = deposit_signature("SHA-256", "DEPOSIT", IBAN_A, &amount, &ts);
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_deposit_amount_scale_does_not_matter() {
        let ts = at(1_751_889_600, 0);
        assert_eq!(
            deposit_signature("SHA-256", "DEPOSIT", IBAN_A, &Decimal::new(10005, 1), &ts),
            deposit_signature("SHA-256", "DEPOSIT", IBAN_A, &Decimal::new(100050, 2), &ts),
        );
    }

    #[rstest]
    #[case::algorithm("SHA-512", "DEPOSIT", IBAN_A, Decimal::new(100050, 2), at(1_751_889_600, 0))]
    #[case::operation("SHA-256", "TRANSFER", IBAN_A, Decimal::new(100050, 2), at(1_751_889_600, 0))]
    #[case::iban("SHA-256", "DEPOSIT", IBAN_B, Decimal::new(100050, 2), at(1_751_889_600, 0))]
    #[case::amount("SHA-256", "DEPOSIT", IBAN_A, Decimal::new(100051, 2), at(1_751_889_600, 0))]
    #[case::timestamp("SHA-256", "DEPOSIT", IBAN_A, Decimal::new(100050, 2), at(1_751_889_600, 1))]
    fn test_deposit_signature_changes_with_each_field(
        #[case] algorithm: &str,
        #[case] operation: &str,
        #[case] iban: &str,
        #[case] amount: Decimal,
        #[case] timestamp: DateTime<Utc>,
    ) {
        let base = deposit_signature(
            "SHA-256",
            "DEPOSIT",
            IBAN_A,
            &Decimal::new(100050, 2),
            &at(1_751_889_600, 0),
        );
        let changed = deposit_signature(algorithm, operation, iban, &amount, &timestamp);
        assert_ne!(base, changed);
    }

    fn base_transfer<'a>(amount: &'a Decimal, ts: &'a DateTime<Utc>) -> TransferFields<'a> {
        TransferFields {
            from_iban: IBAN_A,
            to_iban: IBAN_B,
            transfer_type: TransferType::Ordinary,
            concept: "House Rent",
            transfer_date: "7/7/2025",
            amount,
            timestamp: ts,
        }
    }

    #[test]
    fn test_transfer_signature_string_layout() {
        let amount = Decimal::new(50075, 2);
        let ts = at(1_751_889_600, 0);
        let s = transfer_signature_string(&base_transfer(&amount, &ts)).unwrap();
        assert_eq!(
            s,
            "Transfer:{\"from_iban\":\"ES9121000418450200051332\",\"to_iban\":\"ES7921000813450200056789\",\
             \"transfer_type\":\"ORDINARY\",\"transfer_concept\":\"House Rent\",\"transfer_date\":\"7/7/2025\",\
             \"transfer_amount\":500.75,\"time_stamp\":1751889600.0}"
        );
    }

    #[test]
    fn test_transfer_code_is_deterministic() {
        let amount = Decimal::new(50075, 2);
        let ts = at(1_751_889_600, 7);
        let first = transfer_code(&base_transfer(&amount, &ts)).unwrap();
        let second = transfer_code(&base_transfer(&amount, &ts)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 32);
    }

    #[test]
    fn test_transfer_code_changes_with_each_field() {
        let amount = Decimal::new(50075, 2);
        let other_amount = Decimal::new(50076, 2);
        let ts = at(1_751_889_600, 0);
        let other_ts = at(1_751_889_600, 1);
        let base = base_transfer(&amount, &ts);
        let base_code = transfer_code(&base).unwrap();

        let variants = [
            TransferFields { from_iban: IBAN_B, ..base },
            TransferFields { to_iban: IBAN_A, ..base },
            TransferFields { transfer_type: TransferType::Urgent, ..base },
            TransferFields { concept: "House Rental", ..base },
            TransferFields { transfer_date: "8/7/2025", ..base },
            TransferFields { amount: &other_amount, ..base },
            TransferFields { timestamp: &other_ts, ..base },
        ];

        for variant in variants.iter() {
            assert_ne!(transfer_code(variant).unwrap(), base_code, "{:?}", variant);
        }
    }
}
