//! Field validators
//!
//! Independent pure functions, one per business rule. Each returns the
//! validated (and where useful, typed) value or the specific
//! `AccountError` for the rule it enforces. None of them touch the clock
//! or the filesystem; the transfer date check takes "today" as a parameter.

use crate::types::{AccountError, TransferType};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// Only currency accepted in deposit amounts
pub const DEPOSIT_CURRENCY: &str = "EUR";

/// Inclusive transfer amount bounds
pub const MIN_TRANSFER_AMOUNT: Decimal = Decimal::from_parts(1000, 0, 0, false, 2);
pub const MAX_TRANSFER_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 2);

/// Inclusive transfer concept length bounds, in characters
pub const MIN_CONCEPT_LEN: usize = 10;
pub const MAX_CONCEPT_LEN: usize = 30;

/// Inclusive transfer year bounds
pub const MIN_TRANSFER_YEAR: i32 = 2025;
pub const MAX_TRANSFER_YEAR: i32 = 2050;

const TRANSFER_DATE_FORMAT: &str = "%d/%m/%Y";
const DEPOSIT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

static IBAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ES[0-9]{22}$").expect("IBAN pattern is valid"));

static DEPOSIT_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{} ([0-9]+\.[0-9]{{2}})$", DEPOSIT_CURRENCY))
        .expect("deposit amount pattern is valid")
});

/// Spanish IBAN: `ES` followed by exactly 22 ASCII digits, nothing else
pub fn validate_iban(iban: &str) -> Result<&str, AccountError> {
    if IBAN_RE.is_match(iban) {
        Ok(iban)
    } else {
        Err(AccountError::invalid_iban(iban))
    }
}

/// Deposit amount text such as `EUR 1000.50`; returns the numeric value
pub fn parse_deposit_amount(amount: &str) -> Result<Decimal, AccountError> {
    let digits = DEPOSIT_AMOUNT_RE
        .captures(amount)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| {
            AccountError::invalid_amount(
                amount,
                &format!("must match '{} <digits>.<2 digits>'", DEPOSIT_CURRENCY),
            )
        })?;

    Decimal::from_str(digits.as_str())
        .map_err(|_| AccountError::invalid_amount(amount, "value out of range"))
}

/// Transfer amount within [10.00, 10000.00] with at most two fractional digits
pub fn validate_transfer_amount(amount: Decimal) -> Result<Decimal, AccountError> {
    if amount < MIN_TRANSFER_AMOUNT || amount > MAX_TRANSFER_AMOUNT {
        return Err(AccountError::invalid_amount(
            amount,
            "must be between 10.00 and 10000.00",
        ));
    }

    if amount.normalize().scale() > 2 {
        return Err(AccountError::invalid_amount(
            amount,
            "can have at most 2 decimal places",
        ));
    }

    Ok(amount)
}

/// Concept of 10-30 characters with at least two whitespace-separated words
pub fn validate_concept(concept: &str) -> Result<&str, AccountError> {
    let len = concept.chars().count();
    let words = concept.split_whitespace().count();

    if (MIN_CONCEPT_LEN..=MAX_CONCEPT_LEN).contains(&len) && words >= 2 {
        Ok(concept)
    } else {
        Err(AccountError::invalid_concept(concept))
    }
}

pub fn validate_transfer_type(transfer_type: &str) -> Result<TransferType, AccountError> {
    transfer_type.parse()
}

/// Transfer date `D/M/YYYY`, year in [2025, 2050], not before `today`
pub fn validate_transfer_date(date: &str, today: NaiveDate) -> Result<NaiveDate, AccountError> {
    let parsed = NaiveDate::parse_from_str(date, TRANSFER_DATE_FORMAT)
        .map_err(|_| AccountError::invalid_date(date, "must be 'DD/MM/YYYY'"))?;

    if !(MIN_TRANSFER_YEAR..=MAX_TRANSFER_YEAR).contains(&parsed.year()) {
        return Err(AccountError::invalid_date(
            date,
            "year must be between 2025 and 2050",
        ));
    }

    if parsed < today {
        return Err(AccountError::invalid_date(date, "cannot be in the past"));
    }

    Ok(parsed)
}

/// Deposit date `YYYY-MM-DDTHH:MM:SSZ`
pub fn validate_deposit_date(date: &str) -> Result<NaiveDateTime, AccountError> {
    NaiveDateTime::parse_from_str(date, DEPOSIT_DATE_FORMAT)
        .map_err(|_| AccountError::invalid_date(date, "must be 'YYYY-MM-DDTHH:MM:SSZ'"))
}

/// Ledger amount text using either `,` or `.` as the fractional separator
pub fn parse_ledger_amount(amount: &str) -> Result<Decimal, AccountError> {
    let normalized = amount.trim().replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| AccountError::invalid_amount(amount, "invalid amount format in transactions file"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case("ES9121000418450200051332")]
    #[case("ES0000000000000000000000")]
    fn test_iban_accepts(#[case] iban: &str) {
        assert_eq!(validate_iban(iban), Ok(iban));
    }

    #[rstest]
    #[case::empty("")]
    #[case::wrong_country("FR9121000418450200051332")]
    #[case::lowercase_prefix("es9121000418450200051332")]
    #[case::too_short("ES912100041845020005133")]
    #[case::too_long("ES91210004184502000513321")]
    #[case::letter_inside("ES91210004184502000513A2")]
    #[case::spaces("ES91 2100 0418 4502 0005 1332")]
    #[case::trailing_newline("ES9121000418450200051332\n")]
    #[case::unicode_digit("ES912100041845020005133٣")]
    fn test_iban_rejects(#[case] iban: &str) {
        assert_eq!(validate_iban(iban), Err(AccountError::invalid_iban(iban)));
    }

    #[rstest]
    #[case("EUR 1000.50", "1000.50")]
    #[case("EUR 0.00", "0.00")]
    #[case("EUR 1234.56", "1234.56")]
    fn test_deposit_amount_accepts(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_deposit_amount(input).unwrap(), dec(expected));
    }

    #[rstest]
    #[case::other_currency("USD 1000.50")]
    #[case::no_space("EUR1000.50")]
    #[case::one_decimal("EUR 1000.5")]
    #[case::three_decimals("EUR 1000.500")]
    #[case::no_decimals("EUR 1000")]
    #[case::negative("EUR -10.00")]
    #[case::comma("EUR 1000,50")]
    #[case::trailing("EUR 1000.50 ")]
    #[case::empty("")]
    fn test_deposit_amount_rejects(#[case] input: &str) {
        assert!(matches!(
            parse_deposit_amount(input),
            Err(AccountError::InvalidAmount { .. })
        ));
    }

    #[rstest]
    #[case::lower_bound("10.00")]
    #[case::upper_bound("10000.00")]
    #[case::typical("500.75")]
    #[case::trailing_zero("500.750")]
    #[case::whole("42")]
    fn test_transfer_amount_accepts(#[case] input: &str) {
        assert_eq!(validate_transfer_amount(dec(input)), Ok(dec(input)));
    }

    #[rstest]
    #[case::below("9.99")]
    #[case::above("10000.01")]
    #[case::zero("0")]
    #[case::negative("-50.00")]
    #[case::three_decimals("500.755")]
    #[case::tiny_fraction("10.001")]
    fn test_transfer_amount_rejects(#[case] input: &str) {
        assert!(matches!(
            validate_transfer_amount(dec(input)),
            Err(AccountError::InvalidAmount { .. })
        ));
    }

    #[rstest]
    #[case::minimum("House Rent")]
    #[case::maximum("Payment for services rendered")]
    #[case::exactly_thirty("abcdefghijklmn opqrstuvwxyz123")]
    #[case::multibyte("Pago ñandú x")]
    fn test_concept_accepts(#[case] concept: &str) {
        assert_eq!(validate_concept(concept), Ok(concept));
    }

    #[rstest]
    #[case::too_short("Rent paid")]
    #[case::one_word("Housepayment")]
    #[case::too_long("Payment for services rendered!!")]
    #[case::blank("          ")]
    fn test_concept_rejects(#[case] concept: &str) {
        assert_eq!(
            validate_concept(concept),
            Err(AccountError::invalid_concept(concept))
        );
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[rstest]
    #[case::today("15/6/2025")]
    #[case::padded("15/06/2025")]
    #[case::upper_year("31/12/2050")]
    #[case::single_digits("7/7/2025")]
    fn test_transfer_date_accepts(#[case] date: &str) {
        assert!(validate_transfer_date(date, today()).is_ok());
    }

    #[rstest]
    #[case::past("31/12/2024")]
    #[case::yesterday("14/06/2025")]
    #[case::beyond_upper_year("1/1/2051")]
    #[case::iso_format("2025-07-07")]
    #[case::impossible_day("31/02/2026")]
    #[case::month_out_of_range("01/13/2026")]
    #[case::empty("")]
    fn test_transfer_date_rejects(#[case] date: &str) {
        assert!(matches!(
            validate_transfer_date(date, today()),
            Err(AccountError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_transfer_date_before_lower_year_rejected_even_when_not_past() {
        let early = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(matches!(
            validate_transfer_date("1/1/2024", early),
            Err(AccountError::InvalidDate { .. })
        ));
    }

    #[rstest]
    #[case("2025-03-20T12:34:56Z")]
    #[case("2030-12-31T23:59:59Z")]
    fn test_deposit_date_accepts(#[case] date: &str) {
        assert!(validate_deposit_date(date).is_ok());
    }

    #[rstest]
    #[case::missing_zone("2025-03-20T12:34:56")]
    #[case::offset("2025-03-20T12:34:56+01:00")]
    #[case::date_only("2025-03-20")]
    #[case::garbage("INVALID_DATE")]
    #[case::bad_month("2025-13-20T12:34:56Z")]
    fn test_deposit_date_rejects(#[case] date: &str) {
        assert!(matches!(
            validate_deposit_date(date),
            Err(AccountError::InvalidDate { .. })
        ));
    }

    #[rstest]
    #[case("100", "100")]
    #[case("50,25", "50.25")]
    #[case("-20.5", "-20.5")]
    #[case(" 0 ", "0")]
    fn test_ledger_amount_accepts(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_ledger_amount(input).unwrap(), dec(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("1,000.50")]
    #[case("")]
    fn test_ledger_amount_rejects(#[case] input: &str) {
        assert!(matches!(
            parse_ledger_amount(input),
            Err(AccountError::InvalidAmount { .. })
        ));
    }
}
