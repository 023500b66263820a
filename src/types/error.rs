//! Error types for the IBAN ledger
//!
//! This module defines the single error taxonomy shared by every pipeline.
//! Each variant renders a stable, human-readable message suitable for CLI output.
//!
//! # Error Categories
//!
//! - **Resource Errors**: File not found, I/O failures
//! - **Input Errors**: Malformed JSON, empty documents, missing or unexpected fields
//! - **Validation Errors**: IBAN, amount, date, concept and transfer type rules
//! - **Ledger Errors**: Duplicate transfers, unknown IBANs, bad ledger shape
//! - **Signature Errors**: Failure to build a record's canonical form

use thiserror::Error;

/// Main error type for the IBAN ledger
///
/// Every failure is reported to the immediate caller through this enum.
/// Nothing is retried and nothing is logged-and-swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Input resource does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing a resource
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Input text is not valid JSON or contains a duplicated key
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// Description of the parse failure
        message: String,
    },

    /// Input document parsed but has no keys
    #[error("Empty JSON data")]
    EmptyInput,

    /// One or more required keys are absent
    #[error("Missing required keys: {}", fields.join(", "))]
    MissingField {
        /// Every absent key, sorted
        fields: Vec<String>,
    },

    /// A fixed header value (`alg` or `typ`) does not match
    #[error("Invalid {field} value: expected '{expected}'")]
    InvalidConstant {
        /// Name of the offending key
        field: String,
        /// The only accepted value
        expected: String,
    },

    #[error("Invalid IBAN '{iban}': must be 'ES' followed by 22 digits")]
    InvalidIban { iban: String },

    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Invalid date '{date}': {reason}")]
    InvalidDate { date: String, reason: String },

    #[error("Invalid concept '{concept}': must be 10-30 characters and contain at least two words")]
    InvalidConcept { concept: String },

    #[error("Invalid transfer type '{transfer_type}': must be 'ORDINARY', 'URGENT' or 'IMMEDIATE'")]
    InvalidTransferType { transfer_type: String },

    /// Ledger parsed but is not a sequence of objects
    #[error("Invalid transactions data format: {message}")]
    InvalidFormat { message: String },

    /// No ledger entry matched the requested IBAN
    #[error("IBAN {iban} not found in transactions file")]
    IbanNotFound { iban: String },

    /// A transfer with the same code is already in the ledger
    #[error("Duplicate transfer detected: {code}")]
    DuplicateTransfer { code: String },

    /// The canonical form of a record could not be built
    #[error("Signature error: {message}")]
    Signature { message: String },
}

impl From<std::io::Error> for AccountError {
    fn from(error: std::io::Error) -> Self {
        AccountError::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AccountError {
    fn from(error: serde_json::Error) -> Self {
        AccountError::MalformedInput {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl AccountError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        AccountError::FileNotFound { path: path.into() }
    }

    /// Create a MalformedInput error
    pub fn malformed(message: impl Into<String>) -> Self {
        AccountError::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a MissingField error; the field list is sorted for stable output
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        fields.sort();
        AccountError::MissingField { fields }
    }

    /// Create an InvalidConstant error
    pub fn invalid_constant(field: &str, expected: &str) -> Self {
        AccountError::InvalidConstant {
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Create an InvalidIban error
    pub fn invalid_iban(iban: &str) -> Self {
        AccountError::InvalidIban {
            iban: iban.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl ToString, reason: &str) -> Self {
        AccountError::InvalidAmount {
            amount: amount.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(date: &str, reason: &str) -> Self {
        AccountError::InvalidDate {
            date: date.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidConcept error
    pub fn invalid_concept(concept: &str) -> Self {
        AccountError::InvalidConcept {
            concept: concept.to_string(),
        }
    }

    /// Create an InvalidTransferType error
    pub fn invalid_transfer_type(transfer_type: &str) -> Self {
        AccountError::InvalidTransferType {
            transfer_type: transfer_type.to_string(),
        }
    }

    /// Create an InvalidFormat error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        AccountError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an IbanNotFound error
    pub fn iban_not_found(iban: &str) -> Self {
        AccountError::IbanNotFound {
            iban: iban.to_string(),
        }
    }

    /// Create a DuplicateTransfer error
    pub fn duplicate_transfer(code: &str) -> Self {
        AccountError::DuplicateTransfer {
            code: code.to_string(),
        }
    }

    /// Create a Signature error
    pub fn signature(message: impl Into<String>) -> Self {
        AccountError::Signature {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::file_not_found(
        AccountError::FileNotFound { path: "deposit.json".to_string() },
        "File not found: deposit.json"
    )]
    #[case::empty_input(AccountError::EmptyInput, "Empty JSON data")]
    #[case::missing_field(
        AccountError::MissingField { fields: vec!["alg".to_string(), "iban".to_string()] },
        "Missing required keys: alg, iban"
    )]
    #[case::invalid_constant(
        AccountError::invalid_constant("alg", "SHA-256"),
        "Invalid alg value: expected 'SHA-256'"
    )]
    #[case::invalid_iban(
        AccountError::invalid_iban("FR123"),
        "Invalid IBAN 'FR123': must be 'ES' followed by 22 digits"
    )]
    #[case::iban_not_found(
        AccountError::iban_not_found("ES9121000418450200051332"),
        "IBAN ES9121000418450200051332 not found in transactions file"
    )]
    #[case::duplicate_transfer(
        AccountError::duplicate_transfer("abc"),
        "Duplicate transfer detected: abc"
    )]
    fn test_error_display(#[case] error: AccountError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_missing_fields_are_sorted() {
        let error = AccountError::missing_fields(["typ", "amount", "alg"]);
        assert_eq!(
            error,
            AccountError::MissingField {
                fields: vec!["alg".to_string(), "amount".to_string(), "typ".to_string()]
            }
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: AccountError = io_error.into();
        assert!(matches!(error, AccountError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: AccountError = json_error.into();
        assert!(matches!(error, AccountError::MalformedInput { .. }));
    }
}
