//! Transfer pipeline
//!
//! Validates a transfer request, signs it, and appends it to the transfer
//! ledger unless a record with the same transfer code is already there.
//!
//! # Stages
//!
//! 1. **Validate**: from IBAN, to IBAN, type, concept, date, amount (first failure wins)
//! 2. **Sign**: build the record with a fresh timestamp and compute its code
//! 3. **Duplicate check**: compare the code against every stored entry
//! 4. **Append**: rewrite the ledger with the new record at the end
//!
//! Stored entries are only read for their `transfer_code` and are written
//! back untouched, whatever else they contain. A ledger that is missing or
//! is not a parsable JSON array is treated as empty and will be overwritten
//! by the next accepted transfer.

use crate::core::traits::{Clock, RecordStore};
use crate::core::validators::{
    validate_concept, validate_iban, validate_transfer_amount, validate_transfer_date,
    validate_transfer_type,
};
use crate::types::{AccountError, LedgerEntry, TransferRecord, TransferRequest};
use tracing::{debug, info, warn};

/// Transfer pipeline over a record store and a clock
#[derive(Debug, Clone)]
pub struct TransferProcessor<L, C> {
    ledger: L,
    clock: C,
}

impl<L: RecordStore<LedgerEntry>, C: Clock> TransferProcessor<L, C> {
    pub fn new(ledger: L, clock: C) -> Self {
        TransferProcessor { ledger, clock }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    /// Validate and build a signed record without touching the ledger
    ///
    /// # Errors
    ///
    /// `InvalidIban`, `InvalidTransferType`, `InvalidConcept`, `InvalidDate`
    /// or `InvalidAmount`, checked in that order (from IBAN before to IBAN).
    pub fn build_record(&self, request: &TransferRequest) -> Result<TransferRecord, AccountError> {
        let from_iban = validate_iban(&request.from_iban)?;
        let to_iban = validate_iban(&request.to_iban)?;
        let transfer_type = validate_transfer_type(&request.transfer_type)?;
        let concept = validate_concept(&request.concept)?;
        validate_transfer_date(&request.date, self.clock.today())?;
        let amount = validate_transfer_amount(request.amount)?;

        TransferRecord::new(
            from_iban,
            to_iban,
            transfer_type,
            concept,
            &request.date,
            amount,
            self.clock.now(),
        )
    }

    /// Record a transfer and return its 32-character transfer code
    ///
    /// # Errors
    ///
    /// - Any validation error from [`build_record`](Self::build_record)
    /// - `DuplicateTransfer` if the ledger already holds the same code
    /// - `Io` if the ledger cannot be read or written
    pub fn transfer_request(&mut self, request: &TransferRequest) -> Result<String, AccountError> {
        let record = self.build_record(request)?;
        let code = record.transfer_code().to_string();
        debug!(code = %code, "transfer validated and signed");

        let mut entries = self.load_ledger()?;
        if entries.iter().any(|e| e.transfer_code() == Some(code.as_str())) {
            return Err(AccountError::duplicate_transfer(&code));
        }
        debug!(existing = entries.len(), "no duplicate transfer found");

        entries.push(LedgerEntry::from_record(&record)?);
        self.ledger.save(&entries)?;
        info!(
            code = %code,
            from = %request.from_iban,
            to = %request.to_iban,
            amount = %request.amount,
            "transfer recorded"
        );

        Ok(code)
    }

    fn load_ledger(&self) -> Result<Vec<LedgerEntry>, AccountError> {
        match self.ledger.load() {
            Ok(entries) => Ok(entries),
            Err(AccountError::MalformedInput { message }) => {
                warn!(reason = %message, "transfer ledger unreadable, starting from empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}
