//! JSON-file ledger
//!
//! A `JsonLedger` persists a sequence of records as one JSON array under a
//! single storage key. Loading a key that does not exist yields an empty
//! sequence; saving rewrites the whole array.
//!
//! # Concurrency
//!
//! `load` followed by `save` is a read-modify-write cycle with no locking.
//! Two writers interleaving on the same key can lose an append. Callers
//! must serialize access externally.

use crate::core::traits::{RecordStore, Storage};
use crate::io::json_format::write_json;
use crate::types::AccountError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Record sequence stored as a JSON array under one key
#[derive(Debug, Clone)]
pub struct JsonLedger<S> {
    storage: S,
    key: String,
}

impl<S: Storage> JsonLedger<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        JsonLedger {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S, R> RecordStore<R> for JsonLedger<S>
where
    S: Storage,
    R: Serialize + DeserializeOwned,
{
    /// # Errors
    ///
    /// - `AccountError::MalformedInput` if the stored text is not a JSON array of records
    /// - `AccountError::Io` if the key exists but cannot be read
    fn load(&self) -> Result<Vec<R>, AccountError> {
        if !self.storage.exists(&self.key) {
            return Ok(Vec::new());
        }

        let text = self.storage.read(&self.key)?;
        serde_json::from_str(&text).map_err(|e| {
            AccountError::malformed(format!("Ledger '{}' could not be parsed: {}", self.key, e))
        })
    }

    fn save(&mut self, records: &[R]) -> Result<(), AccountError> {
        write_json(&mut self.storage, &self.key, records)
    }
}
