//! Core traits for persistence and time
//!
//! The pipelines never touch the filesystem or the system clock directly.
//! They are generic over these seams so the same logic runs against files,
//! memory, or a pinned clock in tests.

use crate::types::AccountError;
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Keyed text storage
///
/// Keys are resource names (file names relative to a root, for the file
/// implementation). Implementations report a missing key on `read` as
/// `AccountError::FileNotFound`.
pub trait Storage {
    /// Whether a resource exists under `key`
    fn exists(&self, key: &str) -> bool;

    /// Read the full text stored under `key`
    fn read(&self, key: &str) -> Result<String, AccountError>;

    /// Replace whatever is stored under `key` with `contents`
    fn write(&mut self, key: &str, contents: &str) -> Result<(), AccountError>;
}

/// Append-only sequence of records, loaded and saved as a whole
///
/// `save` rewrites the complete sequence. Nothing here serializes
/// concurrent writers: callers must ensure a single writer per store.
pub trait RecordStore<R> {
    /// Load every stored record, oldest first (empty when nothing is stored yet)
    fn load(&self) -> Result<Vec<R>, AccountError>;

    /// Persist the full sequence, replacing the previous contents
    fn save(&mut self, records: &[R]) -> Result<(), AccountError>;
}

/// Source of the current instant and calendar date
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date used for "not in the past" checks
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock: UTC instants, local calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        FixedClock { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn exists(&self, key: &str) -> bool {
        (**self).exists(key)
    }

    fn read(&self, key: &str) -> Result<String, AccountError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), AccountError> {
        (**self).write(key, contents)
    }
}
