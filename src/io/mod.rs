//! I/O module
//!
//! Handles strict JSON input, JSON output and persistence backends.
//!
//! # Components
//!
//! - `strict_json` - JSON loader that rejects duplicate object keys
//! - `json_format` - Pretty-printed JSON output
//! - `storage` - File and in-memory `Storage` implementations
//! - `ledger` - Whole-file JSON array ledger implementing `RecordStore`

pub mod json_format;
pub mod ledger;
pub mod storage;
pub mod strict_json;

pub use json_format::{to_pretty_json, write_json};
pub use ledger::JsonLedger;
pub use storage::{key_for_path, FileStorage, MemoryStorage};
pub use strict_json::{load_document, load_object};
