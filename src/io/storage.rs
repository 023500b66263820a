//! Storage backends
//!
//! - `FileStorage` maps keys to files under a root directory
//! - `MemoryStorage` keeps everything in a map, for tests and embedding
//!
//! Both report a missing key on read as `AccountError::FileNotFound`.
//! `FileStorage` reports content that is not UTF-8 as
//! `AccountError::MalformedInput`, the same as any other unparsable input.

use crate::core::traits::Storage;
use crate::types::AccountError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files under a root directory
///
/// Absolute keys bypass the root, so an input file given by full path can
/// be read through the same storage that receives output files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        FileStorage {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to its file path
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

/// Storage key for a filesystem path
///
/// # Errors
///
/// Returns `AccountError::InvalidFormat` if the path is not valid UTF-8.
pub fn key_for_path(path: &Path) -> Result<&str, AccountError> {
    path.to_str().ok_or_else(|| {
        AccountError::invalid_format(format!("path is not valid UTF-8: {}", path.display()))
    })
}

impl Storage for FileStorage {
    fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }

    fn read(&self, key: &str) -> Result<String, AccountError> {
        let path = self.path_for(key);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AccountError::file_not_found(path.display().to_string()),
            ErrorKind::InvalidData => AccountError::malformed(format!(
                "File '{}' is not valid UTF-8 text",
                path.display()
            )),
            _ => AccountError::Io {
                message: format!("Failed to read '{}': {}", path.display(), e),
            },
        })
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), AccountError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&path, contents).map_err(|e| AccountError::Io {
            message: format!("Failed to write '{}': {}", path.display(), e),
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(())
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, builder style
    pub fn with(mut self, key: &str, contents: &str) -> Self {
        self.entries.insert(key.to_string(), contents.to_string());
        self
    }

    /// Stored text for a key, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn read(&self, key: &str) -> Result<String, AccountError> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| AccountError::file_not_found(key))
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), AccountError> {
        self.entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
