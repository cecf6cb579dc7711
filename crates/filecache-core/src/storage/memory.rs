use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{relative_name, Storage};
use crate::error::{FileCacheError, Result};

/// Files held in memory, keyed by name.
///
/// Lets a cache be exercised without touching the file system. Not `Sync`:
/// a cache is owned by one thread.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `contents` under `file`, replacing anything already there.
    pub fn insert(&self, file: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(file.into(), contents.into());
    }

    /// A copy of the bytes stored under `file`.
    pub fn get(&self, file: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(file).cloned()
    }

    pub fn contains(&self, file: &str) -> bool {
        self.files.borrow().contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn locate(&self, file: &str) -> Result<PathBuf> {
        Ok(relative_name(file)?.to_path_buf())
    }

    fn read(&self, file: &str) -> Result<Vec<u8>> {
        relative_name(file)?;
        self.get(file).ok_or_else(|| FileCacheError::FileNotFound {
            file: file.to_string(),
        })
    }

    fn write(&self, file: &str, contents: &[u8]) -> Result<()> {
        relative_name(file)?;
        self.insert(file, contents);
        Ok(())
    }
}
