use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{relative_name, Storage};
use crate::error::{FileCacheError, Result};

/// Files under the current user's documents directory.
///
/// The directory is looked up on every call via [`dirs::document_dir`], so a
/// missing directory surfaces as `DocumentDirectoryNotFound` at save/load
/// time rather than at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentsDir;

impl DocumentsDir {
    fn resolve(&self) -> Result<DirStorage> {
        dirs::document_dir()
            .map(DirStorage::new)
            .ok_or(FileCacheError::DocumentDirectoryNotFound)
    }
}

impl Storage for DocumentsDir {
    fn locate(&self, file: &str) -> Result<PathBuf> {
        self.resolve()?.locate(file)
    }

    fn read(&self, file: &str) -> Result<Vec<u8>> {
        self.resolve()?.read(file)
    }

    fn write(&self, file: &str, contents: &[u8]) -> Result<()> {
        self.resolve()?.write(file, contents)
    }
}

/// Files under a fixed base directory.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Storage for DirStorage {
    fn locate(&self, file: &str) -> Result<PathBuf> {
        Ok(self.root.join(relative_name(file)?))
    }

    fn read(&self, file: &str) -> Result<Vec<u8>> {
        let path = self.locate(file)?;
        if !path.is_file() {
            return Err(FileCacheError::FileNotFound {
                file: path.display().to_string(),
            });
        }
        Ok(fs::read(&path)?)
    }

    fn write(&self, file: &str, contents: &[u8]) -> Result<()> {
        let path = self.locate(file)?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Stage next to the target so the rename stays on one file system.
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(contents)?;
        staged.as_file().sync_all()?;
        staged.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }
}
