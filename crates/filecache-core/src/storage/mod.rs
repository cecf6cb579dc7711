//! Where cache files live.
//!
//! [`Storage`] is the single place the cache touches the outside world. The
//! cache hands it a relative file name and raw bytes; resolving the base
//! directory and making writes atomic is the storage's job.

mod fs;
mod memory;

use std::path::{Component, Path, PathBuf};

use crate::error::{FileCacheError, Result};

pub use fs::{DirStorage, DocumentsDir};
pub use memory::MemoryStorage;

/// Check that `file` names something under the storage root.
///
/// Absolute paths, drive prefixes and `..` segments are rejected, as is a
/// name with no file component at all.
pub(crate) fn relative_name(file: &str) -> Result<&Path> {
    let path = Path::new(file);
    let mut named = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => named = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                named = false;
                break;
            }
        }
    }
    if !named {
        return Err(FileCacheError::InvalidFileName {
            file: file.to_string(),
        });
    }
    Ok(path)
}

/// Byte storage addressed by relative file names.
pub trait Storage {
    /// Resolve `file` to a full path.
    ///
    /// Fails with `DocumentDirectoryNotFound` when the base location cannot
    /// be determined, and with `InvalidFileName` when `file` would escape it.
    fn locate(&self, file: &str) -> Result<PathBuf>;

    /// Read the whole file. Fails with `FileNotFound` if it does not exist.
    fn read(&self, file: &str) -> Result<Vec<u8>>;

    /// Replace the file's contents. Readers never observe a partial write.
    fn write(&self, file: &str, contents: &[u8]) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn locate(&self, file: &str) -> Result<PathBuf> {
        (**self).locate(file)
    }

    fn read(&self, file: &str) -> Result<Vec<u8>> {
        (**self).read(file)
    }

    fn write(&self, file: &str, contents: &[u8]) -> Result<()> {
        (**self).write(file, contents)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn locate(&self, file: &str) -> Result<PathBuf> {
        (**self).locate(file)
    }

    fn read(&self, file: &str) -> Result<Vec<u8>> {
        (**self).read(file)
    }

    fn write(&self, file: &str, contents: &[u8]) -> Result<()> {
        (**self).write(file, contents)
    }
}
