//! An in-memory collection of uniquely-identified items, persisted to a
//! single JSON or CSV file.
//!
//! Item types opt in by implementing [`Identifiable`], [`JsonConvertible`]
//! and [`CsvConvertible`]. [`FileCache`] keeps them in insertion order,
//! refuses duplicate ids, and saves/loads the whole collection through a
//! [`Storage`] backend (the user's documents directory by default).

pub mod cache;
pub mod error;
pub mod format;
pub mod item;
pub mod storage;

pub use cache::{FileCache, LoadReport};
pub use error::{FileCacheError, Result};
pub use format::{FileFormat, LineSeparator, PersistOptions};
pub use item::{Cacheable, CsvConvertible, Identifiable, JsonConvertible};
pub use storage::{DirStorage, DocumentsDir, MemoryStorage, Storage};

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
