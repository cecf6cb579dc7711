/// Errors raised by [`FileCache`](crate::FileCache) and its storage backends.
#[derive(Debug, thiserror::Error)]
pub enum FileCacheError {
    #[error("item already exists: {id}")]
    DuplicateId { id: String },

    #[error("document directory not found")]
    DocumentDirectoryNotFound,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("invalid CSV: {0}")]
    InvalidCsv(String),

    #[error("file name must be a relative path inside the storage root: {file}")]
    InvalidFileName { file: String },

    #[error("file not found: {file}")]
    FileNotFound { file: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FileCacheError>;
