use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{FileCacheError, Result};
use crate::format::{FileFormat, PersistOptions};
use crate::item::Cacheable;
use crate::storage::{DocumentsDir, Storage};

/// Outcome of a successful [`FileCache::load`].
///
/// Entries that fail to parse are skipped rather than failing the load, so
/// callers that need strict validation compare `dropped` against zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Items now held by the cache.
    pub loaded: usize,
    /// Entries in the file that did not parse.
    pub dropped: usize,
}

/// An ordered collection of uniquely-identified items backed by one file.
///
/// Ids are checked for uniqueness on [`add`](Self::add) only. A
/// [`load`](Self::load) replaces the collection with whatever the file holds.
#[derive(Debug)]
pub struct FileCache<T, S = DocumentsDir> {
    items: Vec<T>,
    storage: S,
}

impl<T: Cacheable> FileCache<T> {
    /// A cache stored in the user's documents directory.
    pub fn new(items: Vec<T>) -> Self {
        Self::with_storage(items, DocumentsDir)
    }
}

impl<T: Cacheable, S: Storage> FileCache<T, S> {
    pub fn with_storage(items: Vec<T>, storage: S) -> Self {
        Self { items, storage }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Append `item`, failing with `DuplicateId` if its id is already present.
    pub fn add(&mut self, item: T) -> Result<()> {
        if self.contains(item.id()) {
            return Err(FileCacheError::DuplicateId {
                id: format!("{:?}", item.id()),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove and return the first item with `id`, if any.
    pub fn remove_item(&mut self, id: &T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Write every item to `file`, replacing its previous contents.
    pub fn save(&self, file: &str, options: &PersistOptions) -> Result<()> {
        self.storage.locate(file)?;

        let contents = match options.format {
            FileFormat::Json => self.encode_json()?,
            FileFormat::Csv => self.encode_csv(options).into_bytes(),
        };
        self.storage.write(file, &contents)?;

        debug!(
            file,
            format = options.format.name(),
            items = self.items.len(),
            bytes = contents.len(),
            "saved cache"
        );
        Ok(())
    }

    /// Replace the collection with the items stored in `file`.
    ///
    /// On error the collection is left as it was.
    pub fn load(&mut self, file: &str, options: &PersistOptions) -> Result<LoadReport> {
        self.storage.locate(file)?;
        let bytes = self.storage.read(file)?;

        let (items, dropped) = match options.format {
            FileFormat::Json => decode_json(&bytes)?,
            FileFormat::Csv => decode_csv(&bytes, options)?,
        };
        self.items = items;

        let report = LoadReport {
            loaded: self.items.len(),
            dropped,
        };
        debug!(
            file,
            format = options.format.name(),
            loaded = report.loaded,
            dropped = report.dropped,
            "loaded cache"
        );
        Ok(report)
    }

    fn encode_json(&self) -> Result<Vec<u8>> {
        let elements = self
            .items
            .iter()
            .map(|item| {
                item.to_json().ok_or_else(|| {
                    FileCacheError::InvalidJson(format!(
                        "item {:?} has no JSON representation",
                        item.id()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let array = Value::Array(elements);
        serde_json::to_vec_pretty(&array).map_err(|e| FileCacheError::InvalidJson(e.to_string()))
    }

    fn encode_csv(&self, options: &PersistOptions) -> String {
        let separator = options.separator.as_str();
        std::iter::once(T::csv_header(separator))
            .chain(self.items.iter().map(|item| item.to_csv_row(separator)))
            .collect::<Vec<_>>()
            .join(options.line_separator.as_str())
    }
}

fn decode_json<T: Cacheable>(bytes: &[u8]) -> Result<(Vec<T>, usize)> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| FileCacheError::InvalidJson(e.to_string()))?;
    let Value::Array(elements) = value else {
        return Err(FileCacheError::InvalidJson(
            "top-level value is not an array".to_string(),
        ));
    };

    let total = elements.len();
    let items: Vec<T> = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let item = T::parse_json(element);
            if item.is_none() {
                trace!(index, "dropping unparseable JSON element");
            }
            item
        })
        .collect();
    let dropped = total - items.len();
    Ok((items, dropped))
}

fn decode_csv<T: Cacheable>(bytes: &[u8], options: &PersistOptions) -> Result<(Vec<T>, usize)> {
    let text = std::str::from_utf8(bytes).map_err(|e| FileCacheError::InvalidCsv(e.to_string()))?;

    // The first line is the header, whatever it says.
    let lines = options.line_separator.split_lines(text);
    let rows = lines.get(1..).unwrap_or_default();

    let total = rows.len();
    let items: Vec<T> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let item = T::parse_csv(row, &options.separator);
            if item.is_none() {
                trace!(line = index + 1, "dropping unparseable CSV row");
            }
            item
        })
        .collect();
    let dropped = total - items.len();
    Ok((items, dropped))
}
