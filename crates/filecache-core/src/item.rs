use std::fmt::Debug;

use serde_json::Value;

/// A record with a stable identity.
///
/// Two items with equal ids may not live in the same
/// [`FileCache`](crate::FileCache) at once.
pub trait Identifiable {
    type Id: PartialEq + Debug;

    fn id(&self) -> &Self::Id;
}

/// Conversion between an item and a loosely-typed JSON value.
pub trait JsonConvertible: Sized {
    /// Rebuild one item from a JSON value. Returns `None` when the value does
    /// not have the expected shape.
    fn parse_json(value: &Value) -> Option<Self>;

    /// The JSON representation of this item, or `None` if it has none (for
    /// example a map keyed by something other than strings).
    fn to_json(&self) -> Option<Value>;
}

/// Conversion between an item and one delimited text row.
///
/// Fields must not contain the separator or the line separator; no quoting
/// is performed.
pub trait CsvConvertible: Sized {
    /// Parse a single row. Returns `None` for malformed rows.
    fn parse_csv(row: &str, separator: &str) -> Option<Self>;

    /// The header line written above the rows.
    fn csv_header(separator: &str) -> String;

    /// This item as a single row.
    fn to_csv_row(&self, separator: &str) -> String;
}

/// Everything a [`FileCache`](crate::FileCache) needs from its item type.
pub trait Cacheable: Identifiable + JsonConvertible + CsvConvertible {}

impl<T: Identifiable + JsonConvertible + CsvConvertible> Cacheable for T {}

/// Implement [`JsonConvertible`] for a type through its serde impls.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Note { id: u32, title: String }
/// json_via_serde!(Note);
/// ```
#[macro_export]
macro_rules! json_via_serde {
    ($name:ty) => {
        impl $crate::item::JsonConvertible for $name {
            fn parse_json(value: &$crate::__private::serde_json::Value) -> Option<Self> {
                <Self as $crate::__private::serde::Deserialize>::deserialize(value).ok()
            }

            fn to_json(&self) -> Option<$crate::__private::serde_json::Value> {
                $crate::__private::serde_json::to_value(self).ok()
            }
        }
    };
}
