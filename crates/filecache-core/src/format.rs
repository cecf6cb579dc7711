use std::path::Path;

/// On-disk representation of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFormat {
    /// A single JSON array, one element per item.
    #[default]
    Json,
    /// A header line followed by one delimited row per item.
    Csv,
}

impl FileFormat {
    /// Resolve a format by name (`"json"` or `"csv"`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Guess the format from a file name's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Token placed between CSV lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSeparator {
    /// The literal two-character sequence `/n`.
    ///
    /// Existing cache files use this token instead of a real newline, so it
    /// stays the default to keep them readable.
    #[default]
    Legacy,
    /// A real `\n`.
    ///
    /// On load a trailing `\r` is stripped from each line and a final empty
    /// line is ignored, so files saved by hand with CRLF endings or a closing
    /// newline still read back cleanly.
    Newline,
}

impl LineSeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "/n",
            Self::Newline => "\n",
        }
    }

    /// Split file text into lines, header included.
    pub fn split_lines(self, text: &str) -> Vec<&str> {
        let mut lines: Vec<&str> = text.split(self.as_str()).collect();
        if self == Self::Legacy {
            return lines;
        }
        if lines.len() > 1 && lines.last() == Some(&"") {
            lines.pop();
        }
        lines
            .into_iter()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    }
}

/// How a cache is written to or read from its file.
///
/// The default is JSON with `,` as the CSV field separator and the legacy
/// line separator, matching what `save`/`load` did before options existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOptions {
    pub format: FileFormat,
    /// Field separator for CSV rows. Ignored for JSON.
    pub separator: String,
    /// Line separator for CSV files. Ignored for JSON.
    pub line_separator: LineSeparator,
}

impl Default for PersistOptions {
    fn default() -> Self {
        Self {
            format: FileFormat::Json,
            separator: ",".to_string(),
            line_separator: LineSeparator::Legacy,
        }
    }
}

impl PersistOptions {
    pub fn json() -> Self {
        Self::default()
    }

    pub fn csv(separator: impl Into<String>) -> Self {
        Self {
            format: FileFormat::Csv,
            separator: separator.into(),
            ..Self::default()
        }
    }

    pub fn with_line_separator(mut self, line_separator: LineSeparator) -> Self {
        self.line_separator = line_separator;
        self
    }
}
