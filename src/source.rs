//! Delimited-text table reader and per-product index builder.
//!
//! Reads a whole table into memory as header-keyed rows. Every call re-reads
//! the file from disk; nothing is cached here. Caching happens one level up,
//! in [`SnapshotStore`](crate::snapshot::SnapshotStore).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Encoding, DEFAULT_DELIMITER};
use crate::error::{MarginError, Result};

/// One data row keyed by its (trimmed) header names.
pub type RawRow = HashMap<String, String>;

// ---------------------------------------------------------------------------
// TableSource
// ---------------------------------------------------------------------------

/// A single delimited text file with a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    pub path: PathBuf,
    pub encoding: Encoding,
    pub delimiter: u8,
}

impl TableSource {
    /// Create a tab-delimited UTF-8 source for `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            encoding: Encoding::default(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read and parse the whole file.
    ///
    /// Any failure (missing file, permissions, undecodable bytes, broken
    /// quoting) is reported as [`MarginError::SourceUnavailable`] naming the
    /// file. No partial result is ever returned.
    pub fn load(&self) -> Result<Vec<RawRow>> {
        self.load_with_columns(&[])
    }

    /// Like [`load`](Self::load), and additionally require that every name in
    /// `columns` is present in the header row.
    pub fn load_with_columns(&self, columns: &[&str]) -> Result<Vec<RawRow>> {
        let text = self.read_text()?;
        let (headers, rows) = read_table(&text, self.delimiter)
            .map_err(|e| MarginError::source_unavailable(&self.path, e))?;
        if let Some(missing) = columns.iter().find(|c| !headers.iter().any(|h| h == *c)) {
            return Err(MarginError::source_unavailable(
                &self.path,
                format!("missing column '{missing}'"),
            ));
        }
        Ok(rows)
    }

    fn read_text(&self) -> Result<String> {
        let bytes =
            fs::read(&self.path).map_err(|e| MarginError::source_unavailable(&self.path, e))?;
        self.encoding.decode(bytes).map_err(|e| {
            MarginError::source_unavailable(&self.path, format!("not valid {}: {e}", self.encoding))
        })
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn read_table(text: &str, delimiter: u8) -> csv::Result<(Vec<String>, Vec<RawRow>)> {
    let mut reader = reader_for(text, delimiter);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let rows = reader
        .records()
        .map(|record| -> csv::Result<RawRow> {
            let record = record?;
            Ok(headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect())
        })
        .collect::<csv::Result<Vec<_>>>()?;
    Ok((headers, rows))
}

fn reader_for(text: &str, delimiter: u8) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes())
}

/// Cell value for `column`, or `""` when the row has no such cell.
pub fn field<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

// ---------------------------------------------------------------------------
// Indexing
// ---------------------------------------------------------------------------

/// Group records by trimmed key, preserving file order inside each group.
///
/// The "latest" aggregation breaks date ties by file position, so the order
/// within a group must match the source.
pub fn index<T, F>(records: Vec<T>, key: F) -> HashMap<String, Vec<T>>
where
    F: Fn(&T) -> &str,
{
    let mut groups: HashMap<String, Vec<T>> = HashMap::new();
    for record in records {
        let k = key(&record).trim().to_string();
        groups.entry(k).or_default().push(record);
    }
    groups
}
