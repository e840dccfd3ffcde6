//! STF string tables.
//!
//! STF is a write-only binary format mapping localization keys to display
//! strings. Its layout is fixed by the game client that reads it, including the
//! zero byte that follows every value character (but no key character).

use ahash::AHashMap;
use std::fs;
use std::path::Path;

use crate::error::EncodingError;

mod rows;
mod width;
mod writer;

pub use rows::{TASK_ACTION, conversation_rows, task_rows};
pub use width::{width_class, write_min_width};
pub use writer::encode_table;

/// Fixed 9-byte file preamble.
pub const STF_PREAMBLE: [u8; 9] = [0xCD, 0xAB, 0, 0, 0, 0, 0, 0, 0];

/// Marker written between a value row's index and its character count.
pub const ROW_SENTINEL: [u8; 4] = [0xFF; 4];

/// Encodes ordered (key, value) rows into STF bytes.
pub fn encode_localization_table<K, V>(rows: &[(K, V)]) -> Result<Vec<u8>, EncodingError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    encode_table(rows)
}

/// An ordered list of localized strings ready to be written as an STF file.
///
/// Keys do not need to be unique; each row keeps its insertion position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizationTable {
    rows: Vec<(String, String)>,
}

impl LocalizationTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<(String, String)>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.rows.push((key.into(), value.into()));
    }

    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the value stored under `key`. When a key repeats, the last row wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.rows
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Key id -> value map with the same last-row-wins rule as [`get`](Self::get).
    pub fn to_map(&self) -> AHashMap<&str, &str> {
        self.rows
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        encode_table(&self.rows)
    }

    /// Encodes the table and writes it to `path`.
    pub fn save(&self, path: &Path) -> Result<(), EncodingError> {
        let bytes = self.encode()?;
        fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), rows = self.rows.len(), "string table written");
        Ok(())
    }
}

impl FromIterator<(String, String)> for LocalizationTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
