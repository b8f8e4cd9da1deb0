use std::fmt;
use std::path::PathBuf;

/// Identifies an academic year, e.g. `111` for the 2022 admission round.
///
/// Used both as the URL template parameter and as the label of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YearKey(String);

impl YearKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for YearKey {
    fn from(year: u32) -> Self {
        Self(year.to_string())
    }
}

impl From<&str> for YearKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for YearKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `<td>` of the source table: where it goes and what it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRecord {
    /// A1-style address, e.g. `B3`.
    pub address: String,
    /// `None` when the source cell carries no value attribute.
    pub raw_value: Option<String>,
}

impl CellRecord {
    pub fn new(address: impl Into<String>, raw_value: Option<String>) -> Self {
        Self {
            address: address.into(),
            raw_value,
        }
    }
}

/// Files produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub title: String,
    pub spreadsheet: PathBuf,
    pub image: PathBuf,
}
