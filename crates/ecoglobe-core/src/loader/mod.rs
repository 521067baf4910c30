// crates/ecoglobe-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (local files, HTTP, decompression) and
//! delegates to the delimited-text parser.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub mod common_io;
pub mod dsv;
#[cfg(feature = "fetch")]
mod remote;

pub use dsv::{parse_table, parse_table_with, Delimiter, Row};

/// Where a dataset lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum TableSource {
    Path(PathBuf),
    Url(String),
}

impl TableSource {
    /// Classifies a location string: `http(s)://` is remote, `file://` and
    /// everything else is a local path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            TableSource::Url(location.to_string())
        } else if lower.starts_with("file://") {
            TableSource::Path(PathBuf::from(&location["file://".len()..]))
        } else {
            TableSource::Path(PathBuf::from(location))
        }
    }
}

impl FromStr for TableSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for TableSource {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TableSource> for String {
    fn from(s: TableSource) -> Self {
        s.to_string()
    }
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Path(p) => write!(f, "{}", p.display()),
            TableSource::Url(u) => f.write_str(u),
        }
    }
}

/// Returns the raw text behind `source`.
pub fn fetch_text(source: &TableSource) -> Result<String> {
    match source {
        TableSource::Path(path) => common_io::read_text(path),
        #[cfg(feature = "fetch")]
        TableSource::Url(url) => remote::get_text(url),
        #[cfg(not(feature = "fetch"))]
        TableSource::Url(url) => Err(crate::error::GlobeError::InvalidData(format!(
            "cannot load {url}: built without the 'fetch' feature"
        ))),
    }
}

/// Fetches `source`, sniffs its delimiter and maps every row with `mapper`.
pub fn load_table<T, F>(source: &TableSource, mapper: F) -> Result<Vec<T>>
where
    F: FnMut(&Row<'_>) -> T,
{
    let text = fetch_text(source)?;
    let delimiter = Delimiter::detect(&text);
    let rows = parse_table_with(&text, delimiter, mapper);
    tracing::debug!(source = %source, ?delimiter, rows = rows.len(), "loaded table");
    Ok(rows)
}
