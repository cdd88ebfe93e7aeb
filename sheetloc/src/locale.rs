//! The locale table: an external code→display-name mapping used to annotate
//! JSON locale records.

use std::{collections::HashSet, io::BufRead, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One `(code, name)` pair from the locale source, e.g.
/// `{"code": "fr", "name": "French"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocaleEntry {
    pub code: String,
    pub name: String,
}

/// Ordered list of locale entries with unique codes.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    entries: Vec<LocaleEntry>,
}

impl LocaleTable {
    /// Parses a JSON array of `{"code", "name"}` records from any reader.
    ///
    /// Duplicate codes fail fast here so lookups stay deterministic.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let entries: Vec<LocaleEntry> = serde_json::from_reader(reader)
            .map_err(|e| Error::config(format!("malformed locale source: {}", e)))?;
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.code.as_str()) {
                return Err(Error::config(format!(
                    "duplicate locale code \"{}\" in locale table",
                    entry.code
                )));
            }
        }
        Ok(LocaleTable { entries })
    }

    /// Loads the table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            Error::config(format!("\"{}\" is not a readable file: {}", path.display(), e))
        })?;
        Self::from_reader(std::io::BufReader::new(file)).map_err(|e| match e {
            Error::Config(message) => Error::config(format!("\"{}\": {}", path.display(), message)),
            other => other,
        })
    }

    /// Resolves a locale code to its display name.
    ///
    /// An empty code means the language header cell was missing, which is
    /// reported distinctly from a code that is simply not in the table.
    pub fn lookup(&self, code: &str) -> Result<&str, Error> {
        if code.is_empty() {
            return Err(Error::lookup("missing language code in header row"));
        }
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.name.as_str())
            .ok_or_else(|| Error::lookup(format!("no locale entry for code \"{}\"", code)))
    }

    pub fn entries(&self) -> &[LocaleEntry] {
        &self.entries
    }
}

impl std::str::FromStr for LocaleTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(std::io::Cursor::new(s))
    }
}
