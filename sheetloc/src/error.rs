//! All error types for the sheetloc crate.
//!
//! These are returned from all fallible operations (window resolution, locale
//! lookup, transcoding, output packaging, etc.).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Bad run configuration: unreadable input, malformed locale source,
    /// missing language header. Fatal to the run at setup time; fatal only to
    /// the current column when raised inside a column's processing.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Window bounds outside the grid extent. Always raised at setup time.
    #[error("window out of range: {0}")]
    Range(String),

    /// Locale code missing or not present in the locale table. Fatal to the
    /// current column only.
    #[error("locale lookup failed: {0}")]
    Lookup(String),

    #[error("invalid data: {0}")]
    Data(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spreadsheet error: {0}")]
    Sheet(#[from] calamine::XlsxError),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn range(message: impl Into<String>) -> Self {
        Error::Range(message.into())
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        Error::Lookup(message.into())
    }
}
