//! Transcoding of one language column into a flat iOS JSON locale record.

use std::{io::Write, path::Path};

use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};

use crate::{
    config::{JSON_LOCALE_NAME_KEY, TranslateOptions},
    error::Error,
    grid::{Grid, Window},
    locale::LocaleTable,
    policy,
};

/// An ordered key/value record for one language, headed by the resolved
/// locale display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRecord {
    /// Locale code from the JSON header row, as found in the sheet.
    pub language: String,
    /// Display name resolved through the locale table.
    pub locale_name: String,
    pub entries: Map<String, Value>,
}

/// Extracts one language column into a [`LocaleRecord`].
///
/// The column's code is read from the JSON header row and resolved through
/// the locale table; failure to resolve is fatal for this column. Rows whose
/// default-language cell is blank carry no anchor text and are skipped; blank
/// keys terminate the column under `stop_on_null` as on the XML path.
pub fn transcode<G: Grid>(
    grid: &G,
    column: u32,
    options: &TranslateOptions,
    window: &Window,
    locales: &LocaleTable,
) -> Result<LocaleRecord, Error> {
    let code = grid.cell(options.json_lang_row, column).text();
    let code = code.trim();
    let locale_name = locales.lookup(code)?.to_string();

    let mut entries = Map::new();
    for row in window.start_row..=window.end_row {
        let key = grid.cell(row, options.key_col);
        if options.stop_on_null && key.is_blank() {
            break;
        }

        let default = grid.cell(row, options.default_col);
        if default.is_blank() {
            continue;
        }

        let own = grid.cell(row, column);
        let text = policy::strip_format_specifiers(&policy::effective_text(&own, &default));
        entries.insert(key.text().trim().to_string(), Value::String(text));
    }

    Ok(LocaleRecord {
        language: code.to_string(),
        locale_name,
        entries,
    })
}

impl LocaleRecord {
    /// The record as a JSON object with the locale name as its first field.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            JSON_LOCALE_NAME_KEY.to_string(),
            Value::String(self.locale_name.clone()),
        );
        for (key, value) in &self.entries {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// Serializes with 4-space indentation; non-ASCII characters are written
    /// literally.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.to_json().serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Writes the record to a file, creating parent directories on demand.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        self.to_writer(std::io::BufWriter::new(file))
    }
}
