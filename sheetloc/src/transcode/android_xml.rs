//! Transcoding of one language column into an Android `strings.xml` resource
//! document.

use std::{io::Write, path::Path};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    config::{
        TranslateOptions, XML_ATTR_NAME, XML_ATTR_TRANSLATABLE, XML_TAG_ROOT, XML_TAG_STRING,
    },
    error::Error,
    grid::{Grid, Window},
    policy,
};

/// One `<string>` element of the resource document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub name: String,
    pub value: String,
    pub translatable: bool,
}

/// An ordered Android resource document for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    /// Language name from the XML header row, as found in the sheet.
    pub language: String,
    pub entries: Vec<StringEntry>,
}

/// Extracts one language column into a [`TranslationRecord`].
///
/// Row rules, in order:
/// 1. A blank key terminates the column when `stop_on_null` is set; nothing
///    below the blank is processed.
/// 2. Rows resolved non-translatable are emitted only for the default/base
///    language (with an explicit `translatable="false"` marker); every other
///    language omits them entirely.
/// 3. CDATA-flagged rows with a blank own cell are omitted; a missing
///    verbatim translation never falls back to the default language.
/// 4. Otherwise the text is the CDATA-wrapped own cell, or the own cell with
///    default-language fallback.
pub fn transcode<G: Grid>(
    grid: &G,
    column: u32,
    options: &TranslateOptions,
    window: &Window,
) -> Result<TranslationRecord, Error> {
    let language = grid.cell(options.xml_lang_row, column);
    if language.is_blank() {
        return Err(Error::config(format!(
            "missing language name at column {}, row {}",
            column, options.xml_lang_row
        )));
    }
    let is_default = column == options.default_col;

    let mut entries = Vec::new();
    for row in window.start_row..=window.end_row {
        let key = grid.cell(row, options.key_col);
        if options.stop_on_null && key.is_blank() {
            break;
        }

        let translatable = policy::resolve_translatable(&grid.cell(row, options.trans_col));
        if !translatable && !is_default {
            continue;
        }

        let own = grid.cell(row, column);
        let cdata = policy::is_cdata(&grid.cell(row, options.cdata_col));
        if cdata && own.is_blank() {
            // Verbatim entries with no translation are omitted, not
            // substituted.
            continue;
        }

        let value = if cdata {
            policy::wrap_cdata(&own.text())
        } else {
            policy::effective_text(&own, &grid.cell(row, options.default_col))
        };

        entries.push(StringEntry {
            name: key.text(),
            value,
            translatable,
        });
    }

    Ok(TranslationRecord {
        language: language.text(),
        entries,
    })
}

impl TranslationRecord {
    /// Serializes the document with a UTF-8 declaration and stable 4-space
    /// indentation.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 4);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Start(BytesStart::new(XML_TAG_ROOT)))?;

        for entry in &self.entries {
            let mut elem = BytesStart::new(XML_TAG_STRING);
            elem.push_attribute((XML_ATTR_NAME, entry.name.as_str()));
            if !entry.translatable {
                elem.push_attribute((XML_ATTR_TRANSLATABLE, "false"));
            }
            xml_writer.write_event(Event::Start(elem))?;
            xml_writer.write_event(Event::Text(BytesText::new(&entry.value)))?;
            xml_writer.write_event(Event::End(BytesEnd::new(XML_TAG_STRING)))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new(XML_TAG_ROOT)))?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Writes the document to a file, creating parent directories on demand.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        self.to_writer(std::io::BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, VecGrid};

    // Compact layout for tests: key col 1, cdata col 2, translatable col 3,
    // English col 4, further languages from col 5.
    fn test_options() -> TranslateOptions {
        TranslateOptions {
            start_row: 2,
            start_col: 4,
            key_col: 1,
            cdata_col: 2,
            trans_col: 3,
            default_col: 4,
            xml_lang_row: 1,
            json_lang_row: 1,
            ..TranslateOptions::default()
        }
    }

    fn test_grid() -> VecGrid {
        VecGrid::from_rows(&[
            &["", "", "", "English", "French"],
            &["greeting", "", "", "Hello", "Bonjour"],
            &["farewell", "", "", "Goodbye", "Au revoir"],
        ])
    }

    fn resolve(grid: &VecGrid, options: &TranslateOptions) -> Window {
        Window::resolve(grid, options.start_row, 0, options.start_col, 0).unwrap()
    }

    #[test]
    fn test_basic_column_extraction() {
        let grid = test_grid();
        let options = test_options();
        let window = resolve(&grid, &options);

        let record = transcode(&grid, 5, &options, &window).unwrap();
        assert_eq!(record.language, "French");
        assert_eq!(record.entries.len(), 2);
        assert_eq!(record.entries[0].name, "greeting");
        assert_eq!(record.entries[0].value, "Bonjour");
    }

    #[test]
    fn test_blank_key_terminates_column() {
        let mut grid = test_grid();
        grid.push_row(vec![
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::from("Orphan"),
            Cell::from("Orphelin"),
        ]);
        grid.push_row(vec![
            Cell::from("below"),
            Cell::Empty,
            Cell::Empty,
            Cell::from("Below"),
            Cell::from("Dessous"),
        ]);
        let options = test_options();
        let window = resolve(&grid, &options);

        let record = transcode(&grid, 5, &options, &window).unwrap();
        let names: Vec<_> = record.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["greeting", "farewell"]);
    }

    #[test]
    fn test_blank_keys_kept_without_stop_on_null() {
        let mut grid = test_grid();
        grid.push_row(vec![
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::from("Orphan"),
            Cell::from("Orphelin"),
        ]);
        let mut options = test_options();
        options.stop_on_null = false;
        let window = resolve(&grid, &options);

        let record = transcode(&grid, 5, &options, &window).unwrap();
        assert_eq!(record.entries.len(), 3);
        assert_eq!(record.entries[2].name, "");
        assert_eq!(record.entries[2].value, "Orphelin");
    }

    #[test]
    fn test_non_translatable_only_in_default_language() {
        let mut grid = test_grid();
        grid.set(2, 3, Cell::Number(0.0));
        let options = test_options();
        let window = resolve(&grid, &options);

        let english = transcode(&grid, 4, &options, &window).unwrap();
        assert_eq!(english.entries.len(), 2);
        assert!(!english.entries[0].translatable);

        let french = transcode(&grid, 5, &options, &window).unwrap();
        assert_eq!(french.entries.len(), 1);
        assert_eq!(french.entries[0].name, "farewell");
    }

    #[test]
    fn test_blank_key_beats_translatable_skip() {
        // Row 4 has both a blank key and a non-translatable flag: the column
        // must terminate there rather than silently skipping the row.
        let mut grid = test_grid();
        grid.push_row(vec![
            Cell::Empty,
            Cell::Empty,
            Cell::Number(0.0),
            Cell::from("Hidden"),
            Cell::from("Cache"),
        ]);
        grid.push_row(vec![
            Cell::from("below"),
            Cell::Empty,
            Cell::Empty,
            Cell::from("Below"),
            Cell::from("Dessous"),
        ]);
        let options = test_options();
        let window = resolve(&grid, &options);

        let french = transcode(&grid, 5, &options, &window).unwrap();
        let names: Vec<_> = french.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["greeting", "farewell"]);
    }

    #[test]
    fn test_cdata_wraps_text_without_fallback() {
        let mut grid = test_grid();
        grid.set(2, 2, Cell::from("yes"));
        grid.set(2, 5, Cell::from("Ligne 1\nLigne 2"));
        let options = test_options();
        let window = resolve(&grid, &options);

        let record = transcode(&grid, 5, &options, &window).unwrap();
        assert_eq!(
            record.entries[0].value,
            "<![CDATA[Ligne 1<br/>Ligne 2]]>"
        );
    }

    #[test]
    fn test_cdata_row_with_blank_cell_is_omitted() {
        let mut grid = test_grid();
        grid.set(2, 2, Cell::Number(1.0));
        grid.set(2, 5, Cell::Empty);
        let options = test_options();
        let window = resolve(&grid, &options);

        let record = transcode(&grid, 5, &options, &window).unwrap();
        let names: Vec<_> = record.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["farewell"]);
    }

    #[test]
    fn test_blank_translation_falls_back_to_default() {
        let mut grid = test_grid();
        grid.set(3, 5, Cell::Empty);
        let options = test_options();
        let window = resolve(&grid, &options);

        let record = transcode(&grid, 5, &options, &window).unwrap();
        assert_eq!(record.entries[1].value, "Goodbye");
    }

    #[test]
    fn test_missing_language_header_is_an_error() {
        let grid = test_grid();
        let mut options = test_options();
        options.xml_lang_row = 3;
        let window = resolve(&grid, &options);

        // Row 3, column 6 is outside the populated area, so the header cell
        // is blank.
        let err = transcode(&grid, 6, &options, &window).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("missing language name"));
    }

    #[test]
    fn test_serialized_document_shape() {
        let record = TranslationRecord {
            language: "English".to_string(),
            entries: vec![
                StringEntry {
                    name: "greeting".to_string(),
                    value: "Hello".to_string(),
                    translatable: true,
                },
                StringEntry {
                    name: "app_name".to_string(),
                    value: "HelpinOut".to_string(),
                    translatable: false,
                },
            ],
        };
        let mut out = Vec::new();
        record.to_writer(&mut out).unwrap();
        let xml = String::from_utf8(out).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<string name=\"greeting\">Hello</string>"));
        assert!(xml.contains("<string name=\"app_name\" translatable=\"false\">HelpinOut</string>"));
        assert!(xml.trim_end().ends_with("</resources>"));
    }
}
