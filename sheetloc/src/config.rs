//! Run configuration for a transcoding pass.
//!
//! Every knob the transcoders consult lives in [`TranslateOptions`], built
//! once per run and passed explicitly; there is no ambient global state. The
//! defaults match the layout of the HelpinOut translation workbook the tool
//! was written for.

use std::path::PathBuf;

/// Root element of the Android resource document.
pub const XML_TAG_ROOT: &str = "resources";
/// Per-key child element of the Android resource document.
pub const XML_TAG_STRING: &str = "string";
/// Attribute carrying the translation key.
pub const XML_ATTR_NAME: &str = "name";
/// Attribute marking a string as not translatable.
pub const XML_ATTR_TRANSLATABLE: &str = "translatable";

/// Fixed file name of every Android resource artifact.
pub const XML_RESOURCE_FILE_NAME: &str = "strings.xml";
/// Expected prefix of Android resource directories on the reverse path.
pub const XML_VALUES_DIR_PREFIX: &str = "values";

/// Reserved first field of every JSON locale record.
pub const JSON_LOCALE_NAME_KEY: &str = "Locale_Code";

/// Default locale table source.
pub const LOCALE_FILE_NAME: &str = "locale.json";

/// Default archive names for the two output formats.
pub const XML_ARCHIVE_NAME: &str = "android_languages.zip";
pub const JSON_ARCHIVE_NAME: &str = "ios_languages.zip";

/// First row of translation entries.
pub const DEFAULT_START_ROW: u32 = 3;
/// First language column; this is also the English column.
pub const DEFAULT_START_COL: u32 = 6;
/// Column holding the translation keys.
pub const DEFAULT_KEY_COL: u32 = 1;
/// Column against which missing translations fall back.
pub const DEFAULT_ENGLISH_COL: u32 = 6;
/// Column holding the per-row CDATA flag.
pub const DEFAULT_CDATA_COL: u32 = 4;
/// Column holding the per-row translatable flag.
pub const DEFAULT_TRANS_COL: u32 = 5;
/// Row holding the two-letter locale codes used to name JSON artifacts.
pub const DEFAULT_JSON_LANG_ROW: u32 = 2;
/// Row holding the English language names used to name XML directories.
pub const DEFAULT_XML_LANG_ROW: u32 = 1;
/// Rows scanned when probing whether a column carries any data.
pub const DEFAULT_PROBE_DEPTH: u32 = 10;

/// Where finished artifacts end up: loose on the filesystem, or appended to
/// one aggregate zip archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkMode {
    Filesystem,
    #[default]
    Archive,
}

/// Explicit configuration for one transcoding run.
///
/// Rows and columns are 1-indexed; an `end_row`/`end_col` of `0` means "last
/// row/column of the grid" and is resolved once against the grid's extent.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,

    /// Header row holding locale codes, consulted by the JSON path.
    pub json_lang_row: u32,
    /// Header row holding language names, consulted by the XML path.
    pub xml_lang_row: u32,

    pub key_col: u32,
    /// Default/base language column: fallback source for missing
    /// translations, and the only column whose non-translatable entries are
    /// emitted (with an explicit marker attribute).
    pub default_col: u32,
    pub cdata_col: u32,
    pub trans_col: u32,

    /// Stop a column at the first blank key. The source workbook carries
    /// blank padding rows at the bottom.
    pub stop_on_null: bool,
    /// Abort the whole run on the first per-column error instead of skipping
    /// the column.
    pub stop_on_err: bool,

    pub probe_depth: u32,
    pub sink: SinkMode,
    /// Directory artifacts (and archives) are written under.
    pub out_dir: PathBuf,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            start_row: DEFAULT_START_ROW,
            end_row: 0,
            start_col: DEFAULT_START_COL,
            end_col: 0,
            json_lang_row: DEFAULT_JSON_LANG_ROW,
            xml_lang_row: DEFAULT_XML_LANG_ROW,
            key_col: DEFAULT_KEY_COL,
            default_col: DEFAULT_ENGLISH_COL,
            cdata_col: DEFAULT_CDATA_COL,
            trans_col: DEFAULT_TRANS_COL,
            stop_on_null: true,
            stop_on_err: false,
            probe_depth: DEFAULT_PROBE_DEPTH,
            sink: SinkMode::default(),
            out_dir: PathBuf::from("."),
        }
    }
}
