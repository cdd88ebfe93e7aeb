//! Shared per-cell decision rules for both forward transcoders.
//!
//! Worksheet flag cells arrive as text or numbers depending on how the sheet
//! was edited; each rule here spells out its coercion per [`Cell`] variant.

use lazy_static::lazy_static;
use regex::Regex;

use crate::grid::Cell;

lazy_static! {
    // printf-style placeholders in either platform dialect: %s, %d, %1$s,
    // %ld, %@, %2$@ and friends.
    static ref FORMAT_SPEC_REGEX: Regex =
        Regex::new(r"%(?:\d+\$)?l{0,2}[@sdiufxX]").unwrap();
}

/// CDATA wrapper markers, written literally into the markup text.
pub const CDATA_PREFIX: &str = "<![CDATA[";
pub const CDATA_SUFFIX: &str = "]]>";
/// Line-break marker substituted for newlines inside CDATA text.
pub const LINE_BREAK: &str = "<br/>";

/// Resolves the per-row translatable flag. A blank cell means translatable;
/// a numeric flag is false only at zero. Text is truthy when non-blank,
/// matching spreadsheet convention where the flag column holds 0 or 1.
pub fn resolve_translatable(flag: &Cell) -> bool {
    match flag {
        Cell::Number(n) => *n != 0.0,
        Cell::Empty | Cell::Text(_) => true,
    }
}

/// True when the flag cell holds the numeral one or (case-insensitively) the
/// word "yes".
pub fn is_cdata(flag: &Cell) -> bool {
    match flag {
        Cell::Number(n) => *n == 1.0,
        Cell::Text(s) => s.trim().eq_ignore_ascii_case("yes"),
        Cell::Empty => false,
    }
}

/// The column's own text when non-blank, else the default-language text, else
/// the empty string.
pub fn effective_text(cell: &Cell, fallback: &Cell) -> String {
    if !cell.is_blank() {
        cell.text()
    } else if !fallback.is_blank() {
        fallback.text()
    } else {
        String::new()
    }
}

/// Escapes embedded newlines as explicit line breaks, then wraps the text in
/// CDATA markers. For markup emission only.
pub fn wrap_cdata(text: &str) -> String {
    format!(
        "{}{}{}",
        CDATA_PREFIX,
        text.replace('\n', LINE_BREAK),
        CDATA_SUFFIX
    )
}

/// Reverses [`wrap_cdata`]: strips the marker pair and restores line breaks.
/// Text without the leading marker passes through unchanged.
pub fn strip_cdata(text: &str) -> String {
    match text
        .strip_prefix(CDATA_PREFIX)
        .and_then(|t| t.strip_suffix(CDATA_SUFFIX))
    {
        Some(inner) => inner.replace(LINE_BREAK, "\n"),
        None => text.to_string(),
    }
}

/// Removes printf-style format placeholders. JSON consumers receive human
/// text without native-format placeholder syntax.
pub fn strip_format_specifiers(text: &str) -> String {
    FORMAT_SPEC_REGEX.replace_all(text, "").into_owned()
}
