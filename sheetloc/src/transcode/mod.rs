//! The three transcoding paths: spreadsheet column to Android XML,
//! spreadsheet column to iOS JSON, and existing Android XML back to iOS JSON.

pub mod android_xml;
pub mod ios_json;
pub mod xml_to_json;

pub use android_xml::TranslationRecord;
pub use ios_json::LocaleRecord;
