#![forbid(unsafe_code)]
//! Translation spreadsheet transcoder.
//!
//! Turns one multilingual translation workbook into per-language
//! localization artifacts: Android `strings.xml` resource documents and flat
//! iOS JSON locale files. A reverse path derives the JSON files from
//! existing Android XML artifacts (loose files or a zip of them).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetloc::{LocaleTable, TranslateOptions, Translator, XlsxGrid};
//!
//! let grid = XlsxGrid::open("translations.xlsx")?;
//! let translator = Translator::new(grid, TranslateOptions::default())?;
//! translator.to_xml()?;
//!
//! let locales = LocaleTable::load("locale.json")?;
//! translator.to_json(&locales)?;
//! # Ok::<(), sheetloc::Error>(())
//! ```
//!
//! # Layout assumptions
//!
//! Each language occupies one column past a configurable start; header rows
//! carry the locale code (JSON path) and language name (XML path); a fixed
//! key column identifies each translatable string. All of it is configurable
//! through [`TranslateOptions`].

pub mod config;
pub mod error;
pub mod grid;
pub mod locale;
pub mod policy;
pub mod sink;
pub mod transcode;
pub mod translator;
pub mod xlsx;

// Re-export most used types for easy consumption
pub use crate::{
    config::{SinkMode, TranslateOptions},
    error::Error,
    grid::{Cell, Grid, VecGrid, Window},
    locale::{LocaleEntry, LocaleTable},
    transcode::xml_to_json::{ReverseOptions, XmlToJson},
    transcode::{LocaleRecord, TranslationRecord},
    translator::Translator,
    xlsx::XlsxGrid,
};
