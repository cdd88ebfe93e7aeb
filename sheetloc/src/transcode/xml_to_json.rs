//! The reverse path: existing Android `strings.xml` artifacts (loose files or
//! a zip of them) transcoded back into iOS JSON locale records.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use quick_xml::{Reader, events::Event};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::{
    config::{
        JSON_ARCHIVE_NAME, SinkMode, XML_ATTR_NAME, XML_RESOURCE_FILE_NAME, XML_TAG_ROOT,
        XML_TAG_STRING, XML_VALUES_DIR_PREFIX,
    },
    error::Error,
    locale::LocaleTable,
    policy,
    sink::{self, OutputSink},
    transcode::ios_json::LocaleRecord,
};

/// Options for one reverse-transcoding run.
#[derive(Debug, Clone)]
pub struct ReverseOptions {
    pub stop_on_err: bool,
    pub sink: SinkMode,
    pub out_dir: PathBuf,
}

impl Default for ReverseOptions {
    fn default() -> Self {
        ReverseOptions {
            stop_on_err: false,
            sink: SinkMode::default(),
            out_dir: PathBuf::from("."),
        }
    }
}

/// Derives the language code from an artifact's path.
///
/// A `values-mr/strings.xml` style path takes the containing directory's
/// name after its last hyphen; any other file, like a bare `mr.xml`, takes
/// the file's base name. Both shapes only warn when they deviate from
/// convention; the reverse parse is lenient.
pub fn language_from_path(path: &Path) -> String {
    let dir = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str());
    let is_resource_file =
        path.file_name().and_then(|s| s.to_str()) == Some(XML_RESOURCE_FILE_NAME);
    match dir.filter(|_| is_resource_file) {
        Some(dir) => match dir.rsplit_once('-') {
            Some((prefix, code)) => {
                if prefix != XML_VALUES_DIR_PREFIX {
                    warn!(
                        "directory \"{}\" does not have the expected format \"{}-<lang>\"",
                        dir, XML_VALUES_DIR_PREFIX
                    );
                }
                code.to_string()
            }
            None => {
                if dir != XML_VALUES_DIR_PREFIX {
                    warn!(
                        "directory \"{}\" does not have the expected format \"{}-<lang>\"",
                        dir, XML_VALUES_DIR_PREFIX
                    );
                }
                dir.to_string()
            }
        },
        None => {
            if path.extension().and_then(|e| e.to_str()) != Some("xml") {
                warn!(
                    "file \"{}\" does not have the expected extension \".xml\"",
                    path.display()
                );
            }
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string()
        }
    }
}

/// Parses a resource document into `(name, text)` pairs in document order.
///
/// A root element other than `<resources>` is a warning, not a failure.
/// Element text arriving as a genuine CDATA node is taken literally; text
/// carrying escaped wrapper markers has them stripped positionally.
pub fn parse_document(content: &str, origin: &Path) -> Result<Vec<(String, String)>, Error> {
    let mut reader = Reader::from_reader(content.as_bytes());
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut saw_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if !saw_root {
                    saw_root = true;
                    if e.name().as_ref() != XML_TAG_ROOT.as_bytes() {
                        warn!(
                            "root element in \"{}\" is \"{}\" instead of \"{}\"",
                            origin.display(),
                            String::from_utf8_lossy(e.name().as_ref()),
                            XML_TAG_ROOT
                        );
                    }
                } else if e.name().as_ref() == XML_TAG_STRING.as_bytes() {
                    let name = string_name(e)?;
                    let text = read_string_text(&mut reader)?;
                    entries.push((name, text));
                }
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == XML_TAG_STRING.as_bytes() => {
                let name = string_name(e)?;
                entries.push((name, String::new()));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(entries)
}

fn string_name(e: &quick_xml::events::BytesStart<'_>) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::Data(e.to_string()))?;
        if attr.key.as_ref() == XML_ATTR_NAME.as_bytes() {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::Data(format!(
        "{} tag missing '{}'",
        XML_TAG_STRING, XML_ATTR_NAME
    )))
}

fn read_string_text(reader: &mut Reader<&[u8]>) -> Result<String, Error> {
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(Error::XmlParse)?.to_string();
                return Ok(policy::strip_cdata(&text));
            }
            Ok(Event::CData(e)) => {
                return Ok(String::from_utf8_lossy(&e.into_inner()).into_owned());
            }
            Ok(Event::End(_)) => return Ok(String::new()),
            Ok(Event::Eof) => return Err(Error::Data("unexpected EOF".to_string())),
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
}

/// Transcodes one resource document into a [`LocaleRecord`], deriving the
/// language from `path` and resolving its display name through the locale
/// table.
pub fn transcode(path: &Path, content: &str, locales: &LocaleTable) -> Result<LocaleRecord, Error> {
    let language = language_from_path(path);
    let locale_name = locales.lookup(&language)?.to_string();

    let mut entries = Map::new();
    for (name, text) in parse_document(content, path)? {
        entries.insert(name.trim().to_string(), Value::String(text));
    }

    Ok(LocaleRecord {
        language,
        locale_name,
        entries,
    })
}

/// Whole-run driver for the reverse path: one JSON artifact per input
/// document, loose XML files and zip archives mixed freely.
pub struct XmlToJson<'a> {
    locales: &'a LocaleTable,
    options: ReverseOptions,
}

impl<'a> XmlToJson<'a> {
    pub fn new(locales: &'a LocaleTable, options: ReverseOptions) -> Self {
        XmlToJson { locales, options }
    }

    /// Processes every input in order. Per-input errors are logged and
    /// skipped unless `stop_on_err` is set, in which case the sink is closed
    /// and the error propagates.
    pub fn run(&self, files: &[PathBuf]) -> Result<(), Error> {
        let mut sink = sink::open(self.options.sink, &self.options.out_dir, JSON_ARCHIVE_NAME)?;

        let mut result = Ok(());
        for file in files {
            match self.process_input(file, sink.as_mut()) {
                Ok(()) => {}
                Err(e) => {
                    error!("error processing \"{}\": {}", file.display(), e);
                    if self.options.stop_on_err {
                        result = Err(e);
                        break;
                    }
                }
            }
        }

        let finished = sink.finish();
        result.and(finished)
    }

    fn process_input(&self, path: &Path, sink: &mut dyn OutputSink) -> Result<(), Error> {
        if is_zip_file(path)? {
            self.process_archive(path, sink)
        } else {
            let content = std::fs::read_to_string(path)?;
            self.process_document(path, &content, sink)
        }
    }

    fn process_archive(&self, path: &Path, sink: &mut dyn OutputSink) -> Result<(), Error> {
        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        for index in 0..archive.len() {
            let mut member = archive.by_index(index)?;
            if member.is_dir() {
                continue;
            }
            let member_path = PathBuf::from(member.name());
            let mut content = String::new();
            member.read_to_string(&mut content)?;
            self.process_document(&member_path, &content, sink)?;
        }
        Ok(())
    }

    fn process_document(
        &self,
        path: &Path,
        content: &str,
        sink: &mut dyn OutputSink,
    ) -> Result<(), Error> {
        let record = transcode(path, content, self.locales)?;
        let rel = PathBuf::from(format!("{}.json", record.language.to_lowercase()));
        record.write_to(self.options.out_dir.join(&rel))?;
        info!(
            "wrote {} strings from \"{}\" to \"{}\"",
            record.entries.len(),
            path.display(),
            rel.display()
        );
        sink.submit(&rel)
    }
}

/// Zip inputs are recognized by magic bytes, not extension.
fn is_zip_file(path: &Path) -> Result<bool, Error> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic) {
        Ok(()) => Ok(&magic == b"PK\x03\x04"),
        Err(_) => Ok(false),
    }
}
