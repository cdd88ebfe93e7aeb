//! Whole-run driver for the forward path: resolves the window once, then
//! walks language columns in ascending order, gating each with the column
//! probe and routing finished artifacts into the output sink.

use std::path::PathBuf;

use tracing::{error, info};

use crate::{
    config::{JSON_ARCHIVE_NAME, TranslateOptions, XML_ARCHIVE_NAME, XML_RESOURCE_FILE_NAME},
    error::Error,
    grid::{self, Grid, Window},
    locale::LocaleTable,
    sink::{self, OutputSink},
    transcode::{android_xml, ios_json},
};

/// One transcoding run over a read-only grid.
pub struct Translator<G: Grid> {
    grid: G,
    options: TranslateOptions,
    window: Window,
}

impl<G: Grid> Translator<G> {
    /// Validates the configured window against the grid. Bad bounds abort
    /// the run here, before any column work.
    pub fn new(grid: G, options: TranslateOptions) -> Result<Self, Error> {
        let window = Window::resolve(
            &grid,
            options.start_row,
            options.end_row,
            options.start_col,
            options.end_col,
        )?;
        info!(
            "processing rows {}..{}, columns {}..{}",
            window.start_row, window.end_row, window.start_col, window.end_col
        );
        Ok(Translator {
            grid,
            options,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Writes one Android resource document per language column, as
    /// `<language>/strings.xml` loose files or members of one zip archive.
    pub fn to_xml(&self) -> Result<(), Error> {
        let mut sink = sink::open(self.options.sink, &self.options.out_dir, XML_ARCHIVE_NAME)?;
        let result = self.run_columns(sink.as_mut(), |column| self.xml_column(column));
        let finished = sink.finish();
        result.and(finished)
    }

    /// Writes one JSON locale record per language column, as
    /// `<code>.json` loose files or members of one zip archive.
    pub fn to_json(&self, locales: &LocaleTable) -> Result<(), Error> {
        let mut sink = sink::open(self.options.sink, &self.options.out_dir, JSON_ARCHIVE_NAME)?;
        let result = self.run_columns(sink.as_mut(), |column| self.json_column(column, locales));
        let finished = sink.finish();
        result.and(finished)
    }

    /// The column loop shared by both formats. Columns with no data in the
    /// probe window are skipped with a note; per-column errors, sink
    /// submission included, are logged and skipped unless `stop_on_err` is
    /// set.
    fn run_columns<F>(&self, sink: &mut dyn OutputSink, mut transcode: F) -> Result<(), Error>
    where
        F: FnMut(u32) -> Result<PathBuf, Error>,
    {
        for column in self.window.start_col..=self.window.end_col {
            if !grid::column_has_data(&self.grid, column, self.options.probe_depth) {
                info!(
                    "skipping column {} which has no data in the first {} rows",
                    column, self.options.probe_depth
                );
                continue;
            }

            match transcode(column).and_then(|rel| sink.submit(&rel)) {
                Ok(()) => {}
                Err(e) => {
                    error!("error processing column {}: {}", column, e);
                    if self.options.stop_on_err {
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }

    fn xml_column(&self, column: u32) -> Result<PathBuf, Error> {
        let record = android_xml::transcode(&self.grid, column, &self.options, &self.window)?;
        let rel = PathBuf::from(record.language.to_lowercase()).join(XML_RESOURCE_FILE_NAME);
        record.write_to(self.options.out_dir.join(&rel))?;
        info!(
            "wrote {} strings in column {} to \"{}\" for language \"{}\"",
            record.entries.len(),
            column,
            rel.display(),
            record.language
        );
        Ok(rel)
    }

    fn json_column(&self, column: u32, locales: &LocaleTable) -> Result<PathBuf, Error> {
        let record = ios_json::transcode(&self.grid, column, &self.options, &self.window, locales)?;
        let rel = PathBuf::from(format!("{}.json", record.language.to_lowercase()));
        record.write_to(self.options.out_dir.join(&rel))?;
        info!(
            "wrote {} strings in column {} to \"{}\" for language \"{}\"",
            record.entries.len(),
            column,
            rel.display(),
            record.language
        );
        Ok(rel)
    }
}
