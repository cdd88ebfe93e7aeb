//! Output packaging: loose filesystem writes or one aggregate zip archive.
//!
//! Transcoders always materialize an artifact as a loose file first, then
//! hand its relative path to the sink. The filesystem sink leaves it in
//! place; the archive sink appends it as a member and deletes the loose
//! copy, so at most one of the two persists for a finished column.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use tracing::{info, warn};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    config::SinkMode,
    error::Error,
};

/// Destination for finished artifacts, selected once per run.
pub trait OutputSink {
    /// Records the finished artifact at `rel` (relative to the output root).
    fn submit(&mut self, rel: &Path) -> Result<(), Error>;

    /// Flushes and closes the sink. Must be called exactly once, after the
    /// last column, including on the abort path.
    fn finish(&mut self) -> Result<(), Error>;
}

/// Opens the sink for `mode`; archive mode creates `archive_name` under
/// `out_dir`.
pub fn open(
    mode: SinkMode,
    out_dir: &Path,
    archive_name: &str,
) -> Result<Box<dyn OutputSink>, Error> {
    match mode {
        SinkMode::Filesystem => Ok(Box::new(FilesystemSink)),
        SinkMode::Archive => Ok(Box::new(ArchiveSink::create(out_dir, archive_name)?)),
    }
}

/// Leaves artifacts where the transcoder wrote them.
pub struct FilesystemSink;

impl OutputSink for FilesystemSink {
    fn submit(&mut self, _rel: &Path) -> Result<(), Error> {
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Appends artifacts to one zip archive and removes the loose copies.
pub struct ArchiveSink {
    root: PathBuf,
    archive_path: PathBuf,
    writer: Option<ZipWriter<File>>,
}

impl ArchiveSink {
    pub fn create(out_dir: &Path, archive_name: &str) -> Result<Self, Error> {
        let archive_path = out_dir.join(archive_name);
        let file = File::create(&archive_path)?;
        Ok(ArchiveSink {
            root: out_dir.to_path_buf(),
            archive_path,
            writer: Some(ZipWriter::new(file)),
        })
    }

    /// Path of the archive being written.
    pub fn path(&self) -> &Path {
        &self.archive_path
    }
}

impl OutputSink for ArchiveSink {
    fn submit(&mut self, rel: &Path) -> Result<(), Error> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| Error::config("archive sink already closed"))?;

        // Member names use forward slashes regardless of platform.
        let member = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        writer.start_file(member.as_str(), options)?;

        let full = self.root.join(rel);
        let mut source = File::open(&full)?;
        io::copy(&mut source, writer)?;
        drop(source);

        // The loose copy must not outlive the archive entry. Deletion
        // failure is logged, not fatal.
        if let Err(e) = std::fs::remove_file(&full) {
            warn!(
                "error deleting \"{}\" after adding it to \"{}\": {}",
                full.display(),
                self.archive_path.display(),
                e
            );
        }
        if let Some(parent) = rel.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::remove_dir_all(self.root.join(parent)) {
                warn!(
                    "error deleting directory \"{}\" after archiving: {}",
                    parent.display(),
                    e
                );
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        if let Some(writer) = self.writer.take() {
            writer.finish()?;
            info!("wrote archive \"{}\"", self.archive_path.display());
        }
        Ok(())
    }
}
