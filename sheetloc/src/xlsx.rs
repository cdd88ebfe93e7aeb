//! `.xlsx` workbook adapter backed by calamine.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use crate::{
    error::Error,
    grid::{Cell, Grid},
};

/// The first worksheet of an `.xlsx` workbook, exposed as a [`Grid`].
pub struct XlsxGrid {
    range: Range<Data>,
}

impl XlsxGrid {
    /// Opens the workbook at `path` and materializes its first worksheet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            Error::config(format!("\"{}\" is not a readable workbook: {}", path.display(), e))
        })?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::config(format!("\"{}\" has no worksheets", path.display())))??;
        Ok(XlsxGrid { range })
    }
}

impl Grid for XlsxGrid {
    fn cell(&self, row: u32, col: u32) -> Cell {
        if row == 0 || col == 0 {
            return Cell::Empty;
        }
        match self.range.get_value((row - 1, col - 1)) {
            Some(Data::String(s)) => Cell::Text(s.clone()),
            Some(Data::Float(f)) => Cell::Number(*f),
            Some(Data::Int(i)) => Cell::Number(*i as f64),
            Some(Data::Bool(b)) => Cell::Number(if *b { 1.0 } else { 0.0 }),
            Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => Cell::Text(s.clone()),
            Some(Data::DateTime(dt)) => Cell::Number(dt.as_f64()),
            Some(Data::Error(_)) | Some(Data::Empty) | None => Cell::Empty,
        }
    }

    fn min_row(&self) -> u32 {
        self.range.start().map(|(r, _)| r + 1).unwrap_or(1)
    }

    fn max_row(&self) -> u32 {
        self.range.end().map(|(r, _)| r + 1).unwrap_or(0)
    }

    fn min_col(&self) -> u32 {
        self.range.start().map(|(_, c)| c + 1).unwrap_or(1)
    }

    fn max_col(&self) -> u32 {
        self.range.end().map(|(_, c)| c + 1).unwrap_or(0)
    }
}
