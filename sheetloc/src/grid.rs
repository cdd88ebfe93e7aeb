//! The tabular source of truth: cell values, the read-only grid interface,
//! window resolution, and the cheap column probe.
//!
//! Rows and columns are 1-indexed throughout, matching spreadsheet
//! conventions.

use crate::error::Error;

/// Content of one grid cell.
///
/// Worksheet cells are loosely typed; every policy decision spells out how it
/// treats each variant instead of coercing up front.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// True for empty cells and for text that is empty after trimming.
    /// Numbers are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// The cell's content as text. Integral numbers render without a decimal
    /// point, the way they display in a spreadsheet.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// Read-only access to a rectangular grid of cells.
///
/// The transcoders only ever look cells up by position and ask for the grid's
/// extent; parsing the underlying workbook format lives behind this trait.
pub trait Grid {
    /// Cell at the given 1-indexed position. Positions outside the grid's
    /// extent return [`Cell::Empty`].
    fn cell(&self, row: u32, col: u32) -> Cell;

    fn min_row(&self) -> u32;
    fn max_row(&self) -> u32;
    fn min_col(&self) -> u32;
    fn max_col(&self) -> u32;
}

/// An in-memory grid, row-major. Used by tests and available to embedders
/// that assemble grids from other sources.
#[derive(Debug, Clone, Default)]
pub struct VecGrid {
    rows: Vec<Vec<Cell>>,
}

impl VecGrid {
    pub fn new() -> Self {
        VecGrid { rows: Vec::new() }
    }

    /// Builds a grid from rows of string slices; empty strings become
    /// [`Cell::Empty`].
    pub fn from_rows<S: AsRef<str>>(rows: &[&[S]]) -> Self {
        VecGrid {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| Cell::from(s.as_ref())).collect())
                .collect(),
        }
    }

    /// Appends one row of cells.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Overwrites the cell at the given 1-indexed position, growing the grid
    /// as needed.
    pub fn set(&mut self, row: u32, col: u32, cell: Cell) {
        let (row, col) = (row as usize, col as usize);
        if self.rows.len() < row {
            self.rows.resize(row, Vec::new());
        }
        let r = &mut self.rows[row - 1];
        if r.len() < col {
            r.resize(col, Cell::Empty);
        }
        r[col - 1] = cell;
    }
}

impl Grid for VecGrid {
    fn cell(&self, row: u32, col: u32) -> Cell {
        if row == 0 || col == 0 {
            return Cell::Empty;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|r| r.get(col as usize - 1))
            .cloned()
            .unwrap_or(Cell::Empty)
    }

    fn min_row(&self) -> u32 {
        1
    }

    fn max_row(&self) -> u32 {
        self.rows.len() as u32
    }

    fn min_col(&self) -> u32 {
        1
    }

    fn max_col(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }
}

/// A resolved rectangular region of interest within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl Window {
    /// Validates the requested bounds against the grid's extent and defaults
    /// `end_row`/`end_col` of `0` to the grid's last row/column.
    ///
    /// Pure: no side effects, and resolving an already-resolved window
    /// returns it unchanged.
    pub fn resolve<G: Grid>(
        grid: &G,
        start_row: u32,
        end_row: u32,
        start_col: u32,
        end_col: u32,
    ) -> Result<Window, Error> {
        if start_row < grid.min_row() {
            return Err(Error::range(format!(
                "start row {} is less than min row {}",
                start_row,
                grid.min_row()
            )));
        }
        let end_row = if end_row == 0 {
            grid.max_row()
        } else if end_row > grid.max_row() {
            return Err(Error::range(format!(
                "end row {} is greater than max row {}",
                end_row,
                grid.max_row()
            )));
        } else {
            end_row
        };

        if start_col < grid.min_col() {
            return Err(Error::range(format!(
                "start column {} is less than min column {}",
                start_col,
                grid.min_col()
            )));
        }
        let end_col = if end_col == 0 {
            grid.max_col()
        } else if end_col > grid.max_col() {
            return Err(Error::range(format!(
                "end column {} is greater than max column {}",
                end_col,
                grid.max_col()
            )));
        } else {
            end_col
        };

        Ok(Window {
            start_row,
            end_row,
            start_col,
            end_col,
        })
    }
}

/// Reports whether a column contains any non-blank cell within the first
/// `probe_depth` rows. A fast skip filter, not a full scan of the window.
pub fn column_has_data<G: Grid>(grid: &G, col: u32, probe_depth: u32) -> bool {
    (1..=probe_depth).any(|row| !grid.cell(row, col).is_blank())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> VecGrid {
        VecGrid::from_rows(&[
            &["key", "en", "fr"],
            &["greeting", "Hello", "Bonjour"],
            &["farewell", "Goodbye", "Au revoir"],
        ])
    }

    #[test]
    fn test_cell_blankness() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text("   ".to_string()).is_blank());
        assert!(!Cell::Text("x".to_string()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn test_cell_text_rendering() {
        assert_eq!(Cell::Empty.text(), "");
        assert_eq!(Cell::Text("hi".to_string()).text(), "hi");
        assert_eq!(Cell::Number(1.0).text(), "1");
        assert_eq!(Cell::Number(2.5).text(), "2.5");
    }

    #[test]
    fn test_vec_grid_lookup() {
        let grid = sample_grid();
        assert_eq!(grid.cell(1, 1), Cell::Text("key".to_string()));
        assert_eq!(grid.cell(2, 3), Cell::Text("Bonjour".to_string()));
        assert_eq!(grid.cell(10, 10), Cell::Empty);
        assert_eq!(grid.max_row(), 3);
        assert_eq!(grid.max_col(), 3);
    }

    #[test]
    fn test_vec_grid_set_grows() {
        let mut grid = VecGrid::new();
        grid.set(3, 2, Cell::from("x"));
        assert_eq!(grid.cell(3, 2), Cell::Text("x".to_string()));
        assert_eq!(grid.cell(1, 1), Cell::Empty);
        assert_eq!(grid.max_row(), 3);
    }

    #[test]
    fn test_window_zero_defaults_to_extent() {
        let grid = sample_grid();
        let window = Window::resolve(&grid, 1, 0, 1, 0).unwrap();
        assert_eq!(window.end_row, 3);
        assert_eq!(window.end_col, 3);
    }

    #[test]
    fn test_window_resolution_is_idempotent() {
        let grid = sample_grid();
        let first = Window::resolve(&grid, 2, 3, 1, 2).unwrap();
        let second = Window::resolve(
            &grid,
            first.start_row,
            first.end_row,
            first.start_col,
            first.end_col,
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_window_rejects_out_of_range_bounds() {
        let grid = sample_grid();
        assert!(matches!(
            Window::resolve(&grid, 0, 0, 1, 0),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            Window::resolve(&grid, 1, 4, 1, 0),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            Window::resolve(&grid, 1, 0, 0, 0),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            Window::resolve(&grid, 1, 0, 1, 9),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn test_column_probe() {
        let grid = sample_grid();
        assert!(column_has_data(&grid, 2, 10));
        assert!(!column_has_data(&grid, 4, 10));
        // Probe budget is honored: data below the probed rows is not seen.
        let mut deep = VecGrid::new();
        deep.set(5, 1, Cell::from("late"));
        assert!(!column_has_data(&deep, 1, 3));
        assert!(column_has_data(&deep, 1, 5));
    }
}
