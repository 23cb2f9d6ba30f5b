//! Virtual plate dimensions and well addressing

use crate::io::configuration::{DEFAULT_COLUMNS, DEFAULT_FIELDS, DEFAULT_ROWS};
use crate::io::error::{Result, invalid_parameter};

/// Rows, columns and fields of the virtual plate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlateGeometry {
    rows: usize,
    columns: usize,
    fields: usize,
}

impl Default for PlateGeometry {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            fields: DEFAULT_FIELDS,
        }
    }
}

impl PlateGeometry {
    /// Create a plate geometry
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero
    pub fn new(rows: usize, columns: usize, fields: usize) -> Result<Self> {
        for (parameter, value) in [("rows", rows), ("columns", columns), ("fields", fields)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
            }
        }
        Ok(Self {
            rows,
            columns,
            fields,
        })
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of fields per well
    pub const fn fields(&self) -> usize {
        self.fields
    }

    /// Total number of wells
    pub const fn well_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Position of the well at row-major `index`
    pub const fn position(&self, index: usize) -> Option<WellPosition> {
        if index >= self.well_count() {
            return None;
        }
        Some(WellPosition {
            index,
            row: index / self.columns,
            column: index % self.columns,
        })
    }

    /// Every well in row-major order
    pub fn positions(self) -> impl Iterator<Item = WellPosition> {
        (0..self.well_count()).filter_map(move |index| self.position(index))
    }
}

/// Location of one well on the plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WellPosition {
    /// Row-major index
    pub index: usize,
    /// Zero-based row
    pub row: usize,
    /// Zero-based column
    pub column: usize,
}

impl WellPosition {
    /// Conventional label such as `A01` or `H12`
    pub fn label(&self) -> String {
        format!("{}{:02}", row_letters(self.row), self.column + 1)
    }
}

// A..Z, then AA, AB, ... for plates taller than 26 rows
fn row_letters(row: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = row + 1;
    while remaining > 0 {
        let offset = (remaining - 1) % 26;
        letters.push(char::from(b'A' + offset as u8));
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}
