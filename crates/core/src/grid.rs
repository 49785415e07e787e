//! Grid coordinates, grid size and per-cell weights.
//!
//! Cells are addressed by [`Spot`] everywhere. The letter-and-number forms
//! (`A1` for people, `a0` for storage) exist only at the boundary.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use font_mutator::Location;

use crate::{
    config::{DEFAULT_COLUMNS, DEFAULT_ROWS, GRID_MAX, HORIZONTAL_AXIS, VERTICAL_AXIS, WEIGHT_STEP},
    error::{MatrixError, Result},
};

/// A grid cell, as zero-based column and row.
///
/// Spots order column-major, the way the grid is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Spot {
    pub column: usize,
    pub row: usize,
}

impl Spot {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Storage key: lower-case column letter and zero-based row (`a0`).
    pub fn key(&self) -> String {
        format!("{}{}", column_letter(self.column).to_ascii_lowercase(), self.row)
    }

    /// Parse a storage key produced by [`Spot::key`].
    pub fn from_key(key: &str) -> Result<Self> {
        let (column, digits) =
            split_letter(key).ok_or_else(|| MatrixError::InvalidSpot(key.into()))?;
        let row = digits.parse().map_err(|_| MatrixError::InvalidSpot(key.into()))?;
        Ok(Self::new(column, row))
    }

    /// Parse the readable form (`A1`, `c12`), case-insensitive, one-based row.
    pub fn parse_readable(text: &str) -> Result<Self> {
        let invalid = || MatrixError::InvalidSpot(text.into());
        let (column, digits) = split_letter(text.trim()).ok_or_else(invalid)?;
        let row: usize = digits.parse().map_err(|_| invalid())?;
        let row = row.checked_sub(1).ok_or_else(invalid)?;
        Ok(Self::new(column, row))
    }
}

/// Column index to its upper-case letter.
pub fn column_letter(column: usize) -> char {
    u8::try_from(column)
        .ok()
        .filter(|c| *c < 26)
        .map_or('?', |c| char::from(b'A' + c))
}

/// Column letter (either case) to its index.
pub fn column_index(letter: char) -> Option<usize> {
    letter
        .is_ascii_alphabetic()
        .then(|| usize::from(letter.to_ascii_lowercase() as u8 - b'a'))
}

fn split_letter(text: &str) -> Option<(usize, &str)> {
    let mut chars = text.chars();
    let column = column_index(chars.next()?)?;
    let digits = chars.as_str();
    (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())).then_some((column, digits))
}

impl Display for Spot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.column), self.row + 1)
    }
}

impl FromStr for Spot {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_readable(s)
    }
}

/// Grid dimensions, each side between 1 and [`GRID_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    columns: usize,
    rows: usize,
}

impl GridSize {
    pub fn new(columns: usize, rows: usize) -> Result<Self> {
        let valid = 1..=GRID_MAX;
        if valid.contains(&columns) && valid.contains(&rows) {
            Ok(Self { columns, rows })
        } else {
            Err(MatrixError::InvalidGridSize { columns, rows })
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    pub fn contains(&self, spot: Spot) -> bool {
        spot.column < self.columns && spot.row < self.rows
    }

    /// Every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Spot> + use<> {
        let rows = self.rows;
        (0..self.columns).flat_map(move |column| (0..rows).map(move |row| Spot::new(column, row)))
    }

    pub(crate) fn with_columns(self, columns: usize) -> Self {
        Self { columns, ..self }
    }

    pub(crate) fn with_rows(self, rows: usize) -> Self {
        Self { rows, ..self }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self { columns: DEFAULT_COLUMNS, rows: DEFAULT_ROWS }
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

impl FromStr for GridSize {
    type Err = MatrixError;

    /// Parse `COLUMNSxROWS`, e.g. `5x3`.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || MatrixError::MalformedGridSize(s.into());
        let (columns, rows) = s.trim().split_once(['x', 'X']).ok_or_else(malformed)?;
        let columns = columns.trim().parse().map_err(|_| malformed())?;
        let rows = rows.trim().parse().map_err(|_| malformed())?;
        Self::new(columns, rows)
    }
}

/// Design-space coordinates of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Weights {
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self { horizontal, vertical }
    }

    /// `(index + 1) * 100` on each axis.
    pub fn default_for(spot: Spot) -> Self {
        Self::new(default_weight(spot.column), default_weight(spot.row))
    }

    pub fn location(&self) -> Location {
        Location::new()
            .with(HORIZONTAL_AXIS, self.horizontal)
            .with(VERTICAL_AXIS, self.vertical)
    }
}

pub(crate) fn default_weight(index: usize) -> f64 {
    (index + 1) as f64 * WEIGHT_STEP
}

impl Display for Weights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.horizontal, self.vertical)
    }
}

impl FromStr for Weights {
    type Err = MatrixError;

    /// Parse `HORIZONTAL/VERTICAL`, e.g. `100/250`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MatrixError::InvalidWeights(s.into());
        let (horizontal, vertical) = s.trim().split_once('/').ok_or_else(invalid)?;
        Ok(Self::new(
            horizontal.trim().parse().map_err(|_| invalid())?,
            vertical.trim().parse().map_err(|_| invalid())?,
        ))
    }
}
