//! Configuration constants for the interpolation matrix.

/// Largest number of cells along either side of the grid.
pub const GRID_MAX: usize = 15;

/// Columns of a new matrix.
pub const DEFAULT_COLUMNS: usize = 3;

/// Rows of a new matrix.
pub const DEFAULT_ROWS: usize = 1;

/// Default weight step: cell `i` on an axis weighs `(i + 1) * WEIGHT_STEP`.
pub const WEIGHT_STEP: f64 = 100.0;

/// A side of at most this many cells only shrinks when the other side has at
/// least this many.
pub const SHRINK_THRESHOLD: usize = 3;

/// Design-space axis driven by grid columns.
pub const HORIZONTAL_AXIS: &str = "horizontal";

/// Design-space axis driven by grid rows.
pub const VERTICAL_AXIS: &str = "vertical";

/// Folder, next to the source font, that generated instances are saved to.
pub const INSTANCE_FOLDER: &str = "matrix-instances";
