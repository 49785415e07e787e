//! Spot list resolution.

use matrix_core::{GridSize, Spot, parse_spots};

/// Cells named by `input` on `grid`, skipping `masters`.
pub fn select(grid: GridSize, masters: &[Spot], input: &str) -> Vec<Spot> {
    parse_spots(input, grid, masters).unwrap_or_default()
}
