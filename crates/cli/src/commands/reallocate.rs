//! Weight reallocation over a grid of masters.

use std::{collections::BTreeMap, fmt::Write};

use anyhow::{Result, bail};
use matrix_core::{GridSize, Spot, Weights, grid::column_letter, reallocate};

use crate::args::MasterArg;

/// Weights for every cell of `grid` given the master cells.
pub fn reallocate_grid(grid: GridSize, masters: &[MasterArg]) -> Result<BTreeMap<Spot, Weights>> {
    let mut placed: Vec<(Spot, Weights)> = Vec::with_capacity(masters.len());
    for master in masters {
        if !grid.contains(master.spot) {
            bail!("master {} is outside the {grid} grid", master.spot);
        }
        if placed.iter().any(|(spot, _)| *spot == master.spot) {
            bail!("master {} given twice", master.spot);
        }
        placed.push((master.spot, master.weights));
    }
    log::debug!("Reallocating {grid} grid with {} masters", placed.len());
    Ok(reallocate(&placed, grid))
}

/// Render the weights as a table, one line per row. Master cells are
/// marked with `*`.
pub fn render_weights(
    grid: GridSize,
    weights: &BTreeMap<Spot, Weights>,
    masters: &[MasterArg],
) -> String {
    let mut out = String::from("  ");
    for column in 0..grid.columns() {
        let _ = write!(out, " {:>12}", column_letter(column));
    }
    out.push('\n');

    for row in 0..grid.rows() {
        let _ = write!(out, "{:>2}", row + 1);
        for column in 0..grid.columns() {
            let spot = Spot::new(column, row);
            let mark = if masters.iter().any(|m| m.spot == spot) { "*" } else { " " };
            let cell = weights.get(&spot).map(ToString::to_string).unwrap_or_default();
            let _ = write!(out, " {cell:>11}{mark}");
        }
        out.push('\n');
    }
    out
}
