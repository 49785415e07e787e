//! Parsing user lists of cells such as `A1, C`, `2` or `*`.

use crate::grid::{GridSize, Spot, column_index};

/// Cells named by `input`, in input order and without duplicates.
///
/// Items are comma-separated: `*` is every cell, `B2` one cell, `B` a whole
/// column and `2` a whole row (rows are one-based). Letters are
/// case-insensitive. Items that do not parse or fall outside the grid are
/// ignored, and master cells are never selected. Returns `None` for empty
/// input.
pub fn parse_spots(input: &str, grid: GridSize, masters: &[Spot]) -> Option<Vec<Spot>> {
    if input.trim().is_empty() {
        return None;
    }

    let mut spots: Vec<Spot> = Vec::new();
    for item in input.split(',') {
        for spot in parse_item(item.trim(), grid) {
            if !masters.contains(&spot) && !spots.contains(&spot) {
                spots.push(spot);
            }
        }
    }
    Some(spots)
}

fn parse_item(item: &str, grid: GridSize) -> Vec<Spot> {
    if item == "*" {
        return grid.cells().collect();
    }

    let mut chars = item.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };
    let rest = chars.as_str();

    match (column_index(first), rest.is_empty()) {
        // Whole column.
        (Some(column), true) if column < grid.columns() => {
            (0..grid.rows()).map(|row| Spot::new(column, row)).collect()
        }
        // Single cell.
        (Some(_), false) => match Spot::parse_readable(item) {
            Ok(spot) if grid.contains(spot) => vec![spot],
            _ => Vec::new(),
        },
        // Whole row.
        (None, _) => match item.parse::<usize>() {
            Ok(row) if (1..=grid.rows()).contains(&row) => {
                (0..grid.columns()).map(|column| Spot::new(column, row - 1)).collect()
            }
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSize {
        GridSize::new(3, 2).unwrap()
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert_eq!(parse_spots("", grid(), &[]), None);
        assert_eq!(parse_spots("  ", grid(), &[]), None);
    }

    #[test]
    fn star_selects_every_non_master_cell() {
        let spots = parse_spots("*", grid(), &[Spot::new(0, 0)]).unwrap();
        assert_eq!(spots.len(), 5);
        assert!(!spots.contains(&Spot::new(0, 0)));
    }

    #[test]
    fn cells_columns_and_rows() {
        assert_eq!(parse_spots("b2", grid(), &[]), Some(vec![Spot::new(1, 1)]));
        assert_eq!(
            parse_spots("C", grid(), &[]),
            Some(vec![Spot::new(2, 0), Spot::new(2, 1)])
        );
        assert_eq!(
            parse_spots("2", grid(), &[Spot::new(1, 1)]),
            Some(vec![Spot::new(0, 1), Spot::new(2, 1)])
        );
    }

    #[test]
    fn mixed_list_is_deduplicated_and_filtered() {
        let spots = parse_spots("A1, a, D1, 7, ??, B1", grid(), &[]).unwrap();
        assert_eq!(spots, vec![Spot::new(0, 0), Spot::new(0, 1), Spot::new(1, 0)]);
    }
}
