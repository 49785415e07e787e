//! Keeping non-master cell weights consistent with the masters.

use std::collections::BTreeMap;

use font_mutator::{Location, Model, ModelBuilder};

use crate::{
    config::{HORIZONTAL_AXIS, VERTICAL_AXIS},
    grid::{GridSize, Spot, Weights, default_weight},
};

/// Weights for every cell of `grid`.
///
/// Master cells keep their own weights. With fewer than two masters every
/// other cell gets the default weights; otherwise column weights come from a
/// one-dimensional model over the masters' columns and row weights from one
/// over their rows. The two axes never influence each other.
pub fn reallocate(masters: &[(Spot, Weights)], grid: GridSize) -> BTreeMap<Spot, Weights> {
    let (horizontal, vertical) = if masters.len() < 2 {
        (None, None)
    } else {
        (
            axis_model(
                HORIZONTAL_AXIS,
                masters.iter().map(|(spot, w)| (spot.column, w.horizontal)),
            ),
            axis_model(VERTICAL_AXIS, masters.iter().map(|(spot, w)| (spot.row, w.vertical))),
        )
    };

    let weight_at = |model: &Option<Model<f64>>, axis: &str, index: usize| match model {
        Some(model) => model.evaluate(&axis_location(axis, index)),
        None => default_weight(index),
    };

    grid.cells()
        .map(|spot| {
            let weights = masters
                .iter()
                .find(|(master, _)| *master == spot)
                .map(|(_, weights)| *weights)
                .unwrap_or_else(|| Weights {
                    horizontal: weight_at(&horizontal, HORIZONTAL_AXIS, spot.column),
                    vertical: weight_at(&vertical, VERTICAL_AXIS, spot.row),
                });
            (spot, weights)
        })
        .collect()
}

fn axis_location(axis: &str, index: usize) -> Location {
    Location::new().with(axis, index as f64)
}

fn axis_model(axis: &str, samples: impl Iterator<Item = (usize, f64)>) -> Option<Model<f64>> {
    let samples: Vec<(Location, f64)> =
        samples.map(|(index, weight)| (axis_location(axis, index), weight)).collect();
    match ModelBuilder::new().build(samples) {
        Ok(model) => Some(model),
        Err(e) => {
            log::warn!("Falling back to default {axis} weights: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: usize, rows: usize) -> GridSize {
        GridSize::new(columns, rows).unwrap()
    }

    #[test]
    fn midpoint_between_two_masters() {
        let masters = [
            (Spot::new(0, 0), Weights::new(100.0, 100.0)),
            (Spot::new(2, 0), Weights::new(300.0, 100.0)),
        ];
        let weights = reallocate(&masters, grid(3, 1));

        assert_eq!(weights.len(), 3);
        assert_eq!(weights[&Spot::new(1, 0)].horizontal, 200.0);
        assert_eq!(weights[&Spot::new(0, 0)], Weights::new(100.0, 100.0));
    }

    #[test]
    fn single_master_keeps_its_weights() {
        let masters = [(Spot::new(1, 0), Weights::new(420.0, 80.0))];
        let weights = reallocate(&masters, grid(3, 2));

        assert_eq!(weights[&Spot::new(1, 0)], Weights::new(420.0, 80.0));
        assert_eq!(weights[&Spot::new(0, 0)], Weights::new(100.0, 100.0));
        assert_eq!(weights[&Spot::new(2, 1)], Weights::new(300.0, 200.0));
    }

    #[test]
    fn no_masters_means_defaults() {
        let weights = reallocate(&[], grid(2, 2));
        assert_eq!(weights.len(), 4);
        assert!(weights.iter().all(|(spot, w)| *w == Weights::default_for(*spot)));
    }

    #[test]
    fn axes_are_independent_and_extrapolate() {
        let masters = [
            (Spot::new(0, 0), Weights::new(0.0, 10.0)),
            (Spot::new(1, 1), Weights::new(50.0, 30.0)),
        ];
        let weights = reallocate(&masters, grid(4, 3));

        assert_eq!(weights[&Spot::new(3, 0)].horizontal, 150.0);
        assert_eq!(weights[&Spot::new(3, 2)].vertical, 50.0);
        assert_eq!(weights[&Spot::new(1, 0)], Weights::new(50.0, 10.0));
    }

    #[test]
    fn same_column_masters_keep_the_first() {
        let masters = [
            (Spot::new(0, 0), Weights::new(100.0, 100.0)),
            (Spot::new(0, 2), Weights::new(140.0, 300.0)),
        ];
        let weights = reallocate(&masters, grid(2, 3));

        // One column sample left: the horizontal model is constant.
        assert_eq!(weights[&Spot::new(1, 1)].horizontal, 100.0);
        assert_eq!(weights[&Spot::new(1, 1)].vertical, 200.0);
    }

    #[test]
    fn reallocation_is_idempotent() {
        let masters = [
            (Spot::new(0, 0), Weights::new(100.0, 100.0)),
            (Spot::new(4, 2), Weights::new(900.0, 250.0)),
        ];
        assert_eq!(reallocate(&masters, grid(5, 3)), reallocate(&masters, grid(5, 3)));
    }
}
