//! The matrix session: grid, per-cell weights, masters and current glyph.

use std::collections::BTreeMap;

use font_math::{MasterFont, Outline};
use font_mutator::{Location, ModelBuilder};

use crate::{
    config::{GRID_MAX, SHRINK_THRESHOLD},
    error::{InstanceError, MatrixError, Result},
    grid::{GridSize, Spot, Weights},
    instance::{
        GeneratedInstance, GenerationOptions, InstanceRequest, PlacedMaster, generate_instances,
    },
    provider::FontProvider,
    reallocate::reallocate,
    report::{CompatibilityReport, compatibility_report},
    selection::parse_spots,
};

/// What a cell shows for the current glyph.
#[derive(Debug, Clone, PartialEq)]
pub enum CellPreview {
    /// A master cell showing the master's own glyph.
    Master { source: String, outline: Outline },
    /// An interpolated or extrapolated glyph.
    Instance(Outline),
    /// The masters cannot be interpolated; shows [`Outline::error_placeholder`].
    Error(Outline),
    Empty,
}

/// An interpolation matrix session.
///
/// Masters sit on grid cells and reference their font by an opaque source
/// identifier resolved through a [`FontProvider`]. Every cell has weights;
/// master weights are the user's, the others are kept in step with the
/// masters by [`reallocate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    grid: GridSize,
    weights: BTreeMap<Spot, Weights>,
    masters: BTreeMap<Spot, String>,
    glyph: Option<String>,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

impl Matrix {
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            weights: grid.cells().map(|spot| (spot, Weights::default_for(spot))).collect(),
            masters: BTreeMap::new(),
            glyph: None,
        }
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn weights(&self, spot: Spot) -> Option<Weights> {
        self.weights.get(&spot).copied()
    }

    /// Weights of every cell, column by column.
    pub fn all_weights(&self) -> &BTreeMap<Spot, Weights> {
        &self.weights
    }

    pub fn is_master(&self, spot: Spot) -> bool {
        self.masters.contains_key(&spot)
    }

    /// Master spots and sources, column by column.
    pub fn masters(&self) -> impl Iterator<Item = (Spot, &str)> {
        self.masters.iter().map(|(spot, source)| (*spot, source.as_str()))
    }

    pub fn master_count(&self) -> usize {
        self.masters.len()
    }

    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }

    pub fn set_glyph(&mut self, glyph: Option<String>) {
        self.glyph = glyph;
    }

    fn check(&self, spot: Spot) -> Result<()> {
        if self.grid.contains(spot) {
            Ok(())
        } else {
            Err(MatrixError::SpotOutOfGrid { spot, grid: self.grid })
        }
    }

    /// Put a master at `spot`, replacing any master already there.
    pub fn place_master(&mut self, spot: Spot, source: impl Into<String>) -> Result<()> {
        self.check(spot)?;
        let source = source.into();
        log::debug!("Placing {source} at {spot}");
        self.masters.insert(spot, source);
        self.reallocate();
        Ok(())
    }

    /// Remove the master at `spot`. Removing the last master clears the
    /// matrix. Returns the removed source.
    pub fn clear_spot(&mut self, spot: Spot) -> Option<String> {
        let removed = self.masters.remove(&spot)?;
        if self.masters.is_empty() {
            self.clear();
        } else {
            self.reallocate();
        }
        Some(removed)
    }

    /// Set the weights of a cell. Changing a master's weights moves the other
    /// cells with it; other cells just take the new weights.
    pub fn set_weights(&mut self, spot: Spot, weights: Weights) -> Result<()> {
        self.check(spot)?;
        self.weights.insert(spot, weights);
        if self.is_master(spot) {
            self.reallocate();
        }
        Ok(())
    }

    /// Recompute every non-master cell's weights from the masters.
    pub fn reallocate(&mut self) {
        let masters: Vec<(Spot, Weights)> = self
            .masters
            .keys()
            .map(|spot| (*spot, self.weights(*spot).unwrap_or_else(|| Weights::default_for(*spot))))
            .collect();
        self.weights = reallocate(&masters, self.grid);
    }

    /// Add a column, up to [`GRID_MAX`]. Returns whether the grid grew.
    pub fn add_column(&mut self) -> bool {
        let columns = self.grid.columns();
        if columns >= GRID_MAX {
            return false;
        }
        self.resize(self.grid.with_columns(columns + 1));
        true
    }

    /// Remove the last column. Returns whether the grid shrank.
    pub fn remove_column(&mut self) -> bool {
        let (columns, rows) = (self.grid.columns(), self.grid.rows());
        if !can_shrink(columns, rows) {
            return false;
        }
        self.resize(self.grid.with_columns(columns - 1));
        true
    }

    /// Add a row, up to [`GRID_MAX`]. Returns whether the grid grew.
    pub fn add_row(&mut self) -> bool {
        let rows = self.grid.rows();
        if rows >= GRID_MAX {
            return false;
        }
        self.resize(self.grid.with_rows(rows + 1));
        true
    }

    /// Remove the last row. Returns whether the grid shrank.
    pub fn remove_row(&mut self) -> bool {
        let (columns, rows) = (self.grid.columns(), self.grid.rows());
        if !can_shrink(rows, columns) {
            return false;
        }
        self.resize(self.grid.with_rows(rows - 1));
        true
    }

    /// Masters outside the new grid are dropped and new cells get default
    /// weights before reallocating.
    fn resize(&mut self, grid: GridSize) {
        let dropped: Vec<Spot> =
            self.masters.keys().copied().filter(|s| !grid.contains(*s)).collect();
        for spot in dropped {
            if let Some(source) = self.masters.remove(&spot) {
                log::warn!("Dropping master {source} at {spot}: outside the {grid} grid");
            }
        }

        let weights: BTreeMap<Spot, Weights> = grid
            .cells()
            .map(|spot| (spot, self.weights(spot).unwrap_or_else(|| Weights::default_for(spot))))
            .collect();
        self.grid = grid;
        self.weights = weights;
        self.reallocate();
    }

    /// Remove every master and restore default weights.
    pub fn clear(&mut self) {
        self.masters.clear();
        self.weights = self.grid.cells().map(|spot| (spot, Weights::default_for(spot))).collect();
    }

    /// Design-space location and source of every master.
    pub fn master_locations(&self) -> Vec<(Location, &str)> {
        self.masters
            .iter()
            .map(|(spot, source)| {
                let weights = self.weights(*spot).unwrap_or_else(|| Weights::default_for(*spot));
                (weights.location(), source.as_str())
            })
            .collect()
    }

    /// Drop masters whose font the provider no longer has. Returns the
    /// dropped sources.
    pub fn prune_unavailable(&mut self, provider: &impl FontProvider) -> Vec<String> {
        let gone: Vec<Spot> = self
            .masters
            .iter()
            .filter(|(_, source)| !provider.is_available(source))
            .map(|(spot, _)| *spot)
            .collect();
        if gone.is_empty() {
            return Vec::new();
        }

        let removed: Vec<String> =
            gone.iter().filter_map(|spot| self.masters.remove(spot)).collect();
        for source in &removed {
            log::warn!("Master {source} is no longer available");
        }
        if self.masters.is_empty() {
            self.clear();
        } else {
            self.reallocate();
        }
        removed
    }

    /// Masters the provider can resolve, at their locations.
    pub fn placed_masters<'a>(&self, provider: &'a impl FontProvider) -> Vec<PlacedMaster<'a>> {
        self.master_locations()
            .into_iter()
            .filter_map(|(location, source)| match provider.font(source) {
                Some(font) => Some((location, font)),
                None => {
                    log::warn!("Skipping unavailable master {source}");
                    None
                }
            })
            .collect()
    }

    /// What every cell shows for `glyph`.
    pub fn preview(
        &self,
        provider: &impl FontProvider,
        glyph: &str,
    ) -> BTreeMap<Spot, CellPreview> {
        let mut previews: BTreeMap<Spot, CellPreview> =
            self.grid.cells().map(|spot| (spot, CellPreview::Empty)).collect();

        let mut samples: Vec<(Location, Outline)> = Vec::new();
        for (spot, source) in &self.masters {
            let Some(master) = provider.font(source).and_then(|font| font.glyph(glyph)) else {
                continue;
            };
            let weights = self.weights(*spot).unwrap_or_else(|| Weights::default_for(*spot));
            samples.push((weights.location(), master.outline.clone()));
            previews.insert(
                *spot,
                CellPreview::Master { source: source.clone(), outline: master.outline.clone() },
            );
        }
        if samples.is_empty() {
            return previews;
        }

        let model = ModelBuilder::new().build(samples);
        if let Err(e) = &model {
            log::debug!("Cannot preview {glyph}: {e}");
        }
        for (spot, preview) in previews.iter_mut() {
            if self.is_master(*spot) {
                continue;
            }
            let location =
                self.weights(*spot).unwrap_or_else(|| Weights::default_for(*spot)).location();
            *preview = match &model {
                Ok(model) => CellPreview::Instance(model.evaluate(&location)),
                Err(_) => CellPreview::Error(Outline::error_placeholder()),
            };
        }
        previews
    }

    /// Cells named by a user list such as `A1, C, 2` or `*`; master cells
    /// are left out. `None` for empty input.
    pub fn select(&self, input: &str) -> Option<Vec<Spot>> {
        let masters: Vec<Spot> = self.masters.keys().copied().collect();
        parse_spots(input, self.grid, &masters)
    }

    /// Generate an instance font for each of `spots`, named after the spot.
    pub fn generate(
        &self,
        spots: &[Spot],
        provider: &impl FontProvider,
        options: &GenerationOptions,
    ) -> Vec<(Spot, std::result::Result<GeneratedInstance, InstanceError>)> {
        let masters = self.placed_masters(provider);
        let spots: Vec<Spot> =
            spots.iter().copied().filter(|spot| self.grid.contains(*spot)).collect();
        let requests: Vec<InstanceRequest> = spots
            .iter()
            .map(|spot| {
                let weights = self.weights(*spot).unwrap_or_else(|| Weights::default_for(*spot));
                InstanceRequest::new(spot.to_string(), weights.location())
            })
            .collect();
        spots.into_iter().zip(generate_instances(&requests, &masters, options)).collect()
    }

    /// Compatibility of the masters' glyph sets.
    pub fn compatibility_report(&self, provider: &impl FontProvider) -> CompatibilityReport {
        let fonts: Vec<&MasterFont> =
            self.placed_masters(provider).into_iter().map(|(_, font)| font).collect();
        compatibility_report(&fonts)
    }
}

/// Whether a grid side of `size` cells may lose one, given the other side.
fn can_shrink(size: usize, other: usize) -> bool {
    size > SHRINK_THRESHOLD || (size > 1 && other >= SHRINK_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use font_math::{Contour, Glyph};

    use super::*;

    fn square(size: f64) -> Outline {
        Outline::new(size * 2.0).with_contour(Contour::polygon(&[
            (0.0, 0.0),
            (0.0, size),
            (size, size),
            (size, 0.0),
        ]))
    }

    fn fonts() -> HashMap<String, MasterFont> {
        let light = MasterFont::new("Demo", "Light")
            .with_glyph("a", Glyph::new(square(100.0)))
            .with_glyph("b", Glyph::new(square(100.0)));
        let bold = MasterFont::new("Demo", "Bold")
            .with_glyph("a", Glyph::new(square(300.0)))
            .with_glyph(
                "b",
                Glyph::new(square(300.0).with_contour(Contour::polygon(&[(0.0, 0.0)]))),
            );
        HashMap::from([("light.ufo".to_string(), light), ("bold.ufo".to_string(), bold)])
    }

    #[test]
    fn new_matrix_has_default_weights() {
        let matrix = Matrix::default();
        assert_eq!(matrix.grid().to_string(), "3x1");
        assert_eq!(matrix.all_weights().len(), 3);
        assert_eq!(matrix.weights(Spot::new(2, 0)), Some(Weights::new(300.0, 100.0)));
    }

    #[test]
    fn masters_drive_the_other_cells() {
        let mut matrix = Matrix::default();
        matrix.place_master(Spot::new(0, 0), "light.ufo").unwrap();
        matrix.place_master(Spot::new(2, 0), "bold.ufo").unwrap();
        matrix.set_weights(Spot::new(2, 0), Weights::new(500.0, 100.0)).unwrap();

        assert_eq!(matrix.weights(Spot::new(1, 0)), Some(Weights::new(300.0, 100.0)));

        // A non-master cell only stores its new weights.
        matrix.set_weights(Spot::new(1, 0), Weights::new(250.0, 100.0)).unwrap();
        assert_eq!(matrix.weights(Spot::new(1, 0)), Some(Weights::new(250.0, 100.0)));
        assert_eq!(matrix.weights(Spot::new(2, 0)), Some(Weights::new(500.0, 100.0)));
    }

    #[test]
    fn spots_outside_the_grid_are_rejected() {
        let mut matrix = Matrix::default();
        assert!(matches!(
            matrix.place_master(Spot::new(3, 0), "light.ufo"),
            Err(MatrixError::SpotOutOfGrid { .. })
        ));
        assert!(matrix.set_weights(Spot::new(0, 1), Weights::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn clearing_the_last_master_clears_the_matrix() {
        let mut matrix = Matrix::default();
        matrix.place_master(Spot::new(1, 0), "light.ufo").unwrap();
        matrix.set_weights(Spot::new(1, 0), Weights::new(999.0, 100.0)).unwrap();

        assert_eq!(matrix.clear_spot(Spot::new(0, 0)), None);
        assert_eq!(matrix.clear_spot(Spot::new(1, 0)), Some("light.ufo".to_string()));
        assert_eq!(matrix.master_count(), 0);
        assert_eq!(matrix.weights(Spot::new(1, 0)), Some(Weights::new(200.0, 100.0)));
    }

    #[test]
    fn shrink_rules() {
        // 3x1: neither side may shrink.
        let mut matrix = Matrix::default();
        assert!(!matrix.remove_column());
        assert!(!matrix.remove_row());

        // 3x3: both may.
        assert!(matrix.add_row());
        assert!(matrix.add_row());
        assert!(matrix.remove_column());
        assert_eq!(matrix.grid().to_string(), "2x3");
        assert!(!matrix.remove_row());

        // Never below one cell.
        let mut tall = Matrix::new(GridSize::new(1, 5).unwrap());
        assert!(!tall.remove_column());
        assert!(tall.remove_row());
    }

    #[test]
    fn grid_growth_stops_at_the_limit() {
        let mut matrix = Matrix::new(GridSize::new(GRID_MAX, 1).unwrap());
        assert!(!matrix.add_column());
        assert_eq!(matrix.grid().columns(), GRID_MAX);
    }

    #[test]
    fn shrinking_drops_masters_outside() {
        let mut matrix = Matrix::new(GridSize::new(4, 1).unwrap());
        matrix.place_master(Spot::new(0, 0), "light.ufo").unwrap();
        matrix.place_master(Spot::new(3, 0), "bold.ufo").unwrap();

        assert!(matrix.remove_column());
        assert_eq!(matrix.masters().collect::<Vec<_>>(), vec![(Spot::new(0, 0), "light.ufo")]);
        assert_eq!(matrix.weights(Spot::new(2, 0)), Some(Weights::new(300.0, 100.0)));
    }

    #[test]
    fn prune_unavailable_masters() {
        let mut matrix = Matrix::default();
        matrix.place_master(Spot::new(0, 0), "light.ufo").unwrap();
        matrix.place_master(Spot::new(2, 0), "gone.ufo").unwrap();

        assert_eq!(matrix.prune_unavailable(&fonts()), vec!["gone.ufo"]);
        assert_eq!(matrix.master_count(), 1);
    }

    #[test]
    fn preview_interpolates_or_shows_the_placeholder() {
        let mut matrix = Matrix::default();
        matrix.place_master(Spot::new(0, 0), "light.ufo").unwrap();
        matrix.place_master(Spot::new(2, 0), "bold.ufo").unwrap();
        let fonts = fonts();

        let previews = matrix.preview(&fonts, "a");
        assert!(matches!(
            &previews[&Spot::new(0, 0)],
            CellPreview::Master { source, .. } if source == "light.ufo"
        ));
        match &previews[&Spot::new(1, 0)] {
            CellPreview::Instance(outline) => assert_eq!(outline.width, 400.0),
            other => panic!("expected an instance, got {other:?}"),
        }

        let previews = matrix.preview(&fonts, "b");
        assert_eq!(previews[&Spot::new(1, 0)], CellPreview::Error(Outline::error_placeholder()));

        let previews = matrix.preview(&fonts, "missing");
        assert!(previews.values().all(|p| *p == CellPreview::Empty));
    }

    #[test]
    fn generate_names_instances_after_spots() {
        let mut matrix = Matrix::default();
        matrix.place_master(Spot::new(0, 0), "light.ufo").unwrap();
        matrix.place_master(Spot::new(2, 0), "bold.ufo").unwrap();
        let fonts = fonts();

        let spots = matrix.select("*").unwrap();
        assert_eq!(spots, vec![Spot::new(1, 0)]);

        let results = matrix.generate(&spots, &fonts, &GenerationOptions::default());
        assert_eq!(results.len(), 1);
        let (spot, result) = &results[0];
        assert_eq!(*spot, Spot::new(1, 0));
        let instance = result.as_ref().unwrap();
        assert_eq!(instance.font.name(), "Demo B1");
        assert_eq!(instance.report.failed_glyphs.len(), 1);
    }
}
