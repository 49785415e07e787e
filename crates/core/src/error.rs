use std::result;

use font_mutator::BuildError;

use crate::{
    config::GRID_MAX,
    grid::{GridSize, Spot},
};

/// Errors raised by the matrix session and its grid types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    #[error("spot {spot} is outside the {grid} grid")]
    SpotOutOfGrid { spot: Spot, grid: GridSize },

    #[error("invalid grid size {columns}x{rows} (each side must be 1..={GRID_MAX})")]
    InvalidGridSize { columns: usize, rows: usize },

    #[error("invalid grid size: {0:?}")]
    MalformedGridSize(String),

    #[error("invalid spot: {0:?}")]
    InvalidSpot(String),

    #[error("invalid weights: {0:?}")]
    InvalidWeights(String),
}

/// Errors raised while generating instances.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InstanceError {
    #[error("glyph {glyph} is missing from {font}")]
    MissingGlyph { glyph: String, font: String },

    #[error("no masters to generate from")]
    NoMasters,

    #[error("source font index {0} is out of range")]
    NoSourceFont(usize),

    #[error(transparent)]
    Build(#[from] BuildError),
}

pub type Result<T> = result::Result<T, MatrixError>;
