//! # Font Math
//!
//! Interpolatable font values for the matrix: glyph outlines, kerning tables
//! and font metrics, the [`Value`] sum type over them, and pairwise
//! compatibility checks.

pub mod compat;
mod font;
mod kerning;
mod metrics;
mod outline;
mod value;

pub use compat::{CompatibilityMatrix, check_set, is_compatible};
pub use font::{Glyph, MasterFont, UNNAMED};
pub use kerning::Kerning;
pub use metrics::FontMetrics;
pub use outline::{Anchor, Component, Contour, ContourPoint, Outline, PointType};
pub use value::Value;
