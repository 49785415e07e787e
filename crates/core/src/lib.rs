//! Matrix Core - the interpolation matrix session and the instance generator
//! built on the font-mutator model.

pub mod config;
pub mod error;
pub mod grid;
pub mod instance;
pub mod provider;
pub mod reallocate;
pub mod report;
pub mod selection;
pub mod session;

pub use error::{InstanceError, MatrixError, Result};
pub use grid::{GridSize, Spot, Weights};
pub use instance::{
    GeneratedInstance, GenerationOptions, GenerationReport, InstanceRequest, Outcome, PlacedMaster,
    common_glyphs, generate_instance, generate_instances, instance_path, interpolate_glyph,
    interpolate_glyph_set,
};
pub use provider::FontProvider;
pub use reallocate::reallocate;
pub use report::{CompatibilityReport, DigestEntry, compatibility_report};
pub use selection::parse_spots;
pub use session::{CellPreview, Matrix};
