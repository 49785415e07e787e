//! # Font Mutator
//!
//! Build interpolation models from a sparse, irregular set of masters and
//! evaluate them anywhere in the design space.
//!
//! The model follows the MutatorMath approach: one master is picked as the
//! bias (the neutral), every other master becomes a deviation term measured
//! from it, and the weight of each term at a query location is a product of
//! piecewise-linear per-axis factors. Values outside the masters' hull are
//! extrapolated linearly.
//!
//! ## Example
//!
//! ```
//! use font_mutator::{Location, ModelBuilder, Sample};
//!
//! let model = ModelBuilder::new()
//!     .build(vec![
//!         Sample::new(Location::new().with("weight", 0.0), 100.0),
//!         Sample::new(Location::new().with("weight", 100.0), 300.0),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(model.evaluate(&Location::new().with("weight", 50.0)), 200.0);
//! assert_eq!(model.evaluate(&Location::new().with("weight", 200.0)), 500.0);
//! ```

mod algebra;
mod axis;
mod error;
mod location;
mod model;

pub use algebra::{Discrepancy, Interpolate};
pub use error::{BuildError, Result, SampleDiscrepancy};
pub use location::Location;
pub use model::{DuplicatePolicy, Model, ModelBuilder, Sample, Term, TermKind};
