//! Error types for model building.

use std::{
    fmt::{self, Display, Formatter},
    result,
};

use crate::{Discrepancy, Location};

/// Why one sample cannot be combined with the reference sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDiscrepancy {
    /// Index of the sample in the set handed to the builder
    pub index: usize,
    pub location: Location,
    pub discrepancies: Vec<Discrepancy>,
}

impl Display for SampleDiscrepancy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let details: Vec<String> = self.discrepancies.iter().map(ToString::to_string).collect();
        write!(f, "sample {} at {}: {}", self.index, self.location, details.join("; "))
    }
}

/// Errors that can occur while building a model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("no samples to build a model from")]
    NoSamples,

    #[error("incompatible samples: {}", list(.0))]
    IncompatibleSamples(Vec<SampleDiscrepancy>),

    #[error("more than one sample at {0}")]
    AmbiguousLocation(Location),
}

fn list(samples: &[SampleDiscrepancy]) -> String {
    samples.iter().map(ToString::to_string).collect::<Vec<_>>().join(" | ")
}

pub type Result<T> = result::Result<T, BuildError>;
