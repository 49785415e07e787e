//! Scalar model evaluation.

use anyhow::{Context, Result};
use font_mutator::{DuplicatePolicy, Location, ModelBuilder};

use crate::args::SampleArg;

/// Build a scalar model from `samples` and evaluate it at each of `at`.
pub fn evaluate(
    samples: &[SampleArg],
    at: &[Location],
    policy: DuplicatePolicy,
) -> Result<Vec<(Location, f64)>> {
    let model = ModelBuilder::new()
        .duplicates(policy)
        .build(samples.iter().map(|sample| (sample.location.clone(), sample.value)))
        .context("Failed to build model")?;

    for axis in model.degenerate_axes() {
        log::info!("Axis '{axis}' has a single coordinate and is ignored");
    }

    Ok(at.iter().map(|location| (location.clone(), model.evaluate(location))).collect())
}
