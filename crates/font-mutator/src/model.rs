//! Interpolation model construction and evaluation.
//!
//! A model is a neutral value at the bias location plus a list of deviation
//! terms. Terms that move along a single axis ("on-axis") are weighted by
//! that axis alone; terms that move along several axes ("off-axis") carry
//! only what the on-axis terms fail to predict at their location and are
//! weighted by the product of their per-axis factors.

use std::collections::BTreeSet;

use crate::{
    BuildError, Interpolate, Location, Result, SampleDiscrepancy,
    axis::{AxisKnots, EPSILON, same, same_coordinates},
    location::compare_coordinates,
};

/// What to do when two samples share a location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the first sample at a location and drop later ones with a warning.
    #[default]
    KeepFirst,
    /// Fail with [`BuildError::AmbiguousLocation`].
    Reject,
}

/// A master value anchored at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<V> {
    pub location: Location,
    pub value: V,
}

impl<V> Sample<V> {
    pub fn new(location: Location, value: V) -> Self {
        Self { location, value }
    }
}

impl<V> From<(Location, V)> for Sample<V> {
    fn from((location, value): (Location, V)) -> Self {
        Self::new(location, value)
    }
}

/// How a term is weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// Deviates along one axis only (index into [`Model::axes`]).
    OnAxis(usize),
    /// Deviates along two or more axes.
    OffAxis,
}

/// A deviation from the neutral value.
#[derive(Debug, Clone, PartialEq)]
pub struct Term<V> {
    location: Location,
    coordinates: Vec<f64>,
    kind: TermKind,
    delta: V,
}

impl<V> Term<V> {
    /// Location relative to the bias.
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn kind(&self) -> TermKind {
        self.kind
    }

    pub fn delta(&self) -> &V {
        &self.delta
    }
}

/// Builds [`Model`]s from samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelBuilder {
    duplicates: DuplicatePolicy,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate-location policy.
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Build a model from `samples`.
    ///
    /// The result does not depend on the order of the samples, except that
    /// among samples sharing a location the first one wins. Coordinates
    /// closer than the knot tolerance count as the same location.
    pub fn build<V, S>(&self, samples: impl IntoIterator<Item = S>) -> Result<Model<V>>
    where
        V: Interpolate,
        S: Into<Sample<V>>,
    {
        let samples: Vec<Sample<V>> = samples.into_iter().map(Into::into).collect();
        check_compatibility(&samples)?;

        let axes: Vec<String> = samples
            .iter()
            .flat_map(|sample| sample.location.axes())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut expanded: Vec<(Vec<f64>, Sample<V>)> = Vec::with_capacity(samples.len());
        for sample in samples {
            let coordinates = sample.location.expand(&axes);
            if expanded.iter().any(|(seen, _)| same_coordinates(seen, &coordinates)) {
                match self.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(BuildError::AmbiguousLocation(sample.location));
                    }
                    DuplicatePolicy::KeepFirst => {
                        log::warn!("Ignoring duplicate sample at {}", sample.location);
                        continue;
                    }
                }
            }
            expanded.push((coordinates, sample));
        }

        // Canonical order: the bias is the lexicographically smallest location,
        // which is the coordinate-wise minimum whenever a sample sits there.
        expanded.sort_by(|(a, _), (b, _)| compare_coordinates(a, b));

        let mut expanded = expanded.into_iter();
        let (bias_coordinates, bias) = expanded.next().ok_or(BuildError::NoSamples)?;
        let neutral = bias.value;

        let relative: Vec<(Vec<f64>, V)> = expanded
            .map(|(coordinates, sample)| {
                let offset: Vec<f64> =
                    coordinates.iter().zip(&bias_coordinates).map(|(c, b)| c - b).collect();
                (offset, sample.value)
            })
            .collect();

        let on_axis_knots: Vec<AxisKnots> = (0..axes.len())
            .map(|axis| {
                AxisKnots::new(
                    relative
                        .iter()
                        .filter(|(offset, _)| on_axis_of(offset) == Some(axis))
                        .map(|(offset, _)| offset[axis]),
                )
            })
            .collect();
        let all_knots: Vec<AxisKnots> = (0..axes.len())
            .map(|axis| AxisKnots::new(relative.iter().map(|(offset, _)| offset[axis])))
            .collect();

        let (on_axis, off_axis): (Vec<_>, Vec<_>) =
            relative.into_iter().partition(|(offset, _)| on_axis_of(offset).is_some());

        let mut terms: Vec<Term<V>> = on_axis
            .into_iter()
            .filter_map(|(offset, value)| {
                let axis = on_axis_of(&offset)?;
                Some(Term {
                    location: Location::from_coordinates(&axes, &offset),
                    coordinates: offset,
                    kind: TermKind::OnAxis(axis),
                    delta: value.sub(&neutral),
                })
            })
            .collect();

        for (offset, value) in off_axis {
            // Subtract what the on-axis terms already predict here.
            let delta = terms.iter().fold(value.sub(&neutral), |delta, term| {
                let weight = term_weight(term, &offset, &on_axis_knots, &all_knots);
                if weight.abs() <= EPSILON { delta } else { delta.sub(&term.delta.scale(weight)) }
            });
            terms.push(Term {
                location: Location::from_coordinates(&axes, &offset),
                coordinates: offset,
                kind: TermKind::OffAxis,
                delta,
            });
        }

        let bias = Location::from_coordinates(&axes, &bias_coordinates);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Model over {axes:?}, bias {bias}");
            for term in &terms {
                log::debug!("  {:?} term at {}", term.kind, term.location);
            }
        }

        Ok(Model { axes, bias, bias_coordinates, neutral, terms, on_axis_knots, all_knots })
    }
}

fn check_compatibility<V: Interpolate>(samples: &[Sample<V>]) -> Result<()> {
    let (first, rest) = samples.split_first().ok_or(BuildError::NoSamples)?;
    let problems: Vec<SampleDiscrepancy> = rest
        .iter()
        .enumerate()
        .filter_map(|(i, sample)| {
            let discrepancies = first.value.compatibility(&sample.value);
            (!discrepancies.is_empty()).then(|| SampleDiscrepancy {
                index: i + 1,
                location: sample.location.clone(),
                discrepancies,
            })
        })
        .collect();

    if problems.is_empty() { Ok(()) } else { Err(BuildError::IncompatibleSamples(problems)) }
}

/// Index of the only axis `offset` moves along.
fn on_axis_of(offset: &[f64]) -> Option<usize> {
    let mut non_zero = offset.iter().enumerate().filter(|(_, v)| !same(**v, 0.0));
    match (non_zero.next(), non_zero.next()) {
        (Some((axis, _)), None) => Some(axis),
        _ => None,
    }
}

fn term_weight<V>(
    term: &Term<V>,
    offset: &[f64],
    on_axis_knots: &[AxisKnots],
    all_knots: &[AxisKnots],
) -> f64 {
    match term.kind {
        TermKind::OnAxis(axis) => on_axis_knots[axis].factor(term.coordinates[axis], offset[axis]),
        TermKind::OffAxis => all_knots
            .iter()
            .enumerate()
            .map(|(axis, knots)| knots.factor(term.coordinates[axis], offset[axis]))
            .product(),
    }
}

/// A built interpolation model.
#[derive(Debug, Clone, PartialEq)]
pub struct Model<V> {
    axes: Vec<String>,
    bias: Location,
    bias_coordinates: Vec<f64>,
    neutral: V,
    terms: Vec<Term<V>>,
    on_axis_knots: Vec<AxisKnots>,
    all_knots: Vec<AxisKnots>,
}

impl<V: Interpolate> Model<V> {
    /// The value at `location`.
    ///
    /// Axes the model does not know are ignored; known axes the location
    /// leaves out are read as `0.0`.
    pub fn evaluate(&self, location: &Location) -> V {
        let factors = self.factors(location);
        self.terms.iter().zip(factors).fold(self.neutral.clone(), |total, (term, weight)| {
            if weight.abs() <= EPSILON { total } else { total.add(&term.delta.scale(weight)) }
        })
    }

    /// Weights of every term at `location`, in term order.
    pub fn factors(&self, location: &Location) -> Vec<f64> {
        let offset: Vec<f64> = self
            .axes
            .iter()
            .zip(&self.bias_coordinates)
            .map(|(axis, bias)| location.coordinate(axis) - bias)
            .collect();
        self.terms
            .iter()
            .map(|term| term_weight(term, &offset, &self.on_axis_knots, &self.all_knots))
            .collect()
    }
}

impl<V> Model<V> {
    /// Axes of the model, in canonical order.
    pub fn axes(&self) -> &[String] {
        &self.axes
    }

    pub fn bias(&self) -> &Location {
        &self.bias
    }

    /// The value at the bias.
    pub fn neutral(&self) -> &V {
        &self.neutral
    }

    pub fn terms(&self) -> &[Term<V>] {
        &self.terms
    }

    /// Axes along which every sample sits at the same coordinate.
    ///
    /// They contribute a factor of 1 to every term.
    pub fn degenerate_axes(&self) -> impl Iterator<Item = &str> {
        self.axes
            .iter()
            .zip(&self.all_knots)
            .filter(|(_, knots)| knots.is_degenerate())
            .map(|(axis, _)| axis.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(h: f64, v: f64) -> Location {
        Location::new().with("horizontal", h).with("vertical", v)
    }

    fn h(value: f64) -> Location {
        Location::new().with("horizontal", value)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.0001
    }

    fn square() -> Vec<Sample<f64>> {
        vec![
            Sample::new(loc(0.0, 0.0), 0.0),
            Sample::new(loc(100.0, 0.0), 10.0),
            Sample::new(loc(0.0, 100.0), 20.0),
            Sample::new(loc(100.0, 100.0), 40.0),
        ]
    }

    #[test]
    fn empty_set_is_an_error() {
        let result = ModelBuilder::new().build(Vec::<Sample<f64>>::new());
        assert_eq!(result.unwrap_err(), BuildError::NoSamples);
    }

    #[test]
    fn single_sample_is_constant() {
        let model = ModelBuilder::new().build([(loc(300.0, 200.0), 42.0)]).unwrap();

        for location in [loc(0.0, 0.0), loc(300.0, 200.0), loc(-1000.0, 5000.0), Location::new()] {
            assert_eq!(model.evaluate(&location), 42.0);
        }
        assert!(model.terms().is_empty());
    }

    #[test]
    fn linear_on_one_axis() {
        let model = ModelBuilder::new().build([(h(0.0), 100.0), (h(100.0), 300.0)]).unwrap();

        assert!(close(model.evaluate(&h(50.0)), 200.0));
        assert!(close(model.evaluate(&h(200.0)), 500.0));
        assert!(close(model.evaluate(&h(-100.0)), -100.0));
    }

    #[test]
    fn bias_is_coordinate_wise_minimum() {
        let model = ModelBuilder::new()
            .build([(h(300.0), 3.0), (h(100.0), 1.0), (h(200.0), 2.0)])
            .unwrap();

        assert_eq!(model.bias(), &h(100.0));
        assert_eq!(*model.neutral(), 1.0);
        assert!(close(model.evaluate(&h(400.0)), 4.0));
        assert!(close(model.evaluate(&h(0.0)), 0.0));
    }

    #[test]
    fn reproduces_masters() {
        let samples = vec![
            Sample::new(loc(100.0, 100.0), 5.0),
            Sample::new(loc(300.0, 100.0), 9.0),
            Sample::new(loc(100.0, 400.0), -2.0),
            Sample::new(loc(250.0, 300.0), 17.0),
            Sample::new(loc(500.0, 50.0), 1.5),
        ];
        let model = ModelBuilder::new().build(samples.clone()).unwrap();

        for sample in &samples {
            assert!(
                close(model.evaluate(&sample.location), sample.value),
                "{} evaluated to {}, expected {}",
                sample.location,
                model.evaluate(&sample.location),
                sample.value
            );
        }
    }

    #[test]
    fn off_axis_corner_is_reproduced() {
        let model = ModelBuilder::new().build(square()).unwrap();

        assert_eq!(model.terms().iter().filter(|t| t.kind() == TermKind::OffAxis).count(), 1);
        assert!(close(model.evaluate(&loc(100.0, 100.0)), 40.0));
    }

    #[test]
    fn square_is_bilinear() {
        let model = ModelBuilder::new().build(square()).unwrap();

        assert!(close(model.evaluate(&loc(50.0, 50.0)), 17.5));
        assert!(close(model.evaluate(&loc(50.0, 0.0)), 5.0));
        assert!(close(model.evaluate(&loc(200.0, 0.0)), 20.0));
    }

    #[test]
    fn axes_are_additive_without_corner() {
        let model = ModelBuilder::new()
            .build([(loc(0.0, 0.0), 0.0), (loc(100.0, 0.0), 10.0), (loc(0.0, 100.0), 20.0)])
            .unwrap();

        assert!(close(model.evaluate(&loc(100.0, 100.0)), 30.0));
    }

    #[test]
    fn order_does_not_matter() {
        let forward = ModelBuilder::new().build(square()).unwrap();
        let mut reversed_samples = square();
        reversed_samples.reverse();
        let reversed = ModelBuilder::new().build(reversed_samples).unwrap();

        assert_eq!(forward, reversed);
        for location in [loc(13.0, 77.0), loc(-40.0, 250.0), loc(100.0, 0.0)] {
            assert_eq!(forward.evaluate(&location), reversed.evaluate(&location));
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let model = ModelBuilder::new().build(square()).unwrap();
        let location = loc(33.0, 66.0);
        assert_eq!(model.evaluate(&location), model.evaluate(&location));
    }

    #[test]
    fn duplicates_keep_first() {
        let model = ModelBuilder::new()
            .build([(h(0.0), 0.0), (h(100.0), 10.0), (h(100.0), 99.0)])
            .unwrap();

        assert_eq!(model.terms().len(), 1);
        assert!(close(model.evaluate(&h(100.0)), 10.0));
    }

    #[test]
    fn duplicates_can_be_rejected() {
        let result = ModelBuilder::new()
            .duplicates(DuplicatePolicy::Reject)
            .build([(h(0.0), 0.0), (h(100.0), 10.0), (h(100.0), 99.0)]);

        assert_eq!(result.unwrap_err(), BuildError::AmbiguousLocation(h(100.0)));
    }

    #[test]
    fn nearly_equal_locations_are_duplicates() {
        let model = ModelBuilder::new()
            .build([(h(0.0), 0.0), (h(100.0), 10.0), (h(100.0 + 1e-10), 20.0)])
            .unwrap();
        assert_eq!(model.terms().len(), 1);
        assert!(close(model.evaluate(&h(100.0)), 10.0));

        let result = ModelBuilder::new()
            .duplicates(DuplicatePolicy::Reject)
            .build([(h(0.0), 0.0), (h(100.0), 10.0), (h(100.0 + 1e-10), 20.0)]);
        assert_eq!(result.unwrap_err(), BuildError::AmbiguousLocation(h(100.0 + 1e-10)));
    }

    #[test]
    fn sample_next_to_the_bias_does_not_replace_it() {
        let model = ModelBuilder::new().build([(h(0.0), 0.0), (h(1e-10), 10.0)]).unwrap();

        assert!(model.terms().is_empty());
        assert_eq!(model.evaluate(&h(0.0)), 0.0);
        assert_eq!(model.evaluate(&h(500.0)), 0.0);
    }

    #[test]
    fn near_zero_offset_stays_on_axis() {
        let model = ModelBuilder::new()
            .build([(loc(0.0, 0.0), 0.0), (loc(100.0, 1e-10), 10.0), (loc(0.0, 100.0), 20.0)])
            .unwrap();

        assert!(model.terms().iter().all(|term| term.kind() != TermKind::OffAxis));
        assert!(close(model.evaluate(&loc(100.0, 0.0)), 10.0));
        assert!(close(model.evaluate(&loc(0.0, 100.0)), 20.0));
    }

    #[test]
    fn missing_axis_counts_as_zero() {
        let model = ModelBuilder::new()
            .build([(Location::new(), 0.0), (h(100.0), 10.0)])
            .unwrap();

        assert_eq!(model.axes(), ["horizontal".to_string()]);
        assert!(close(model.evaluate(&h(50.0)), 5.0));
        assert!(close(model.evaluate(&Location::new().with("unknown", 3.0)), 0.0));
    }

    #[test]
    fn degenerate_axis_has_no_effect() {
        let model = ModelBuilder::new()
            .build([(loc(0.0, 100.0), 0.0), (loc(100.0, 100.0), 10.0)])
            .unwrap();

        assert_eq!(model.degenerate_axes().collect::<Vec<_>>(), vec!["vertical"]);
        assert!(close(model.evaluate(&loc(50.0, 100.0)), 5.0));
        assert!(close(model.evaluate(&loc(50.0, 900.0)), 5.0));
    }

    #[test]
    fn incompatible_samples_are_rejected() {
        let result = ModelBuilder::new()
            .build([(h(0.0), vec![1.0, 2.0]), (h(100.0), vec![1.0]), (h(200.0), vec![0.0, 0.0])]);

        match result {
            Err(BuildError::IncompatibleSamples(problems)) => {
                assert_eq!(problems.len(), 1);
                assert_eq!(problems[0].index, 1);
                assert_eq!(problems[0].location, h(100.0));
            }
            other => panic!("expected incompatible samples, got {other:?}"),
        }
    }

    #[test]
    fn vector_values_interpolate_componentwise() {
        let model = ModelBuilder::new()
            .build([(h(0.0), vec![0.0, 10.0]), (h(100.0), vec![100.0, 30.0])])
            .unwrap();

        let value = model.evaluate(&h(25.0));
        assert!(close(value[0], 25.0));
        assert!(close(value[1], 15.0));
    }

    #[test]
    fn factors_follow_term_order() {
        let model = ModelBuilder::new().build(square()).unwrap();
        let factors = model.factors(&loc(50.0, 50.0));

        assert_eq!(factors.len(), 3);
        assert!(close(factors[2], 0.25));
    }
}
