//! Locations in a named-axis design space.

use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

/// A point in the design space, as axis name to coordinate.
///
/// Axes are kept in lexicographic order so that iteration, comparison and
/// display are canonical. An axis that is not mentioned is "don't care";
/// models read it as the neutral coordinate `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location(BTreeMap<String, f64>);

impl Location {
    /// An empty location (the origin on every axis).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a coordinate, builder style.
    pub fn with(mut self, axis: impl Into<String>, value: f64) -> Self {
        self.0.insert(axis.into(), value);
        self
    }

    /// Set a coordinate in place.
    pub fn insert(&mut self, axis: impl Into<String>, value: f64) {
        self.0.insert(axis.into(), value);
    }

    /// The coordinate on `axis`, if the location mentions it.
    pub fn get(&self, axis: &str) -> Option<f64> {
        self.0.get(axis).copied()
    }

    /// The coordinate on `axis`, or `0.0` when the axis is not mentioned.
    pub fn coordinate(&self, axis: &str) -> f64 {
        self.get(axis).unwrap_or(0.0)
    }

    pub fn axes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(axis, value)| (axis.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Coordinates on `axes`, in the given order, with missing axes at `0.0`.
    pub fn expand(&self, axes: &[String]) -> Vec<f64> {
        axes.iter().map(|axis| self.coordinate(axis)).collect()
    }

    /// Build a location from coordinates laid out along `axes`.
    pub fn from_coordinates(axes: &[String], coordinates: &[f64]) -> Self {
        Self(axes.iter().cloned().zip(coordinates.iter().copied()).collect())
    }

    /// True when every coordinate is zero.
    pub fn is_origin(&self) -> bool {
        self.0.values().all(|value| *value == 0.0)
    }

    /// The single axis carrying a non-zero coordinate, if there is exactly one.
    pub fn on_axis(&self) -> Option<&str> {
        let mut non_zero = self.0.iter().filter(|(_, value)| **value != 0.0);
        match (non_zero.next(), non_zero.next()) {
            (Some((axis, _)), None) => Some(axis.as_str()),
            _ => None,
        }
    }
}

/// Lexicographic comparison of two coordinate vectors of equal length.
pub(crate) fn compare_coordinates(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

impl<K: Into<String>> FromIterator<(K, f64)> for Location {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(axis, value)| (axis.into(), value)).collect())
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> =
            self.0.iter().map(|(axis, value)| format!("{axis}={value}")).collect();
        write!(f, "<{}>", parts.join(", "))
    }
}
