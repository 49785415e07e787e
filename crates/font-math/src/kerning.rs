//! Kerning tables as interpolatable values.

use std::collections::BTreeMap;

use font_mutator::Interpolate;

/// Pair adjustments keyed by (left, right) glyph or group name.
///
/// Two tables are always compatible: a pair missing from one of them is read
/// as `0`, so combining two tables yields the union of their pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kerning(BTreeMap<(String, String), f64>);

impl Kerning {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, left: impl Into<String>, right: impl Into<String>, value: f64) {
        self.0.insert((left.into(), right.into()), value);
    }

    /// The adjustment for a pair, `0.0` when the table has none.
    pub fn get(&self, left: &str, right: &str) -> f64 {
        self.0.get(&(left.to_string(), right.to_string())).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, left: &str, right: &str) -> bool {
        self.0.contains_key(&(left.to_string(), right.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.0.iter().map(|((left, right), value)| (left.as_str(), right.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Round every value to the nearest integer and drop pairs that become 0.
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|(pair, value)| (pair.clone(), value.round()))
                .filter(|(_, value)| *value != 0.0)
                .collect(),
        )
    }

    fn combine(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut pairs = self.0.clone();
        for pair in other.0.keys() {
            pairs.entry(pair.clone()).or_insert(0.0);
        }
        for (pair, value) in pairs.iter_mut() {
            *value = f(*value, other.0.get(pair).copied().unwrap_or(0.0));
        }
        Self(pairs)
    }
}

impl<L: Into<String>, R: Into<String>> FromIterator<(L, R, f64)> for Kerning {
    fn from_iter<I: IntoIterator<Item = (L, R, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(left, right, value)| ((left.into(), right.into()), value))
                .collect(),
        )
    }
}

impl Interpolate for Kerning {
    fn add(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a + b)
    }

    fn sub(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a - b)
    }

    fn scale(&self, factor: f64) -> Self {
        Self(self.0.iter().map(|(pair, value)| (pair.clone(), value * factor)).collect())
    }
}
