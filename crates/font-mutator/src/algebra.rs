//! The arithmetic a value needs to take part in interpolation.

use std::fmt::{self, Display, Formatter};

/// A structural difference that prevents two values from being combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    /// What kind of structure differs ("contours", "components", ...)
    pub area: String,
    /// Where in the value, if it can be pinned down ("contour 2, point 5")
    pub location: Option<String>,
    pub description: String,
}

impl Discrepancy {
    pub fn new(area: impl Into<String>, description: impl Into<String>) -> Self {
        Self { area: area.into(), location: None, description: description.into() }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl Display for Discrepancy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        if let Some(location) = &self.location {
            s.push_str(&format!("at {location}, "));
        }
        s.push_str(&self.description);
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

/// Values that can be scaled and summed.
///
/// `add`, `sub` and `scale` must return a value of the same shape as their
/// inputs. They are only called on values for which [`compatibility`]
/// reported nothing; `scale(0.0)` is the zero of the algebra.
///
/// [`compatibility`]: Interpolate::compatibility
pub trait Interpolate: Clone {
    fn add(&self, other: &Self) -> Self;

    fn sub(&self, other: &Self) -> Self;

    fn scale(&self, factor: f64) -> Self;

    /// Structural differences between `self` and `other`; empty when the two
    /// can be combined.
    fn compatibility(&self, _other: &Self) -> Vec<Discrepancy> {
        Vec::new()
    }

    fn is_compatible(&self, other: &Self) -> bool {
        self.compatibility(other).is_empty()
    }
}

impl Interpolate for f64 {
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn scale(&self, factor: f64) -> Self {
        self * factor
    }
}

impl Interpolate for Vec<f64> {
    fn add(&self, other: &Self) -> Self {
        self.iter().zip(other).map(|(a, b)| a + b).collect()
    }

    fn sub(&self, other: &Self) -> Self {
        self.iter().zip(other).map(|(a, b)| a - b).collect()
    }

    fn scale(&self, factor: f64) -> Self {
        self.iter().map(|v| v * factor).collect()
    }

    fn compatibility(&self, other: &Self) -> Vec<Discrepancy> {
        if self.len() == other.len() {
            Vec::new()
        } else {
            vec![Discrepancy::new(
                "values",
                format!("length should be {}, found {}", self.len(), other.len()),
            )]
        }
    }
}
