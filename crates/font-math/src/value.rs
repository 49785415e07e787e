//! The closed set of values a matrix interpolates.

use font_mutator::{Discrepancy, Interpolate};

use crate::{FontMetrics, Kerning, Outline};

/// Any value the interpolation matrix works with.
///
/// Values of different variants are never compatible; combining them is a
/// programming error and panics.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Weight(f64),
    Metrics(FontMetrics),
    Outline(Outline),
    Kerning(Kerning),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Weight(_) => "weight",
            Value::Metrics(_) => "metrics",
            Value::Outline(_) => "outline",
            Value::Kerning(_) => "kerning",
        }
    }

    fn mismatch(&self, other: &Self) -> ! {
        panic!("cannot combine {} value with {} value", self.kind(), other.kind())
    }
}

impl From<f64> for Value {
    fn from(weight: f64) -> Self {
        Value::Weight(weight)
    }
}

impl From<FontMetrics> for Value {
    fn from(metrics: FontMetrics) -> Self {
        Value::Metrics(metrics)
    }
}

impl From<Outline> for Value {
    fn from(outline: Outline) -> Self {
        Value::Outline(outline)
    }
}

impl From<Kerning> for Value {
    fn from(kerning: Kerning) -> Self {
        Value::Kerning(kerning)
    }
}

impl Interpolate for Value {
    fn add(&self, other: &Self) -> Self {
        match (self, other) {
            (Value::Weight(a), Value::Weight(b)) => Value::Weight(a.add(b)),
            (Value::Metrics(a), Value::Metrics(b)) => Value::Metrics(a.add(b)),
            (Value::Outline(a), Value::Outline(b)) => Value::Outline(a.add(b)),
            (Value::Kerning(a), Value::Kerning(b)) => Value::Kerning(a.add(b)),
            _ => self.mismatch(other),
        }
    }

    fn sub(&self, other: &Self) -> Self {
        match (self, other) {
            (Value::Weight(a), Value::Weight(b)) => Value::Weight(a.sub(b)),
            (Value::Metrics(a), Value::Metrics(b)) => Value::Metrics(a.sub(b)),
            (Value::Outline(a), Value::Outline(b)) => Value::Outline(a.sub(b)),
            (Value::Kerning(a), Value::Kerning(b)) => Value::Kerning(a.sub(b)),
            _ => self.mismatch(other),
        }
    }

    fn scale(&self, factor: f64) -> Self {
        match self {
            Value::Weight(a) => Value::Weight(a.scale(factor)),
            Value::Metrics(a) => Value::Metrics(a.scale(factor)),
            Value::Outline(a) => Value::Outline(a.scale(factor)),
            Value::Kerning(a) => Value::Kerning(a.scale(factor)),
        }
    }

    fn compatibility(&self, other: &Self) -> Vec<Discrepancy> {
        match (self, other) {
            (Value::Weight(a), Value::Weight(b)) => a.compatibility(b),
            (Value::Metrics(a), Value::Metrics(b)) => a.compatibility(b),
            (Value::Outline(a), Value::Outline(b)) => a.compatibility(b),
            (Value::Kerning(a), Value::Kerning(b)) => a.compatibility(b),
            _ => vec![Discrepancy::new(
                "value",
                format!("value should be {}, found {}", self.kind(), other.kind()),
            )],
        }
    }
}
