//! Per-axis weighting.
//!
//! Each axis carries a sorted set of knots: the neutral position `0.0` and
//! every relative coordinate a term sits at. The factor of a term at a query
//! coordinate is the piecewise-linear "hat" of the term's knot, extended
//! linearly past the outermost knots.

/// Coordinates closer than this are the same knot.
pub(crate) const EPSILON: f64 = 1e-9;

pub(crate) fn same(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Whether two coordinate vectors name the same knot on every axis.
pub(crate) fn same_coordinates(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same(*a, *b))
}

/// Sorted, deduplicated relative positions along one axis.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AxisKnots {
    knots: Vec<f64>,
}

impl AxisKnots {
    /// Collect knots from term coordinates. The neutral position is always a knot.
    pub fn new(positions: impl IntoIterator<Item = f64>) -> Self {
        let mut knots: Vec<f64> = positions.into_iter().chain(std::iter::once(0.0)).collect();
        knots.sort_by(f64::total_cmp);
        knots.dedup_by(|a, b| same(*a, *b));
        Self { knots }
    }

    /// An axis with a single knot has no extent.
    pub fn is_degenerate(&self) -> bool {
        self.knots.len() < 2
    }

    /// Factor of a term sitting at knot `term` when queried at `query`.
    ///
    /// 1 at the term's own knot, 0 at every other knot, linear in between,
    /// and linear past the ends using the two outermost knots on that side.
    pub fn factor(&self, term: f64, query: f64) -> f64 {
        if self.is_degenerate() {
            return 1.0;
        }

        if let Some(knot) = self.knots.iter().find(|k| same(**k, query)) {
            return if same(*knot, term) { 1.0 } else { 0.0 };
        }

        let (lo, hi) = self.segment(query);
        if same(term, hi) {
            (query - lo) / (hi - lo)
        } else if same(term, lo) {
            (query - hi) / (lo - hi)
        } else {
            0.0
        }
    }

    /// The pair of knots governing `query`: the bracketing knots, or the two
    /// outermost on the side `query` lies past.
    fn segment(&self, query: f64) -> (f64, f64) {
        let n = self.knots.len();
        match self.knots.iter().position(|k| *k > query) {
            Some(0) => (self.knots[0], self.knots[1]),
            Some(i) => (self.knots[i - 1], self.knots[i]),
            None => (self.knots[n - 2], self.knots[n - 1]),
        }
    }
}
