//! Pairwise compatibility checks over sets of values.

use std::collections::BTreeMap;

use font_mutator::{Discrepancy, Interpolate};

/// Check whether `a` and `b` can be interpolated together.
///
/// The boolean does not depend on argument order. The discrepancies are
/// phrased from `a`'s point of view.
pub fn is_compatible<V: Interpolate>(a: &V, b: &V) -> (bool, Vec<Discrepancy>) {
    let mut discrepancies = a.compatibility(b);
    if discrepancies.is_empty() {
        discrepancies = b.compatibility(a);
    }
    (discrepancies.is_empty(), discrepancies)
}

/// Compatibility of every unordered pair in a set of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatibilityMatrix {
    len: usize,
    incompatible: BTreeMap<(usize, usize), Vec<Discrepancy>>,
}

impl CompatibilityMatrix {
    /// Number of values checked.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_compatible(&self, i: usize, j: usize) -> bool {
        !self.incompatible.contains_key(&ordered(i, j))
    }

    /// Discrepancies between values `i` and `j`; empty when compatible.
    pub fn discrepancies(&self, i: usize, j: usize) -> &[Discrepancy] {
        self.incompatible.get(&ordered(i, j)).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn all_compatible(&self) -> bool {
        self.incompatible.is_empty()
    }

    /// Incompatible pairs `(i, j)` with `i < j`, in order.
    pub fn incompatible_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.incompatible.keys().copied()
    }
}

fn ordered(i: usize, j: usize) -> (usize, usize) {
    if i <= j { (i, j) } else { (j, i) }
}

/// Check every unordered pair of `values`.
pub fn check_set<V: Interpolate>(values: &[V]) -> CompatibilityMatrix {
    let mut incompatible = BTreeMap::new();
    for (i, a) in values.iter().enumerate() {
        for (j, b) in values.iter().enumerate().skip(i + 1) {
            let (compatible, discrepancies) = is_compatible(a, b);
            if !compatible {
                log::debug!(
                    "Values {i} and {j} are incompatible: {} problem(s)",
                    discrepancies.len()
                );
                incompatible.insert((i, j), discrepancies);
            }
        }
    }
    CompatibilityMatrix { len: values.len(), incompatible }
}
