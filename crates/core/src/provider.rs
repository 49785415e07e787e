//! Where master fonts come from.

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use font_math::MasterFont;

/// Resolves a master's source identifier (typically a font path) to a loaded
/// font.
pub trait FontProvider {
    fn font(&self, source: &str) -> Option<&MasterFont>;

    fn is_available(&self, source: &str) -> bool {
        self.font(source).is_some()
    }
}

impl<S: BuildHasher> FontProvider for HashMap<String, MasterFont, S> {
    fn font(&self, source: &str) -> Option<&MasterFont> {
        self.get(source)
    }
}

impl FontProvider for BTreeMap<String, MasterFont> {
    fn font(&self, source: &str) -> Option<&MasterFont> {
        self.get(source)
    }
}
