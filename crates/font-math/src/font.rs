//! In-memory master fonts.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{FontMetrics, Kerning, Outline};

/// Name used for a missing family or style name.
pub const UNNAMED: &str = "Unnamed";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    pub unicode: Option<u32>,
    pub outline: Outline,
}

impl Glyph {
    pub fn new(outline: Outline) -> Self {
        Self { unicode: None, outline }
    }

    pub fn with_unicode(mut self, unicode: u32) -> Self {
        self.unicode = Some(unicode);
        self
    }
}

/// A font as the matrix sees it: named glyphs in glyph order plus the
/// font-wide values that can be interpolated or copied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterFont {
    pub family_name: Option<String>,
    pub style_name: Option<String>,
    pub glyphs: IndexMap<String, Glyph>,
    pub metrics: FontMetrics,
    pub kerning: Kerning,
    pub groups: BTreeMap<String, Vec<String>>,
}

impl MasterFont {
    pub fn new(family_name: impl Into<String>, style_name: impl Into<String>) -> Self {
        Self {
            family_name: Some(family_name.into()),
            style_name: Some(style_name.into()),
            ..Default::default()
        }
    }

    /// "Family Style", with missing parts shown as [`UNNAMED`].
    pub fn name(&self) -> String {
        format!(
            "{} {}",
            self.family_name.as_deref().unwrap_or(UNNAMED),
            self.style_name.as_deref().unwrap_or(UNNAMED)
        )
    }

    pub fn glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.glyphs.contains_key(name)
    }

    /// Add or replace a glyph. A new glyph goes to the end of the glyph order.
    pub fn insert_glyph(&mut self, name: impl Into<String>, glyph: Glyph) {
        self.glyphs.insert(name.into(), glyph);
    }

    pub fn with_glyph(mut self, name: impl Into<String>, glyph: Glyph) -> Self {
        self.insert_glyph(name, glyph);
        self
    }

    /// Glyph names in glyph order.
    pub fn glyph_order(&self) -> impl Iterator<Item = &str> {
        self.glyphs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
