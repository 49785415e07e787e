//! Glyph-set compatibility report across master fonts.

use std::fmt::{self, Display, Formatter};

use font_math::{MasterFont, is_compatible};

use crate::instance::common_glyphs;

/// One distinct set of problems between the reference master and another.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestEntry {
    /// `"Reference Name <X> Other Name"`
    pub masters: String,
    pub problems: Vec<String>,
    /// Glyphs showing exactly these problems between these masters.
    pub glyphs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatibilityReport {
    pub compatible: usize,
    pub incompatible: usize,
    pub stray: Vec<String>,
    pub digest: Vec<DigestEntry>,
}

impl CompatibilityReport {
    pub fn all_compatible(&self) -> bool {
        self.incompatible == 0
    }
}

/// Compare every glyph the masters share against the first master.
pub fn compatibility_report(masters: &[&MasterFont]) -> CompatibilityReport {
    let mut report = CompatibilityReport::default();
    let Some((reference, others)) = masters.split_first() else {
        return report;
    };

    let (common, stray) = common_glyphs(masters);
    report.stray = stray;

    for name in &common {
        let mut compatible = true;
        for other in others {
            let (Some(ours), Some(theirs)) = (reference.glyph(name), other.glyph(name)) else {
                continue;
            };
            let (ok, discrepancies) = is_compatible(&ours.outline, &theirs.outline);
            if ok {
                continue;
            }
            compatible = false;

            let pair = format!("{} <X> {}", reference.name(), other.name());
            let problems: Vec<String> = discrepancies.iter().map(ToString::to_string).collect();
            match report.digest.iter_mut().find(|e| e.masters == pair && e.problems == problems) {
                Some(entry) => entry.glyphs.push(name.clone()),
                None => report.digest.push(DigestEntry {
                    masters: pair,
                    problems,
                    glyphs: vec![name.clone()],
                }),
            }
        }
        if compatible {
            report.compatible += 1;
        } else {
            report.incompatible += 1;
        }
    }

    log::info!(
        "Compatibility: {} compatible, {} incompatible, {} stray",
        report.compatible,
        report.incompatible,
        report.stray.len()
    );
    report
}

impl Display for CompatibilityReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "*   Compatible glyphs: {}", self.compatible)?;
        writeln!(f, "**  Incompatible glyphs: {}", self.incompatible)?;
        writeln!(f, "*** Stray glyphs: {}", self.stray.len())?;
        for name in &self.stray {
            writeln!(f, "- {name}")?;
        }
        for entry in &self.digest {
            writeln!(f)?;
            writeln!(f, "{} ({})", entry.masters, entry.glyphs.join(", "))?;
            for problem in &entry.problems {
                writeln!(f, "- {problem}")?;
            }
        }
        Ok(())
    }
}
