//! Instance generation: interpolated glyph sets, kerning and metrics
//! gathered into new in-memory fonts.

use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
};

use font_math::{Glyph, MasterFont, UNNAMED, Value};
use font_mutator::{Location, ModelBuilder};
use rayon::prelude::*;

use crate::{config::INSTANCE_FOLDER, error::InstanceError};

/// A master font at its design-space location.
pub type PlacedMaster<'a> = (Location, &'a MasterFont);

/// What goes into a generated font.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Index of the master that names the instance and provides its glyph
    /// order and groups.
    pub source: usize,
    pub glyphs: bool,
    pub kerning: bool,
    pub metrics: bool,
    /// Copy the source font's groups. Only done when kerning interpolated.
    pub groups: bool,
    /// Round coordinates and kerning values to integers.
    pub round: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self { source: 0, glyphs: true, kerning: true, metrics: true, groups: true, round: true }
    }
}

/// One instance to generate.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRequest {
    /// Style name of the new font, typically the readable spot (`B2`).
    pub name: String,
    pub location: Location,
}

impl InstanceRequest {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self { name: name.into(), location }
    }
}

/// How one part of an instance went.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Skipped,
    Done,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub instance: String,
    pub metrics: Outcome,
    pub kerning: Outcome,
    pub groups: Outcome,
    pub glyphs: usize,
    pub failed_glyphs: Vec<(String, InstanceError)>,
}

impl GenerationReport {
    fn new(instance: &str) -> Self {
        Self {
            instance: instance.to_string(),
            metrics: Outcome::Skipped,
            kerning: Outcome::Skipped,
            groups: Outcome::Skipped,
            glyphs: 0,
            failed_glyphs: Vec::new(),
        }
    }
}

impl Display for GenerationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "*** Generating instance {} ***", self.instance)?;
        writeln!(f, "+ Created new font")?;
        for (part, outcome) in [
            ("font info", &self.metrics),
            ("kerning", &self.kerning),
            ("groups", &self.groups),
        ] {
            match outcome {
                Outcome::Skipped => {}
                Outcome::Done => writeln!(f, "+ Interpolated {part}")?,
                Outcome::Failed(reason) => writeln!(f, "+ Couldn't interpolate {part}: {reason}")?,
            }
        }
        writeln!(f, "+ Interpolated {} glyphs", self.glyphs)?;
        write!(f, "+ Couldn't interpolate {} glyphs", self.failed_glyphs.len())?;
        for (name, error) in &self.failed_glyphs {
            write!(f, "\n  - {name}: {error}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedInstance {
    pub font: MasterFont,
    pub report: GenerationReport,
}

/// Where an instance font is saved next to its masters in `folder`:
/// `matrix-instances/Family-Style.ufo`.
pub fn instance_path(folder: &Path, font: &MasterFont) -> PathBuf {
    let family = font.family_name.as_deref().unwrap_or(UNNAMED);
    let style = font.style_name.as_deref().unwrap_or(UNNAMED);
    folder.join(INSTANCE_FOLDER).join(format!("{family}-{style}.ufo"))
}

/// Glyphs present in every font, in the first font's order, and the first
/// font's glyphs missing from at least one other font.
pub fn common_glyphs(fonts: &[&MasterFont]) -> (Vec<String>, Vec<String>) {
    let Some((first, rest)) = fonts.split_first() else {
        return (Vec::new(), Vec::new());
    };
    first
        .glyph_order()
        .map(str::to_string)
        .partition(|name| rest.iter().all(|font| font.contains(name)))
}

/// Interpolate one glyph at `location`.
///
/// The unicode value is kept only when every master agrees on it.
pub fn interpolate_glyph(
    masters: &[PlacedMaster<'_>],
    name: &str,
    location: &Location,
) -> Result<Glyph, InstanceError> {
    let glyphs = masters
        .iter()
        .map(|(at, font)| {
            font.glyph(name).map(|glyph| (at, glyph)).ok_or_else(|| {
                InstanceError::MissingGlyph { glyph: name.to_string(), font: font.name() }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let unicodes: BTreeSet<Option<u32>> = glyphs.iter().map(|(_, glyph)| glyph.unicode).collect();
    let unicode = match unicodes.len() {
        1 => unicodes.into_iter().next().flatten(),
        _ => None,
    };

    let model = ModelBuilder::new().build(
        glyphs.iter().map(|(at, glyph)| ((*at).clone(), glyph.outline.clone())),
    )?;
    Ok(Glyph { unicode, outline: model.evaluate(location) })
}

/// Interpolate `names` into `target`, appending `suffix` to each glyph name.
///
/// Glyphs that cannot be interpolated are skipped and returned with the
/// reason; all others are still generated.
pub fn interpolate_glyph_set(
    location: &Location,
    names: &[String],
    masters: &[PlacedMaster<'_>],
    target: &mut MasterFont,
    suffix: Option<&str>,
) -> Vec<(String, InstanceError)> {
    interpolate_glyphs(location, names, masters, suffix, false, target)
}

fn interpolate_glyphs(
    location: &Location,
    names: &[String],
    masters: &[PlacedMaster<'_>],
    suffix: Option<&str>,
    round: bool,
    target: &mut MasterFont,
) -> Vec<(String, InstanceError)> {
    let mut failed = Vec::new();
    for name in names {
        match interpolate_glyph(masters, name, location) {
            Ok(mut glyph) => {
                if round {
                    glyph.outline = glyph.outline.rounded();
                }
                target.insert_glyph(format!("{name}{}", suffix.unwrap_or_default()), glyph);
            }
            Err(e) => {
                log::debug!("Skipping glyph {name}: {e}");
                failed.push((name.clone(), e));
            }
        }
    }
    failed
}

/// Font-wide data interpolated as a whole.
#[derive(Debug, Clone, Copy)]
enum FontPart {
    Metrics,
    Kerning,
}

impl FontPart {
    fn read(self, font: &MasterFont) -> Value {
        match self {
            FontPart::Metrics => Value::from(font.metrics.clone()),
            FontPart::Kerning => Value::from(font.kerning.clone()),
        }
    }

    fn interpolate(
        self,
        masters: &[PlacedMaster<'_>],
        location: &Location,
    ) -> Result<Value, InstanceError> {
        let model = ModelBuilder::new()
            .build(masters.iter().map(|(at, font)| (at.clone(), self.read(font))))?;
        Ok(model.evaluate(location))
    }
}

/// Put an interpolated font-wide value into `font`.
fn store(font: &mut MasterFont, value: Value, round: bool) {
    match value {
        Value::Metrics(metrics) => font.metrics = metrics,
        Value::Kerning(kerning) => font.kerning = if round { kerning.rounded() } else { kerning },
        Value::Weight(_) | Value::Outline(_) => {}
    }
}

/// Generate one instance font at `location`, named after the source master's
/// family with `name` as its style.
pub fn generate_instance(
    name: &str,
    location: &Location,
    masters: &[PlacedMaster<'_>],
    options: &GenerationOptions,
) -> Result<GeneratedInstance, InstanceError> {
    if masters.is_empty() {
        return Err(InstanceError::NoMasters);
    }
    let (_, source) =
        masters.get(options.source).ok_or(InstanceError::NoSourceFont(options.source))?;

    let mut font = MasterFont {
        family_name: source.family_name.clone(),
        style_name: Some(name.to_string()),
        ..Default::default()
    };
    let mut report = GenerationReport::new(name);

    if options.metrics {
        report.metrics = match FontPart::Metrics.interpolate(masters, location) {
            Ok(metrics) => {
                store(&mut font, metrics, options.round);
                Outcome::Done
            }
            Err(e) => Outcome::Failed(e.to_string()),
        };
    }

    if options.kerning {
        report.kerning = match FontPart::Kerning.interpolate(masters, location) {
            Ok(kerning) => {
                store(&mut font, kerning, options.round);
                if options.groups {
                    font.groups = source.groups.clone();
                    report.groups = Outcome::Done;
                }
                Outcome::Done
            }
            Err(e) => Outcome::Failed(e.to_string()),
        };
    }

    if options.glyphs {
        let fonts: Vec<&MasterFont> = masters.iter().map(|(_, font)| *font).collect();
        let (common, _) = common_glyphs(&fonts);
        let common: BTreeSet<&str> = common.iter().map(String::as_str).collect();
        // Follow the source font's glyph order.
        let names: Vec<String> = source
            .glyph_order()
            .filter(|name| common.contains(name))
            .map(str::to_string)
            .collect();
        report.failed_glyphs =
            interpolate_glyphs(location, &names, masters, None, options.round, &mut font);
        report.glyphs = font.len();
    }

    log::info!(
        "Generated instance {name}: {} glyphs, {} skipped",
        report.glyphs,
        report.failed_glyphs.len()
    );
    Ok(GeneratedInstance { font, report })
}

/// Generate every request in parallel. Requests are independent; a failure
/// affects only its own entry.
pub fn generate_instances(
    requests: &[InstanceRequest],
    masters: &[PlacedMaster<'_>],
    options: &GenerationOptions,
) -> Vec<Result<GeneratedInstance, InstanceError>> {
    requests
        .par_iter()
        .map(|request| generate_instance(&request.name, &request.location, masters, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use font_math::{Contour, Outline};

    fn location(h: f64) -> Location {
        Location::new().with("horizontal", h)
    }

    fn bar(width: f64, contours: usize) -> Outline {
        (0..contours).fold(Outline::new(width), |outline, i| {
            let x = i as f64 * 10.0;
            outline.with_contour(Contour::polygon(&[(x, 0.0), (x, 100.0), (x + width / 2.0, 0.0)]))
        })
    }

    fn font(style: &str, width: f64) -> MasterFont {
        let mut font = MasterFont::new("Demo", style)
            .with_glyph("a", Glyph::new(bar(width, 1)).with_unicode(0x61))
            .with_glyph("b", Glyph::new(bar(width, if style == "Bold" { 2 } else { 1 })))
            .with_glyph("c", Glyph::new(bar(width, 1)).with_unicode(0x63));
        font.kerning.insert("a", "b", -width / 10.0);
        font.groups.insert("public.kern1.a".into(), vec!["a".into()]);
        font.metrics.x_height = width;
        font
    }

    #[test]
    fn common_and_stray_glyphs() {
        let light = font("Light", 100.0);
        let bold = MasterFont::new("Demo", "Bold")
            .with_glyph("c", Glyph::default())
            .with_glyph("a", Glyph::default());

        let (common, stray) = common_glyphs(&[&light, &bold]);
        assert_eq!(common, vec!["a", "c"]);
        assert_eq!(stray, vec!["b"]);
        assert_eq!(common_glyphs(&[]), (Vec::new(), Vec::new()));
    }

    #[test]
    fn unicode_kept_only_when_masters_agree() {
        let light = font("Light", 100.0);
        let mut bold = font("Regular", 300.0);
        bold.glyphs["c"].unicode = Some(0x43);
        let masters = [(location(0.0), &light), (location(100.0), &bold)];

        let a = interpolate_glyph(&masters, "a", &location(50.0)).unwrap();
        assert_eq!(a.unicode, Some(0x61));
        assert_eq!(a.outline.width, 200.0);

        let c = interpolate_glyph(&masters, "c", &location(50.0)).unwrap();
        assert_eq!(c.unicode, None);
    }

    #[test]
    fn missing_glyph_is_an_error() {
        let light = font("Light", 100.0);
        let empty = MasterFont::new("Demo", "Empty");
        let masters = [(location(0.0), &light), (location(100.0), &empty)];

        assert_eq!(
            interpolate_glyph(&masters, "a", &location(50.0)).unwrap_err(),
            InstanceError::MissingGlyph { glyph: "a".into(), font: "Demo Empty".into() }
        );
    }

    #[test]
    fn glyph_set_skips_incompatible_glyphs() {
        let light = font("Light", 100.0);
        let bold = font("Bold", 300.0);
        let masters = [(location(0.0), &light), (location(100.0), &bold)];
        let names: Vec<String> = ["a", "b", "c"].map(String::from).to_vec();

        let mut target = MasterFont::new("Demo", "Target");
        let failed =
            interpolate_glyph_set(&location(25.0), &names, &masters, &mut target, Some(".alt"));

        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, "b");
        assert!(matches!(failed[0].1, InstanceError::Build(_)));
        assert_eq!(target.glyph_order().collect::<Vec<_>>(), vec!["a.alt", "c.alt"]);
        assert_eq!(target.glyph("a.alt").map(|g| g.outline.width), Some(150.0));
    }

    #[test]
    fn instance_font_is_assembled_from_the_source() {
        let light = font("Light", 100.0);
        let bold = font("Bold", 300.0);
        let masters = [(location(0.0), &light), (location(100.0), &bold)];

        let options = GenerationOptions::default();
        let instance = generate_instance("B1", &location(50.0), &masters, &options).unwrap();
        let font = &instance.font;
        assert_eq!(font.name(), "Demo B1");
        assert_eq!(font.glyph_order().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(font.kerning.get("a", "b"), -20.0);
        assert_eq!(font.metrics.x_height, 200.0);
        assert_eq!(font.groups.len(), 1);

        let report = &instance.report;
        assert_eq!(report.kerning, Outcome::Done);
        assert_eq!(report.glyphs, 2);
        assert_eq!(report.failed_glyphs.len(), 1);
        assert!(report.to_string().starts_with("*** Generating instance B1 ***"));
    }

    #[test]
    fn kerning_is_rounded_on_request() {
        let light = font("Light", 100.0);
        let bold = font("Bold", 300.0);
        let masters = [(location(0.0), &light), (location(100.0), &bold)];

        let rounded =
            generate_instance("A1", &location(33.0), &masters, &GenerationOptions::default())
                .unwrap();
        assert_eq!(rounded.font.kerning.get("a", "b"), -17.0);

        let options = GenerationOptions { round: false, ..Default::default() };
        let exact = generate_instance("A1", &location(33.0), &masters, &options).unwrap();
        assert!((exact.font.kerning.get("a", "b") + 16.6).abs() < 1e-9);
        assert_eq!(exact.report.metrics, Outcome::Done);
    }

    #[test]
    fn groups_need_kerning() {
        let light = font("Light", 100.0);
        let bold = font("Bold", 300.0);
        let masters = [(location(0.0), &light), (location(100.0), &bold)];
        let options = GenerationOptions { kerning: false, glyphs: false, ..Default::default() };

        let instance = generate_instance("C1", &location(100.0), &masters, &options).unwrap();
        assert!(instance.font.groups.is_empty());
        assert_eq!(instance.report.groups, Outcome::Skipped);
        assert!(instance.font.is_empty());
    }

    #[test]
    fn batch_generation_keeps_request_order() {
        let light = font("Light", 100.0);
        let bold = font("Bold", 300.0);
        let masters = [(location(0.0), &light), (location(100.0), &bold)];
        let requests = [
            InstanceRequest::new("A1", location(0.0)),
            InstanceRequest::new("B1", location(50.0)),
            InstanceRequest::new("C1", location(200.0)),
        ];

        let results = generate_instances(&requests, &masters, &GenerationOptions::default());
        let widths: Vec<f64> = results
            .iter()
            .map(|r| r.as_ref().unwrap().font.glyph("a").unwrap().outline.width)
            .collect();
        assert_eq!(widths, vec![100.0, 200.0, 500.0]);
    }

    #[test]
    fn instance_paths() {
        let font = MasterFont::new("Demo", "B2");
        assert_eq!(
            instance_path(Path::new("/fonts"), &font),
            PathBuf::from("/fonts/matrix-instances/Demo-B2.ufo")
        );
        let unnamed = MasterFont { style_name: Some("A1".into()), ..Default::default() };
        assert_eq!(
            instance_path(Path::new("fonts"), &unnamed),
            PathBuf::from("fonts/matrix-instances/Unnamed-A1.ufo")
        );
    }

    #[test]
    fn no_masters_or_bad_source() {
        let options = GenerationOptions { source: 3, ..Default::default() };
        let light = font("Light", 100.0);

        assert!(matches!(
            generate_instance("A1", &location(0.0), &[], &options),
            Err(InstanceError::NoMasters)
        ));
        assert!(matches!(
            generate_instance("A1", &location(0.0), &[(location(0.0), &light)], &options),
            Err(InstanceError::NoSourceFont(3))
        ));
    }
}
