//! Glyph outlines as interpolatable values.

use std::{
    collections::HashMap,
    f64::consts::{FRAC_PI_2, FRAC_PI_4},
    fmt::{self, Display, Formatter},
};

use font_mutator::{Discrepancy, Interpolate};
use kurbo::{Affine, Point};

/// Point types of a contour, as UFO names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointType {
    Move,
    Line,
    OffCurve,
    Curve,
    QCurve,
}

impl PointType {
    pub fn is_off_curve(self) -> bool {
        self == PointType::OffCurve
    }

    fn curve_kind(self) -> &'static str {
        if self.is_off_curve() { "off-curve" } else { "on-curve" }
    }
}

impl Display for PointType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            PointType::Move => "move",
            PointType::Line => "line",
            PointType::OffCurve => "offcurve",
            PointType::Curve => "curve",
            PointType::QCurve => "qcurve",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourPoint {
    pub point: Point,
    pub typ: PointType,
    pub smooth: bool,
}

impl ContourPoint {
    pub fn new(x: f64, y: f64, typ: PointType) -> Self {
        Self { point: Point::new(x, y), typ, smooth: false }
    }

    pub fn smooth(mut self) -> Self {
        self.smooth = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
}

impl Contour {
    pub fn new(points: Vec<ContourPoint>) -> Self {
        Self { points }
    }

    /// A closed polygon of line points.
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| ContourPoint::new(x, y, PointType::Line)).collect())
    }
}

/// A reference to another glyph, placed with an affine transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub base: String,
    pub transform: Affine,
}

impl Component {
    pub fn new(base: impl Into<String>, transform: Affine) -> Self {
        Self { base: base.into(), transform }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub name: String,
    pub position: Point,
}

impl Anchor {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self { name: name.into(), position: Point::new(x, y) }
    }
}

/// Advance width, contours, components and anchors of one glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub width: f64,
    pub contours: Vec<Contour>,
    pub components: Vec<Component>,
    pub anchors: Vec<Anchor>,
}

impl Outline {
    pub fn new(width: f64) -> Self {
        Self { width, ..Default::default() }
    }

    pub fn with_contour(mut self, contour: Contour) -> Self {
        self.contours.push(contour);
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchors.push(anchor);
        self
    }

    pub fn point_count(&self) -> usize {
        self.contours.iter().map(|c| c.points.len()).sum()
    }

    /// Round the width, points, anchors and component offsets to integers.
    /// Component scale and skew are left as they are.
    pub fn rounded(&self) -> Self {
        let round = |p: Point| Point::new(p.x.round(), p.y.round());
        let mut outline = self.clone();
        outline.width = outline.width.round();
        for point in outline.contours.iter_mut().flat_map(|c| c.points.iter_mut()) {
            point.point = round(point.point);
        }
        for component in &mut outline.components {
            let [xx, yx, xy, yy, dx, dy] = component.transform.as_coeffs();
            component.transform = Affine::new([xx, yx, xy, yy, dx.round(), dy.round()]);
        }
        for anchor in &mut outline.anchors {
            anchor.position = round(anchor.position);
        }
        outline
    }

    /// The placeholder shown where an interpolation could not be made: a
    /// 500-unit-wide glyph holding a twelve-sided cross.
    pub fn error_placeholder() -> Self {
        const SIDE: f64 = 50.0;

        let mut current = Point::new(220.0, 150.0);
        let mut angle = FRAC_PI_4;
        let mut points = vec![ContourPoint::new(current.x, current.y, PointType::Line)];
        // The twelfth side closes the contour.
        for i in 0..11 {
            current = Point::new(current.x + SIDE * angle.cos(), current.y + SIDE * angle.sin());
            points.push(ContourPoint::new(current.x, current.y, PointType::Line));
            if i % 3 == 0 {
                angle -= FRAC_PI_2;
            } else {
                angle += FRAC_PI_2;
            }
        }

        Self::new(500.0).with_contour(Contour::new(points))
    }

    /// Apply `f` coordinate-wise to `self` and `other`. Components and anchors
    /// are paired by name; an unpaired one is combined with zero.
    fn combine(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let point = |a: Point, b: Point| Point::new(f(a.x, b.x), f(a.y, b.y));

        let contours = self
            .contours
            .iter()
            .zip(&other.contours)
            .map(|(ours, theirs)| Contour {
                points: ours
                    .points
                    .iter()
                    .zip(&theirs.points)
                    .map(|(p, q)| ContourPoint { point: point(p.point, q.point), ..*p })
                    .collect(),
            })
            .collect();

        let components = pair_by_name(&self.components, &other.components, |c| &c.base)
            .into_iter()
            .map(|(ours, theirs)| {
                let a = ours.transform.as_coeffs();
                let b = theirs.map_or([0.0; 6], |c| c.transform.as_coeffs());
                let mut coeffs = [0.0; 6];
                for (i, coeff) in coeffs.iter_mut().enumerate() {
                    *coeff = f(a[i], b[i]);
                }
                Component::new(ours.base.clone(), Affine::new(coeffs))
            })
            .collect();

        let anchors = pair_by_name(&self.anchors, &other.anchors, |a| &a.name)
            .into_iter()
            .map(|(ours, theirs)| Anchor {
                name: ours.name.clone(),
                position: point(ours.position, theirs.map_or(Point::ZERO, |a| a.position)),
            })
            .collect();

        Self { width: f(self.width, other.width), contours, components, anchors }
    }
}

/// Pair each item of `ours` with the item of `theirs` that has the same name
/// and the same occurrence number for that name.
fn pair_by_name<'a, T>(
    ours: &'a [T],
    theirs: &'a [T],
    name: impl Fn(&T) -> &String,
) -> Vec<(&'a T, Option<&'a T>)> {
    let mut occurrences: HashMap<&String, usize> = HashMap::new();
    ours.iter()
        .map(|item| {
            let key = name(item);
            let seen = occurrences.entry(key).or_default();
            let partner = theirs.iter().filter(|other| name(*other) == key).nth(*seen);
            *seen += 1;
            (item, partner)
        })
        .collect()
}

fn sorted_names<T>(items: &[T], name: impl Fn(&T) -> &String) -> Vec<&str> {
    let mut names: Vec<&str> = items.iter().map(|item| name(item).as_str()).collect();
    names.sort_unstable();
    names
}

fn check_contour(index: usize, ours: &Contour, theirs: &Contour) -> Vec<Discrepancy> {
    if ours.points.len() != theirs.points.len() {
        return vec![
            Discrepancy::new(
                "contours",
                format!(
                    "point count should be {}, found {}",
                    ours.points.len(),
                    theirs.points.len()
                ),
            )
            .at(format!("contour {index}")),
        ];
    }

    ours.points
        .iter()
        .zip(&theirs.points)
        .enumerate()
        .filter(|(_, (left, right))| left.typ.is_off_curve() != right.typ.is_off_curve())
        .map(|(ix, (left, right))| {
            Discrepancy::new(
                "contours",
                format!(
                    "point should be {}, found {}",
                    left.typ.curve_kind(),
                    right.typ.curve_kind()
                ),
            )
            .at(format!("contour {index}, point {ix}"))
        })
        .collect()
}

fn check_components(ours: &[Component], theirs: &[Component]) -> Vec<Discrepancy> {
    if ours.len() != theirs.len() {
        return vec![Discrepancy::new(
            "components",
            format!("component count should be {}, found {}", ours.len(), theirs.len()),
        )];
    }

    let (ours, theirs) = (sorted_names(ours, |c| &c.base), sorted_names(theirs, |c| &c.base));
    if ours == theirs {
        Vec::new()
    } else {
        vec![Discrepancy::new(
            "components",
            format!("components should be {}, found {}", ours.join(", "), theirs.join(", ")),
        )]
    }
}

fn check_anchors(ours: &[Anchor], theirs: &[Anchor]) -> Vec<Discrepancy> {
    let (ours, theirs) = (sorted_names(ours, |a| &a.name), sorted_names(theirs, |a| &a.name));

    let mut problems: Vec<Discrepancy> = ours
        .iter()
        .filter(|name| !theirs.contains(*name))
        .map(|name| Discrepancy::new("anchors", format!("anchor {name} missing")))
        .collect();
    problems.extend(
        theirs
            .iter()
            .filter(|name| !ours.contains(*name))
            .map(|name| Discrepancy::new("anchors", format!("anchor {name} not in reference"))),
    );
    if problems.is_empty() && ours != theirs {
        problems.push(Discrepancy::new(
            "anchors",
            format!("anchor count should be {}, found {}", ours.len(), theirs.len()),
        ));
    }
    problems
}

impl Interpolate for Outline {
    fn add(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a + b)
    }

    fn sub(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a - b)
    }

    fn scale(&self, factor: f64) -> Self {
        self.combine(self, |a, _| a * factor)
    }

    fn compatibility(&self, other: &Self) -> Vec<Discrepancy> {
        let mut problems = Vec::new();
        if self.contours.len() != other.contours.len() {
            problems.push(Discrepancy::new(
                "contours",
                format!(
                    "path count should be {}, found {}",
                    self.contours.len(),
                    other.contours.len()
                ),
            ));
        } else {
            for (index, (ours, theirs)) in self.contours.iter().zip(&other.contours).enumerate() {
                problems.extend(check_contour(index, ours, theirs));
            }
        }
        problems.extend(check_components(&self.components, &other.components));
        problems.extend(check_anchors(&self.anchors, &other.anchors));
        problems
    }
}
