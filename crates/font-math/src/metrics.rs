//! Font-wide vertical metrics and hinting zones.

use font_mutator::{Discrepancy, Interpolate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: f64,
    pub ascender: f64,
    pub descender: f64,
    pub x_height: f64,
    pub cap_height: f64,
    pub italic_angle: f64,
    pub underline_position: f64,
    pub underline_thickness: f64,
    pub blue_values: Vec<f64>,
    pub other_blues: Vec<f64>,
    pub stem_snap_h: Vec<f64>,
    pub stem_snap_v: Vec<f64>,
}

impl FontMetrics {
    fn scalars_mut(&mut self) -> [&mut f64; 8] {
        [
            &mut self.units_per_em,
            &mut self.ascender,
            &mut self.descender,
            &mut self.x_height,
            &mut self.cap_height,
            &mut self.italic_angle,
            &mut self.underline_position,
            &mut self.underline_thickness,
        ]
    }

    fn scalars(&self) -> [f64; 8] {
        [
            self.units_per_em,
            self.ascender,
            self.descender,
            self.x_height,
            self.cap_height,
            self.italic_angle,
            self.underline_position,
            self.underline_thickness,
        ]
    }

    fn lists(&self) -> [(&'static str, &Vec<f64>); 4] {
        [
            ("blue values", &self.blue_values),
            ("other blues", &self.other_blues),
            ("horizontal stem snaps", &self.stem_snap_h),
            ("vertical stem snaps", &self.stem_snap_v),
        ]
    }

    fn lists_mut(&mut self) -> [&mut Vec<f64>; 4] {
        [&mut self.blue_values, &mut self.other_blues, &mut self.stem_snap_h, &mut self.stem_snap_v]
    }

    fn combine(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut result = self.clone();
        for (value, theirs) in result.scalars_mut().into_iter().zip(other.scalars()) {
            *value = f(*value, theirs);
        }
        for (list, (_, theirs)) in result.lists_mut().into_iter().zip(other.lists()) {
            for (value, their) in list.iter_mut().zip(theirs) {
                *value = f(*value, *their);
            }
        }
        result
    }
}

impl Interpolate for FontMetrics {
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
        self.lists()
            .into_iter()
            .zip(other.lists())
            .filter(|((_, ours), (_, theirs))| ours.len() != theirs.len())
            .map(|((name, ours), (_, theirs))| {
                Discrepancy::new(
                    "metrics",
                    format!("{name} count should be {}, found {}", ours.len(), theirs.len()),
                )
            })
            .collect()
    }
}
