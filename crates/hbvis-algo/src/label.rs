//! Text labels anchored to rooms and faces.

use hbvis_core::error::{DisplayError, Result};
use hbvis_core::geom::{BBox3, Face3D, Plane, Polyface3D, Vec3};
use hbvis_core::vis::{DisplayText3D, LegendParameters, DEFAULT_FONT};
use rayon::prelude::*;
use serde::Deserialize;
use std::f64::consts::PI;

/// Strings shorter than this are sized as if they had this many characters.
const MIN_TEXT_LEN: usize = 10;
/// Rough advance width of one character, in text heights.
const CHAR_WIDTH: f64 = 0.6;
const MAX_NUDGES: usize = 64;
const COPLANAR_TOL: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Offset each face label by one text height along a fixed in-plane
    /// direction. Adjacent labels may still collide.
    #[default]
    Heuristic,
    /// Heuristic placement, then labels that still overlap a previously
    /// placed coplanar label are pushed along their Y axis until clear.
    AvoidOverlap,
}

/// Anchor orientation of a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Horizontal plane facing world up; used for room labels.
    Vertical,
    /// Flush with a face of the given normal.
    Normal(Vec3),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelOptions {
    /// Explicit text height. `None` derives it from the geometry extent.
    pub text_height: Option<f64>,
    pub font: String,
    pub placement: Placement,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            text_height: None,
            font: DEFAULT_FONT.to_string(),
            placement: Placement::default(),
        }
    }
}

impl LabelOptions {
    pub fn from_legend(legend: &LegendParameters, placement: Placement) -> Self {
        Self {
            text_height: legend.text_height,
            font: legend.font.clone(),
            placement,
        }
    }
}

pub fn place_room_label(
    value: &str,
    room: &Polyface3D,
    opts: &LabelOptions,
) -> Result<DisplayText3D> {
    place_label(value, room.bbox(), Orientation::Vertical, opts)
}

pub fn place_face_label(value: &str, face: &Face3D, opts: &LabelOptions) -> Result<DisplayText3D> {
    place_label(value, face.bbox(), Orientation::Normal(face.normal()?), opts)
}

/// Places a centered label on the center of `bbox`.
///
/// Room labels lie in the horizontal plane through the center and are sized
/// from the X extent. Face labels lie on the face plane, are flipped so their
/// Y axis never points down, are sized from the larger of the X and Y
/// extents at half the room density, and are shifted one text height along
/// the plane Y axis.
pub fn place_label(
    value: &str,
    bbox: BBox3,
    orientation: Orientation,
    opts: &LabelOptions,
) -> Result<DisplayText3D> {
    if bbox.is_empty() {
        return Err(DisplayError::InvalidGeometry(
            "cannot label empty geometry".to_string(),
        ));
    }
    let explicit = explicit_height(opts.text_height)?;
    let origin = bbox.center();

    let (plane, height) = match orientation {
        Orientation::Vertical => {
            let plane = Plane::new(Vec3::Z, origin)?;
            let height = match explicit {
                Some(h) => h,
                None => auto_height(bbox.width(), value, 1.0)?,
            };
            (plane, height)
        }
        Orientation::Normal(normal) => {
            let mut plane = Plane::new(normal, origin)?;
            if plane.is_upside_down() {
                plane = plane.rotate(plane.n, PI, plane.o);
            }
            let height = match explicit {
                Some(h) => h,
                None => auto_height(bbox.width().max(bbox.depth()), value, 2.0)?,
            };
            let shift = offset_direction(normal, &plane) * height;
            (plane.move_by(shift), height)
        }
    };

    Ok(DisplayText3D::centered(
        value.to_string(),
        plane,
        height,
        &opts.font,
    ))
}

fn explicit_height(text_height: Option<f64>) -> Result<Option<f64>> {
    match text_height {
        Some(h) if !(h.is_finite() && h > 0.0) => Err(DisplayError::InvalidConfiguration(
            format!("text height must be positive, got {h}"),
        )),
        other => Ok(other),
    }
}

/// `extent / (max(len, 10) * density)`.
pub fn auto_height(extent: f64, value: &str, density: f64) -> Result<f64> {
    if !(extent.is_finite() && extent > 0.0) {
        return Err(DisplayError::InvalidGeometry(format!(
            "cannot size text for geometry with extent {extent}"
        )));
    }
    let len = value.chars().count().max(MIN_TEXT_LEN);
    Ok(extent / (len as f64 * density))
}

/// Face labels shift toward −Y when the normal points +X and toward +Y when
/// it points −X. Normals with x == 0 shift toward −Y only when facing down.
fn offset_direction(normal: Vec3, plane: &Plane) -> Vec3 {
    let n = normal.normalize().unwrap_or(plane.n);
    if n.x != 0.0 {
        if n.x > 0.0 {
            -plane.y
        } else {
            plane.y
        }
    } else if n.z < 0.0 {
        -plane.y
    } else {
        plane.y
    }
}

/// Pushes labels apart so that no label overlaps an earlier coplanar one.
///
/// Labels are visited in order; an overlapping label moves along its own Y
/// axis in steps of its text height. Earlier labels never move.
pub fn separate_overlaps(labels: &mut [DisplayText3D]) {
    for i in 1..labels.len() {
        let (placed, rest) = labels.split_at_mut(i);
        let current = &mut rest[0];
        for _ in 0..MAX_NUDGES {
            if !placed.iter().any(|other| overlaps(other, current)) {
                break;
            }
            current.plane = current.plane.move_by(current.plane.y * current.height);
        }
    }
}

fn overlaps(a: &DisplayText3D, b: &DisplayText3D) -> bool {
    let (pa, pb) = (&a.plane, &b.plane);
    if pa.n.dot(pb.n) < 1.0 - COPLANAR_TOL {
        return false;
    }
    let d = pb.o - pa.o;
    if d.dot(pa.n).abs() > COPLANAR_TOL {
        return false;
    }
    let half_w = (text_width(a) + text_width(b)) * 0.5;
    let half_h = (a.height + b.height) * 0.5;
    d.dot(pa.x).abs() < half_w && d.dot(pa.y).abs() < half_h
}

fn text_width(label: &DisplayText3D) -> f64 {
    label.text.chars().count() as f64 * label.height * CHAR_WIDTH
}

/// Places one label per item in parallel. Labels keep the input order and a
/// failure reports the earliest failing item.
pub fn place_labels<T, F>(items: &[T], place: F) -> Result<Vec<DisplayText3D>>
where
    T: Sync,
    F: Fn(&T) -> Result<DisplayText3D> + Sync + Send,
{
    let placed: Vec<Result<DisplayText3D>> = items.par_iter().map(place).collect();
    placed.into_iter().collect()
}

/// Applies the batch step of `placement` to labels placed one by one.
pub fn finish_labels(mut labels: Vec<DisplayText3D>, placement: Placement) -> Vec<DisplayText3D> {
    if placement == Placement::AvoidOverlap {
        separate_overlaps(&mut labels);
    }
    labels
}
