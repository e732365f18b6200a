use hbvis_core::error::{DisplayError, Result};
use hbvis_core::geom::{Face3D, LineSegment3D};
use hbvis_core::model::{Face, FaceObject, Room, Shade, ShadedGeometry};
use hbvis_core::vis::{ContextGeometry, DisplayLineSegment3D};
use serde::Deserialize;
use tracing::debug;

pub const WIREFRAME_ID: &str = "Wireframe";

/// Line weight of room faces and other primary surfaces.
pub const PRIMARY_WEIGHT: f64 = 2.0;
/// Line weight of apertures, doors and every shade.
pub const SECONDARY_WEIGHT: f64 = 1.0;

/// How rings cut out of a face are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleMode {
    /// The boundary once, then every hole ring once.
    #[default]
    Corrected,
    /// The boundary once, then the boundary again for every hole. Hole rings
    /// are never drawn. Matches the output of older exporters.
    Compat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WireframeOptions {
    pub hole_mode: HoleMode,
    /// Levels of nested shades to follow. 1 draws only the shades attached
    /// directly to the object.
    pub shade_depth: usize,
}

impl Default for WireframeOptions {
    fn default() -> Self {
        Self {
            hole_mode: HoleMode::default(),
            shade_depth: 1,
        }
    }
}

/// Wireframe of an object and its shades.
///
/// Segments of the object itself carry `primary_weight`; segments of any
/// shade carry [`SECONDARY_WEIGHT`]. Output order is the object boundary,
/// its holes, then shades in list order (depth first).
pub fn extract_wireframe<T: ShadedGeometry + ?Sized>(
    obj: &T,
    primary_weight: f64,
    opts: &WireframeOptions,
) -> Result<Vec<DisplayLineSegment3D>> {
    let mut out = Vec::new();
    append_wireframe(obj, primary_weight, opts, &mut out)?;
    Ok(out)
}

pub fn append_wireframe<T: ShadedGeometry + ?Sized>(
    obj: &T,
    primary_weight: f64,
    opts: &WireframeOptions,
    out: &mut Vec<DisplayLineSegment3D>,
) -> Result<()> {
    check_weight(primary_weight)?;
    push_face3d(obj.geometry(), primary_weight, opts.hole_mode, out)?;
    push_shades(obj.shades(), opts, opts.shade_depth, out)
}

fn push_shades(
    shades: &[Shade],
    opts: &WireframeOptions,
    depth: usize,
    out: &mut Vec<DisplayLineSegment3D>,
) -> Result<()> {
    if depth == 0 {
        return Ok(());
    }
    for shade in shades {
        push_face3d(&shade.geometry, SECONDARY_WEIGHT, opts.hole_mode, out)?;
        push_shades(&shade.shades, opts, depth - 1, out)?;
    }
    Ok(())
}

/// Appends the segments of a single polygon, without any shades.
pub fn push_face3d(
    face: &Face3D,
    weight: f64,
    mode: HoleMode,
    out: &mut Vec<DisplayLineSegment3D>,
) -> Result<()> {
    face.validate()?;
    let boundary = face.boundary_segments();
    emit(&boundary, weight, out);
    match mode {
        HoleMode::Compat => {
            for _ in &face.holes {
                emit(&boundary, weight, out);
            }
        }
        HoleMode::Corrected => {
            for ring in face.hole_segments() {
                emit(&ring, weight, out);
            }
        }
    }
    Ok(())
}

fn emit(segs: &[LineSegment3D], weight: f64, out: &mut Vec<DisplayLineSegment3D>) {
    out.extend(segs.iter().map(|s| DisplayLineSegment3D::new(*s, weight)));
}

/// A face at [`PRIMARY_WEIGHT`], then each of its apertures and doors at
/// [`SECONDARY_WEIGHT`], every one followed by its shades.
pub fn append_face_tree(
    face: &Face,
    opts: &WireframeOptions,
    out: &mut Vec<DisplayLineSegment3D>,
) -> Result<()> {
    append_wireframe(face, PRIMARY_WEIGHT, opts, out)?;
    for ap in &face.apertures {
        append_wireframe(ap, SECONDARY_WEIGHT, opts, out)?;
    }
    for dr in &face.doors {
        append_wireframe(dr, SECONDARY_WEIGHT, opts, out)?;
    }
    Ok(())
}

/// Free-standing shades, such as those attached to a room or the model.
pub fn append_shades(
    shades: &[Shade],
    opts: &WireframeOptions,
    out: &mut Vec<DisplayLineSegment3D>,
) -> Result<()> {
    push_shades(shades, opts, opts.shade_depth, out)
}

/// Wireframe layer for a set of rooms.
pub fn room_wireframe(rooms: &[Room], opts: &WireframeOptions) -> Result<ContextGeometry> {
    let mut wireframe = Vec::new();
    for room in rooms {
        for face in &room.faces {
            append_face_tree(face, opts, &mut wireframe)?;
        }
        append_shades(&room.shades, opts, &mut wireframe)?;
    }
    debug!(rooms = rooms.len(), segments = wireframe.len(), "room wireframe");
    Ok(ContextGeometry::new(WIREFRAME_ID, wireframe))
}

/// Wireframe layer for a flat list of faces, apertures, doors and shades.
/// Attached shades are not followed.
pub fn face_wireframe(objs: &[FaceObject<'_>], opts: &WireframeOptions) -> Result<ContextGeometry> {
    let mut wireframe = Vec::new();
    for obj in objs {
        let weight = if obj.is_face() {
            PRIMARY_WEIGHT
        } else {
            SECONDARY_WEIGHT
        };
        push_face3d(obj.geometry(), weight, opts.hole_mode, &mut wireframe)?;
    }
    debug!(objects = objs.len(), segments = wireframe.len(), "face wireframe");
    Ok(ContextGeometry::new(WIREFRAME_ID, wireframe))
}

fn check_weight(weight: f64) -> Result<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(DisplayError::InvalidConfiguration(format!(
            "line weight must be positive, got {weight}"
        )))
    }
}
