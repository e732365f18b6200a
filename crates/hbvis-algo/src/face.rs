use hbvis_core::model::{ColorBy, Face, ShadedGeometry};
use hbvis_core::vis::{ContextGeometry, DisplayFace3D, DisplayMode, VisualizationSet};

/// A face, its apertures, doors and all of their shades as colored surfaces.
pub fn face_to_vis_set(face: &Face, color_by: ColorBy) -> VisualizationSet {
    let dis_geos = face_display_geometry(face, color_by, DisplayMode::SurfaceWithEdges);
    let con_geo =
        ContextGeometry::new(&face.identifier, dis_geos).with_display_name(display_name(face));
    let mut vis_set = VisualizationSet::new(&face.identifier);
    vis_set.display_name = Some(display_name(face).to_string());
    vis_set.add_context(con_geo);
    vis_set
}

/// The punched face first, then its shades, then each aperture and door
/// followed by its own shades.
pub fn face_display_geometry(
    face: &Face,
    color_by: ColorBy,
    mode: DisplayMode,
) -> Vec<DisplayFace3D> {
    let mut dis_geos = vec![DisplayFace3D::new(
        face.punched_geometry(),
        color_by.color_of(face),
        mode,
    )];
    add_display_shades(face, color_by, mode, &mut dis_geos);
    for ap in &face.apertures {
        dis_geos.push(DisplayFace3D::new(ap.geometry.clone(), color_by.color_of(ap), mode));
        add_display_shades(ap, color_by, mode, &mut dis_geos);
    }
    for dr in &face.doors {
        dis_geos.push(DisplayFace3D::new(dr.geometry.clone(), color_by.color_of(dr), mode));
        add_display_shades(dr, color_by, mode, &mut dis_geos);
    }
    dis_geos
}

pub(crate) fn add_display_shades<T: ShadedGeometry + ?Sized>(
    obj: &T,
    color_by: ColorBy,
    mode: DisplayMode,
    dis_geos: &mut Vec<DisplayFace3D>,
) {
    for shd in obj.shades() {
        dis_geos.push(DisplayFace3D::new(shd.geometry.clone(), color_by.color_of(shd), mode));
    }
}

fn display_name(face: &Face) -> &str {
    face.display_name.as_deref().unwrap_or(&face.identifier)
}
