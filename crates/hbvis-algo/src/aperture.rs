use crate::face::add_display_shades;
use crate::wireframe::{push_face3d, WireframeOptions, SECONDARY_WEIGHT, WIREFRAME_ID};
use hbvis_core::error::Result;
use hbvis_core::model::{Aperture, Color, ColorBy};
use hbvis_core::vis::{ContextGeometry, DisplayFace3D, DisplayMode, VisualizationSet};

pub fn aperture_to_vis_set(aperture: &Aperture, color_by: ColorBy) -> VisualizationSet {
    let mode = DisplayMode::SurfaceWithEdges;
    let mut dis_geos = vec![DisplayFace3D::new(
        aperture.geometry.clone(),
        color_by.color_of(aperture),
        mode,
    )];
    add_display_shades(aperture, color_by, mode, &mut dis_geos);

    let name = display_name(aperture);
    let mut vis_set = VisualizationSet::new(&aperture.identifier);
    vis_set.display_name = Some(name.to_string());
    vis_set.add_context(
        ContextGeometry::new(&aperture.identifier, dis_geos).with_display_name(name),
    );
    vis_set
}

/// Wireframe of an aperture and optionally its shades, all at the same
/// weight. Lines are black unless `color` is given.
pub fn aperture_to_vis_set_wireframe(
    aperture: &Aperture,
    include_shades: bool,
    color: Option<Color>,
    opts: &WireframeOptions,
) -> Result<VisualizationSet> {
    let mut wireframe = Vec::new();
    push_face3d(&aperture.geometry, SECONDARY_WEIGHT, opts.hole_mode, &mut wireframe)?;
    if include_shades {
        for shd in &aperture.shades {
            push_face3d(&shd.geometry, SECONDARY_WEIGHT, opts.hole_mode, &mut wireframe)?;
        }
    }
    let wireframe: Vec<_> = wireframe.into_iter().map(|s| s.with_color(color)).collect();

    let mut vis_set = VisualizationSet::new(&aperture.identifier);
    vis_set.display_name = Some(display_name(aperture).to_string());
    vis_set.add_context(ContextGeometry::new(WIREFRAME_ID, wireframe));
    Ok(vis_set)
}

fn display_name(aperture: &Aperture) -> &str {
    aperture.display_name.as_deref().unwrap_or(&aperture.identifier)
}
