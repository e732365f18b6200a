use crate::colorobj::{
    color_face_to_vis_set, color_room_to_vis_set, ColorFace, ColorObjOptions, ColorRoom,
};
use crate::label::Placement;
use crate::wireframe::{
    append_face_tree, append_shades, append_wireframe, WireframeOptions, SECONDARY_WEIGHT,
    WIREFRAME_ID,
};
use hbvis_core::error::Result;
use hbvis_core::model::{Aperture, ColorBy, Door, FaceObject, Model, Shade};
use hbvis_core::vis::{
    ContextGeometry, DisplayFace3D, DisplayMode, LegendParameters, VisualizationSet,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct ModelVisOptions {
    /// Palette for the model surfaces. `None` draws no surfaces.
    pub color_by: Option<ColorBy>,
    pub include_wireframe: bool,
    /// Dotted room attribute paths, one layer each.
    pub room_attrs: Vec<String>,
    /// Dotted face attribute paths, one layer each.
    pub face_attrs: Vec<String>,
    pub text_labels: bool,
    pub legend: LegendParameters,
    pub placement: Placement,
    pub wireframe: WireframeOptions,
}

impl Default for ModelVisOptions {
    fn default() -> Self {
        Self {
            color_by: Some(ColorBy::Type),
            include_wireframe: true,
            room_attrs: Vec::new(),
            face_attrs: Vec::new(),
            text_labels: false,
            legend: LegendParameters::default(),
            placement: Placement::default(),
            wireframe: WireframeOptions::default(),
        }
    }
}

/// Translates a whole model. Layers are added in a fixed order: colored
/// surfaces by category, room attributes, face attributes, wireframe.
pub fn model_to_vis_set(model: &Model, opts: &ModelVisOptions) -> Result<VisualizationSet> {
    let mut vis_set = VisualizationSet::new(&model.identifier);
    vis_set.display_name = Some(model.display_name().to_string());

    if let Some(color_by) = opts.color_by {
        for con_geo in colored_geometry(model, color_by) {
            vis_set.add_context(con_geo);
        }
    }

    let layer_opts = ColorObjOptions {
        include_wireframe: false,
        text_labels: opts.text_labels,
        placement: opts.placement,
        wireframe: opts.wireframe,
    };
    for attr in &opts.room_attrs {
        let color_room = ColorRoom::new(&model.rooms, attr, Some(opts.legend.clone()))?;
        vis_set
            .geometry
            .extend(color_room_to_vis_set(&color_room, &layer_opts)?.geometry);
    }
    if !opts.face_attrs.is_empty() {
        let flat_faces = FaceObject::flatten(model.faces());
        for attr in &opts.face_attrs {
            let color_face = ColorFace::new(flat_faces.clone(), attr, Some(opts.legend.clone()))?;
            vis_set
                .geometry
                .extend(color_face_to_vis_set(&color_face, &layer_opts)?.geometry);
        }
    }

    if opts.include_wireframe {
        vis_set.add_context(model_wireframe(model, &opts.wireframe)?);
    }
    info!(
        model = %model.identifier,
        rooms = model.rooms.len(),
        layers = vis_set.geometry.len(),
        "translated model"
    );
    Ok(vis_set)
}

/// One context layer per color category, in category name order.
fn colored_geometry(model: &Model, color_by: ColorBy) -> Vec<ContextGeometry> {
    let mode = DisplayMode::SurfaceWithEdges;
    let mut groups: BTreeMap<String, Vec<DisplayFace3D>> = BTreeMap::new();
    let mut shades: Vec<DisplayFace3D> = Vec::new();

    for face in model.faces() {
        let key = match color_by {
            ColorBy::Type => face.face_type.to_string(),
            ColorBy::BoundaryCondition => face.boundary_condition.to_string(),
        };
        groups.entry(key).or_default().push(DisplayFace3D::new(
            face.punched_geometry(),
            color_by.color_of(face),
            mode,
        ));
        push_shade_faces(&face.shades, color_by, mode, &mut shades);
        for ap in &face.apertures {
            push_aperture(ap, color_by, mode, &mut groups, &mut shades);
        }
        for dr in &face.doors {
            push_door(dr, color_by, mode, &mut groups, &mut shades);
        }
    }
    for ap in &model.orphaned_apertures {
        push_aperture(ap, color_by, mode, &mut groups, &mut shades);
    }
    for dr in &model.orphaned_doors {
        push_door(dr, color_by, mode, &mut groups, &mut shades);
    }
    for room in &model.rooms {
        push_shade_faces(&room.shades, color_by, mode, &mut shades);
    }
    push_shade_faces(&model.orphaned_shades, color_by, mode, &mut shades);
    groups.entry("Shade".to_string()).or_default().extend(shades);

    groups
        .into_iter()
        .filter(|(_, geos)| !geos.is_empty())
        .map(|(key, geos)| ContextGeometry::new(&key, geos).with_display_name(&key))
        .collect()
}

fn push_aperture(
    ap: &Aperture,
    color_by: ColorBy,
    mode: DisplayMode,
    groups: &mut BTreeMap<String, Vec<DisplayFace3D>>,
    shades: &mut Vec<DisplayFace3D>,
) {
    let key = match color_by {
        ColorBy::Type => "Aperture".to_string(),
        ColorBy::BoundaryCondition => ap.boundary_condition.to_string(),
    };
    groups.entry(key).or_default().push(DisplayFace3D::new(
        ap.geometry.clone(),
        color_by.color_of(ap),
        mode,
    ));
    push_shade_faces(&ap.shades, color_by, mode, shades);
}

fn push_door(
    dr: &Door,
    color_by: ColorBy,
    mode: DisplayMode,
    groups: &mut BTreeMap<String, Vec<DisplayFace3D>>,
    shades: &mut Vec<DisplayFace3D>,
) {
    let key = match color_by {
        ColorBy::Type => "Door".to_string(),
        ColorBy::BoundaryCondition => dr.boundary_condition.to_string(),
    };
    groups.entry(key).or_default().push(DisplayFace3D::new(
        dr.geometry.clone(),
        color_by.color_of(dr),
        mode,
    ));
    push_shade_faces(&dr.shades, color_by, mode, shades);
}

fn push_shade_faces(
    shades: &[Shade],
    color_by: ColorBy,
    mode: DisplayMode,
    out: &mut Vec<DisplayFace3D>,
) {
    out.extend(
        shades
            .iter()
            .map(|s| DisplayFace3D::new(s.geometry.clone(), color_by.color_of(s), mode)),
    );
}

/// Wireframe of every room, orphaned object and shade in the model.
pub fn model_wireframe(model: &Model, opts: &WireframeOptions) -> Result<ContextGeometry> {
    let mut wireframe = Vec::new();
    for room in &model.rooms {
        for face in &room.faces {
            append_face_tree(face, opts, &mut wireframe)?;
        }
        append_shades(&room.shades, opts, &mut wireframe)?;
    }
    for face in &model.orphaned_faces {
        append_face_tree(face, opts, &mut wireframe)?;
    }
    for ap in &model.orphaned_apertures {
        append_wireframe(ap, SECONDARY_WEIGHT, opts, &mut wireframe)?;
    }
    for dr in &model.orphaned_doors {
        append_wireframe(dr, SECONDARY_WEIGHT, opts, &mut wireframe)?;
    }
    append_shades(&model.orphaned_shades, opts, &mut wireframe)?;
    debug!(segments = wireframe.len(), "model wireframe");
    Ok(ContextGeometry::new(WIREFRAME_ID, wireframe))
}
