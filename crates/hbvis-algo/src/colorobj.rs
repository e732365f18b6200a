use crate::label::{
    finish_labels, place_face_label, place_labels, place_room_label, LabelOptions, Placement,
};
use crate::wireframe::{face_wireframe, room_wireframe, WireframeOptions};
use hbvis_core::error::Result;
use hbvis_core::model::{Attributed, FaceObject, Room};
use hbvis_core::vis::{
    AnalysisGeometry, AnalysisShape, ContextGeometry, LegendParameters, VisualizationData,
    VisualizationSet,
};
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Attribute text of objects that do not define the attribute.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct ColorObjOptions {
    pub include_wireframe: bool,
    /// Express attributes as text labels instead of a colored overlay.
    pub text_labels: bool,
    pub placement: Placement,
    pub wireframe: WireframeOptions,
}

impl Default for ColorObjOptions {
    fn default() -> Self {
        Self {
            include_wireframe: true,
            text_labels: false,
            placement: Placement::default(),
            wireframe: WireframeOptions::default(),
        }
    }
}

/// Rooms paired with the text of one of their attributes.
#[derive(Debug, Clone)]
pub struct ColorRoom<'a> {
    pub rooms: &'a [Room],
    pub attr_name: String,
    pub attributes: Vec<String>,
    pub legend_parameters: LegendParameters,
}

impl<'a> ColorRoom<'a> {
    pub fn new(
        rooms: &'a [Room],
        attr_name: &str,
        legend_parameters: Option<LegendParameters>,
    ) -> Result<Self> {
        let attributes = rooms
            .iter()
            .map(|r| r.attribute(attr_name).map(|v| v.to_string()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rooms,
            attr_name: attr_name.to_string(),
            attributes,
            legend_parameters: legend_parameters.unwrap_or_default(),
        })
    }

    pub fn attr_name_end(&self) -> &str {
        attr_name_end(&self.attr_name)
    }

    pub fn attributes_unique(&self) -> Vec<String> {
        unique_sorted(&self.attributes)
    }
}

/// Faces, apertures and doors paired with the text of one of their attributes.
#[derive(Debug, Clone)]
pub struct ColorFace<'a> {
    pub flat_faces: Vec<FaceObject<'a>>,
    pub attr_name: String,
    pub attributes: Vec<String>,
    pub legend_parameters: LegendParameters,
}

impl<'a> ColorFace<'a> {
    pub fn new(
        flat_faces: Vec<FaceObject<'a>>,
        attr_name: &str,
        legend_parameters: Option<LegendParameters>,
    ) -> Result<Self> {
        let attributes = flat_faces
            .iter()
            .map(|f| f.attribute(attr_name).map(|v| v.to_string()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            flat_faces,
            attr_name: attr_name.to_string(),
            attributes,
            legend_parameters: legend_parameters.unwrap_or_default(),
        })
    }

    pub fn attr_name_end(&self) -> &str {
        attr_name_end(&self.attr_name)
    }

    pub fn attributes_unique(&self) -> Vec<String> {
        unique_sorted(&self.attributes)
    }
}

pub fn color_room_to_vis_set(
    color_room: &ColorRoom<'_>,
    opts: &ColorObjOptions,
) -> Result<VisualizationSet> {
    let identifier = format!("Room_{}", color_room.attr_name);
    let display_name = format!("Room {}", title_case(color_room.attr_name_end()));
    let mut vis_set = VisualizationSet::new(&identifier);
    vis_set.display_name = Some(display_name.clone());

    if opts.text_labels {
        let label_opts = LabelOptions::from_legend(&color_room.legend_parameters, opts.placement);
        let items: Vec<(&Room, &String)> =
            color_room.rooms.iter().zip(&color_room.attributes).collect();
        let labels = place_labels(&items, |(room, value)| {
            place_room_label(value, &room.geometry(), &label_opts)
        })?;
        let labels = finish_labels(labels, opts.placement);
        debug!(labels = labels.len(), attr = %color_room.attr_name, "room labels");
        vis_set.add_context(
            ContextGeometry::new(&identifier, labels).with_display_name(&display_name),
        );
    } else {
        let data = ordinal_data(
            &color_room.attributes,
            &color_room.legend_parameters,
            color_room.attr_name_end(),
        );
        let geometry = color_room
            .rooms
            .iter()
            .map(|r| AnalysisShape::Polyface3D(r.geometry()))
            .collect();
        let mut a_geo = AnalysisGeometry::new(&identifier, geometry, vec![data])?;
        a_geo.display_name = Some(display_name);
        vis_set.add_analysis(a_geo);
    }

    if opts.include_wireframe {
        vis_set.add_context(room_wireframe(color_room.rooms, &opts.wireframe)?);
    }
    Ok(vis_set)
}

pub fn color_face_to_vis_set(
    color_face: &ColorFace<'_>,
    opts: &ColorObjOptions,
) -> Result<VisualizationSet> {
    let identifier = format!("Face_{}", color_face.attr_name);
    let display_name = format!("Face {}", title_case(color_face.attr_name_end()));
    let mut vis_set = VisualizationSet::new(&identifier);
    vis_set.display_name = Some(display_name.clone());

    if opts.text_labels {
        let label_opts = LabelOptions::from_legend(&color_face.legend_parameters, opts.placement);
        let items: Vec<(FaceObject<'_>, &String)> = color_face
            .flat_faces
            .iter()
            .copied()
            .zip(&color_face.attributes)
            .filter(|(_, value)| value.as_str() != NOT_AVAILABLE)
            .collect();
        let labels = place_labels(&items, |(obj, value)| {
            place_face_label(value, obj.geometry(), &label_opts)
        })?;
        let labels = finish_labels(labels, opts.placement);
        let skipped = color_face.attributes.len() - labels.len();
        if skipped > 0 {
            warn!(
                skipped,
                attr = %color_face.attr_name,
                "faces without the attribute are not labeled"
            );
        }
        debug!(labels = labels.len(), attr = %color_face.attr_name, "face labels");
        vis_set.add_context(
            ContextGeometry::new(&identifier, labels).with_display_name(&display_name),
        );
    } else {
        let data = ordinal_data(
            &color_face.attributes,
            &color_face.legend_parameters,
            color_face.attr_name_end(),
        );
        let geometry = color_face
            .flat_faces
            .iter()
            .map(|f| AnalysisShape::Face3D(f.display_geometry().into_owned()))
            .collect();
        let mut a_geo = AnalysisGeometry::new(&identifier, geometry, vec![data])?;
        a_geo.display_name = Some(display_name);
        vis_set.add_analysis(a_geo);
    }

    if opts.include_wireframe {
        vis_set.add_context(face_wireframe(&color_face.flat_faces, &opts.wireframe)?);
    }
    Ok(vis_set)
}

/// Maps each attribute text to its index among the sorted unique texts and
/// records that mapping as the legend's ordinal dictionary.
fn ordinal_data(
    attributes: &[String],
    legend: &LegendParameters,
    attr_end: &str,
) -> VisualizationData {
    let unique = unique_sorted(attributes);
    let index: HashMap<&str, usize> = unique
        .iter()
        .enumerate()
        .map(|(i, v)| (v.as_str(), i))
        .collect();
    let values = attributes
        .iter()
        .map(|a| index[a.as_str()] as f64)
        .collect();

    let mut l_par = legend.clone();
    l_par.segment_count = Some(unique.len());
    l_par.ordinal_dictionary = Some(unique.into_iter().enumerate().collect::<BTreeMap<_, _>>());
    if l_par.is_title_default() {
        l_par.title = Some(title_case(attr_end));
    }
    VisualizationData::new(values, l_par)
}

fn unique_sorted(values: &[String]) -> Vec<String> {
    values.iter().cloned().sorted().dedup().collect()
}

pub(crate) fn attr_name_end(attr_name: &str) -> &str {
    attr_name.rsplit('.').next().unwrap_or(attr_name)
}

/// `program_type` -> `Program Type`.
pub(crate) fn title_case(name: &str) -> String {
    name.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .join(" ")
}
