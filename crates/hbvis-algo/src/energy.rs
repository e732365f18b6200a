//! Rooms and faces colored by numeric results rather than attribute text.

use crate::colorobj::ColorObjOptions;
use crate::label::{finish_labels, place_face_label, place_labels, place_room_label, LabelOptions};
use crate::wireframe::{append_face_tree, room_wireframe, WIREFRAME_ID};
use hbvis_core::error::{DisplayError, Result};
use hbvis_core::model::{AttrValue, Attributed, Face, FaceObject, Room};
use hbvis_core::vis::{
    AnalysisGeometry, AnalysisShape, ContextGeometry, LegendParameters, VisualizationData,
    VisualizationSet,
};
use tracing::{debug, warn};

/// Rooms with one numeric value each; rooms without a value are drawn in
/// the wireframe only.
#[derive(Debug, Clone)]
pub struct ValueColorRoom<'a> {
    pub rooms: &'a [Room],
    pub values: Vec<Option<f64>>,
    pub data_type_text: String,
    pub unit: String,
    pub legend_parameters: LegendParameters,
}

impl<'a> ValueColorRoom<'a> {
    pub fn new(
        rooms: &'a [Room],
        values: Vec<Option<f64>>,
        data_type_text: &str,
        unit: &str,
        legend_parameters: Option<LegendParameters>,
    ) -> Result<Self> {
        check_aligned(rooms.len(), values.len())?;
        Ok(Self {
            rooms,
            values,
            data_type_text: data_type_text.to_string(),
            unit: unit.to_string(),
            legend_parameters: legend_parameters.unwrap_or_default(),
        })
    }

    /// Reads the values from a numeric attribute of every room.
    pub fn from_attribute(
        rooms: &'a [Room],
        attr_name: &str,
        data_type_text: &str,
        unit: &str,
        legend_parameters: Option<LegendParameters>,
    ) -> Result<Self> {
        let values = rooms
            .iter()
            .map(|r| numeric(r, attr_name))
            .collect::<Result<Vec<_>>>()?;
        Self::new(rooms, values, data_type_text, unit, legend_parameters)
    }

    pub fn matched(&self) -> impl Iterator<Item = (&'a Room, f64)> + '_ {
        self.rooms
            .iter()
            .zip(&self.values)
            .filter_map(|(r, v)| v.map(|v| (r, v)))
    }
}

/// Faces with their apertures and doors, with one numeric value per flat face.
#[derive(Debug, Clone)]
pub struct ValueColorFace<'a> {
    pub faces: &'a [Face],
    pub flat_faces: Vec<FaceObject<'a>>,
    pub values: Vec<Option<f64>>,
    pub data_type_text: String,
    pub unit: String,
    pub legend_parameters: LegendParameters,
}

impl<'a> ValueColorFace<'a> {
    pub fn new(
        faces: &'a [Face],
        values: Vec<Option<f64>>,
        data_type_text: &str,
        unit: &str,
        legend_parameters: Option<LegendParameters>,
    ) -> Result<Self> {
        let flat_faces = FaceObject::flatten(faces);
        check_aligned(flat_faces.len(), values.len())?;
        Ok(Self {
            faces,
            flat_faces,
            values,
            data_type_text: data_type_text.to_string(),
            unit: unit.to_string(),
            legend_parameters: legend_parameters.unwrap_or_default(),
        })
    }

    pub fn from_attribute(
        faces: &'a [Face],
        attr_name: &str,
        data_type_text: &str,
        unit: &str,
        legend_parameters: Option<LegendParameters>,
    ) -> Result<Self> {
        let values = FaceObject::flatten(faces)
            .iter()
            .map(|f| numeric(f, attr_name))
            .collect::<Result<Vec<_>>>()?;
        Self::new(faces, values, data_type_text, unit, legend_parameters)
    }

    pub fn matched(&self) -> impl Iterator<Item = (FaceObject<'a>, f64)> + '_ {
        self.flat_faces
            .iter()
            .zip(&self.values)
            .filter_map(|(f, v)| v.map(|v| (*f, v)))
    }
}

pub fn value_color_room_to_vis_set(
    color_room: &ValueColorRoom<'_>,
    opts: &ColorObjOptions,
) -> Result<VisualizationSet> {
    let identifier = color_room.data_type_text.replace(' ', "_");
    let mut vis_set = VisualizationSet::new(&identifier);
    vis_set.display_name = Some(color_room.data_type_text.clone());
    let matched: Vec<(&Room, f64)> = color_room.matched().collect();

    if opts.text_labels {
        let label_opts = LabelOptions::from_legend(&color_room.legend_parameters, opts.placement);
        let decimals = color_room.legend_parameters.decimal_count;
        let labels = place_labels(&matched, |(room, value)| {
            place_room_label(&format_value(*value, decimals), &room.geometry(), &label_opts)
        })?;
        let labels = finish_labels(labels, opts.placement);
        vis_set.add_context(
            ContextGeometry::new(&identifier, labels)
                .with_display_name(&color_room.data_type_text),
        );
    } else {
        let (rooms, values): (Vec<&Room>, Vec<f64>) = matched.into_iter().unzip();
        let geometry = rooms
            .iter()
            .map(|r| AnalysisShape::Polyface3D(r.geometry()))
            .collect();
        let data = value_data(
            values,
            &color_room.legend_parameters,
            &color_room.data_type_text,
            &color_room.unit,
        );
        let mut a_geo = AnalysisGeometry::new(&identifier, geometry, vec![data])?;
        a_geo.display_name = Some(color_room.data_type_text.clone());
        vis_set.add_analysis(a_geo);
    }

    if opts.include_wireframe {
        vis_set.add_context(room_wireframe(color_room.rooms, &opts.wireframe)?);
    }
    Ok(vis_set)
}

pub fn value_color_face_to_vis_set(
    color_face: &ValueColorFace<'_>,
    opts: &ColorObjOptions,
) -> Result<VisualizationSet> {
    let identifier = color_face.data_type_text.replace(' ', "_");
    let mut vis_set = VisualizationSet::new(&identifier);
    vis_set.display_name = Some(color_face.data_type_text.clone());
    let matched: Vec<(FaceObject<'_>, f64)> = color_face.matched().collect();
    let unmatched = color_face.flat_faces.len() - matched.len();
    if unmatched > 0 {
        warn!(
            unmatched,
            data_type = %color_face.data_type_text,
            "faces without values are not colored"
        );
    }

    if opts.text_labels {
        let label_opts = LabelOptions::from_legend(&color_face.legend_parameters, opts.placement);
        let decimals = color_face.legend_parameters.decimal_count;
        let labels = place_labels(&matched, |(obj, value)| {
            place_face_label(&format_value(*value, decimals), obj.geometry(), &label_opts)
        })?;
        let labels = finish_labels(labels, opts.placement);
        vis_set.add_context(
            ContextGeometry::new(&identifier, labels)
                .with_display_name(&color_face.data_type_text),
        );
    } else {
        let (objs, values): (Vec<FaceObject<'_>>, Vec<f64>) = matched.into_iter().unzip();
        let geometry = objs
            .iter()
            .map(|f| AnalysisShape::Face3D(f.display_geometry().into_owned()))
            .collect();
        let data = value_data(
            values,
            &color_face.legend_parameters,
            &color_face.data_type_text,
            &color_face.unit,
        );
        let mut a_geo = AnalysisGeometry::new(&identifier, geometry, vec![data])?;
        a_geo.display_name = Some(color_face.data_type_text.clone());
        vis_set.add_analysis(a_geo);
    }

    if opts.include_wireframe {
        let mut wireframe = Vec::new();
        for face in color_face.faces {
            append_face_tree(face, &opts.wireframe, &mut wireframe)?;
        }
        debug!(segments = wireframe.len(), "value face wireframe");
        vis_set.add_context(ContextGeometry::new(WIREFRAME_ID, wireframe));
    }
    Ok(vis_set)
}

/// Fixed-point text with `decimals` digits after the point.
pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

fn value_data(
    values: Vec<f64>,
    legend: &LegendParameters,
    data_type: &str,
    unit: &str,
) -> VisualizationData {
    let mut data = VisualizationData::new(values, legend.clone());
    data.data_type = Some(data_type.to_string());
    data.unit = Some(unit.to_string());
    data
}

fn numeric<T: Attributed + ?Sized>(obj: &T, attr_name: &str) -> Result<Option<f64>> {
    match obj.attribute(attr_name)? {
        AttrValue::Number(v) => Ok(Some(v)),
        AttrValue::Null => Ok(None),
        other => Err(DisplayError::InvalidConfiguration(format!(
            "attribute `{attr_name}` of {} is not numeric: {other}",
            obj.identifier()
        ))),
    }
}

fn check_aligned(objects: usize, values: usize) -> Result<()> {
    if objects == values {
        Ok(())
    } else {
        Err(DisplayError::InvalidConfiguration(format!(
            "{values} values given for {objects} objects"
        )))
    }
}
