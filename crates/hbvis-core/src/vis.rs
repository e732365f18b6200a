//! Display primitives and the scene containers handed to the renderer.

use crate::error::{DisplayError, Result};
use crate::geom::{Face3D, LineSegment3D, Plane, Polyface3D};
use crate::model::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_FONT: &str = "Arial";
const BLACK: Color = Color::rgb(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayMode {
    Surface,
    #[default]
    SurfaceWithEdges,
    Wireframe,
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayLineSegment3D {
    pub geometry: LineSegment3D,
    pub color: Color,
    pub line_width: f64,
}

impl DisplayLineSegment3D {
    pub fn new(geometry: LineSegment3D, line_width: f64) -> Self {
        Self {
            geometry,
            color: BLACK,
            line_width,
        }
    }

    pub fn with_color(mut self, color: Option<Color>) -> Self {
        if let Some(color) = color {
            self.color = color;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayText3D {
    pub text: String,
    pub plane: Plane,
    pub height: f64,
    pub font: String,
    pub color: Color,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

impl DisplayText3D {
    /// A label centered on the plane origin.
    pub fn centered(text: String, plane: Plane, height: f64, font: &str) -> Self {
        Self {
            text,
            plane,
            height,
            font: font.to_string(),
            color: BLACK,
            horizontal_alignment: HorizontalAlignment::Center,
            vertical_alignment: VerticalAlignment::Middle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFace3D {
    pub geometry: Face3D,
    pub color: Color,
    pub display_mode: DisplayMode,
}

impl DisplayFace3D {
    pub fn new(geometry: Face3D, color: Color, display_mode: DisplayMode) -> Self {
        Self {
            geometry,
            color,
            display_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DisplayGeometry {
    LineSegment3D(DisplayLineSegment3D),
    Text3D(DisplayText3D),
    Face3D(DisplayFace3D),
}

impl From<DisplayLineSegment3D> for DisplayGeometry {
    fn from(v: DisplayLineSegment3D) -> Self {
        DisplayGeometry::LineSegment3D(v)
    }
}

impl From<DisplayText3D> for DisplayGeometry {
    fn from(v: DisplayText3D) -> Self {
        DisplayGeometry::Text3D(v)
    }
}

impl From<DisplayFace3D> for DisplayGeometry {
    fn from(v: DisplayFace3D) -> Self {
        DisplayGeometry::Face3D(v)
    }
}

/// A layer of display primitives that carry no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextGeometry {
    pub identifier: String,
    pub display_name: Option<String>,
    pub geometry: Vec<DisplayGeometry>,
}

impl ContextGeometry {
    pub fn new<G: Into<DisplayGeometry>>(identifier: &str, geometry: Vec<G>) -> Self {
        Self {
            identifier: identifier.to_string(),
            display_name: None,
            geometry: geometry.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendParameters {
    pub title: Option<String>,
    pub segment_count: Option<usize>,
    pub decimal_count: usize,
    pub font: String,
    /// `None` lets consumers derive a height from the geometry.
    pub text_height: Option<f64>,
    pub ordinal_dictionary: Option<BTreeMap<usize, String>>,
}

impl Default for LegendParameters {
    fn default() -> Self {
        Self {
            title: None,
            segment_count: None,
            decimal_count: 2,
            font: DEFAULT_FONT.to_string(),
            text_height: None,
            ordinal_dictionary: None,
        }
    }
}

impl LegendParameters {
    pub fn is_title_default(&self) -> bool {
        self.title.is_none()
    }

    pub fn is_text_height_default(&self) -> bool {
        self.text_height.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    pub values: Vec<f64>,
    pub legend_parameters: LegendParameters,
    pub data_type: Option<String>,
    pub unit: Option<String>,
}

impl VisualizationData {
    pub fn new(values: Vec<f64>, legend_parameters: LegendParameters) -> Self {
        Self {
            values,
            legend_parameters,
            data_type: None,
            unit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnalysisShape {
    Face3D(Face3D),
    Polyface3D(Polyface3D),
}

/// Geometry colored by one or more aligned data sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisGeometry {
    pub identifier: String,
    pub display_name: Option<String>,
    pub geometry: Vec<AnalysisShape>,
    pub data_sets: Vec<VisualizationData>,
    pub display_mode: DisplayMode,
}

impl AnalysisGeometry {
    pub fn new(
        identifier: &str,
        geometry: Vec<AnalysisShape>,
        data_sets: Vec<VisualizationData>,
    ) -> Result<Self> {
        for data in &data_sets {
            if data.values.len() != geometry.len() {
                return Err(DisplayError::InvalidConfiguration(format!(
                    "{} values do not align with {} geometries in `{identifier}`",
                    data.values.len(),
                    geometry.len()
                )));
            }
        }
        Ok(Self {
            identifier: identifier.to_string(),
            display_name: None,
            geometry,
            data_sets,
            display_mode: DisplayMode::Surface,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisGeometry {
    Context(ContextGeometry),
    Analysis(AnalysisGeometry),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSet {
    pub identifier: String,
    pub display_name: Option<String>,
    pub geometry: Vec<VisGeometry>,
}

impl VisualizationSet {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            display_name: None,
            geometry: Vec::new(),
        }
    }

    pub fn add_context(&mut self, geo: ContextGeometry) {
        self.geometry.push(VisGeometry::Context(geo));
    }

    pub fn add_analysis(&mut self, geo: AnalysisGeometry) {
        self.geometry.push(VisGeometry::Analysis(geo));
    }

    pub fn context(&self, identifier: &str) -> Option<&ContextGeometry> {
        self.geometry.iter().find_map(|g| match g {
            VisGeometry::Context(c) if c.identifier == identifier => Some(c),
            _ => None,
        })
    }

    pub fn analysis(&self, identifier: &str) -> Option<&AnalysisGeometry> {
        self.geometry.iter().find_map(|g| match g {
            VisGeometry::Analysis(a) if a.identifier == identifier => Some(a),
            _ => None,
        })
    }
}
