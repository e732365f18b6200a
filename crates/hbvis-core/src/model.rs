//! Building model consumed by the visualization translators.
//!
//! This is a reduced JSON schema: every object carries an identifier, an
//! optional display name, its planar geometry, attached shades and a free-form
//! `properties` tree that dotted attribute paths are resolved against.

use crate::error::{DisplayError, Result};
use crate::geom::{Face3D, Polyface3D, Vec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "Color::opaque")]
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    fn opaque() -> u8 {
        255
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceType {
    Wall,
    RoofCeiling,
    Floor,
    AirBoundary,
}

impl FaceType {
    pub fn color(self) -> Color {
        match self {
            FaceType::Wall => Color::rgb(230, 180, 60),
            FaceType::RoofCeiling => Color::rgb(128, 20, 20),
            FaceType::Floor => Color::rgb(128, 128, 128),
            FaceType::AirBoundary => Color::rgb(255, 255, 200),
        }
    }
}

impl fmt::Display for FaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FaceType::Wall => "Wall",
            FaceType::RoofCeiling => "RoofCeiling",
            FaceType::Floor => "Floor",
            FaceType::AirBoundary => "AirBoundary",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BoundaryCondition {
    #[default]
    Outdoors,
    Ground,
    Adiabatic,
    Surface,
    Other,
}

impl BoundaryCondition {
    pub fn color(self) -> Color {
        match self {
            BoundaryCondition::Outdoors => Color::rgb(64, 180, 255),
            BoundaryCondition::Ground => Color::rgb(165, 82, 0),
            BoundaryCondition::Adiabatic => Color::rgb(255, 128, 128),
            BoundaryCondition::Surface => Color::rgb(0, 128, 0),
            BoundaryCondition::Other => Color::rgb(255, 255, 200),
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BoundaryCondition::Outdoors => "Outdoors",
            BoundaryCondition::Ground => "Ground",
            BoundaryCondition::Adiabatic => "Adiabatic",
            BoundaryCondition::Surface => "Surface",
            BoundaryCondition::Other => "Other",
        };
        f.write_str(s)
    }
}

const APERTURE_COLOR: Color = Color::rgb(64, 180, 255);
const INTERIOR_APERTURE_COLOR: Color = Color::rgb(128, 255, 255);
const DOOR_COLOR: Color = Color::rgb(160, 150, 100);
const INTERIOR_DOOR_COLOR: Color = Color::rgb(128, 120, 80);
const GLASS_DOOR_COLOR: Color = Color::rgb(128, 204, 255);
const SHADE_COLOR: Color = Color::rgb(120, 75, 190);
const INDOOR_SHADE_COLOR: Color = Color::rgb(159, 99, 255);
const CONTEXT_SHADE_COLOR: Color = Color::rgb(80, 50, 128);
const SHADE_BC_COLOR: Color = Color::rgb(120, 120, 120);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shade {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub geometry: Face3D,
    #[serde(default)]
    pub is_indoor: bool,
    #[serde(default)]
    pub is_detached: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shades: Vec<Shade>,
    #[serde(default)]
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aperture {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub geometry: Face3D,
    #[serde(default)]
    pub boundary_condition: BoundaryCondition,
    #[serde(default)]
    pub is_operable: bool,
    #[serde(default)]
    pub shades: Vec<Shade>,
    #[serde(default)]
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub geometry: Face3D,
    #[serde(default)]
    pub boundary_condition: BoundaryCondition,
    #[serde(default)]
    pub is_glass: bool,
    #[serde(default)]
    pub shades: Vec<Shade>,
    #[serde(default)]
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub face_type: FaceType,
    #[serde(default)]
    pub boundary_condition: BoundaryCondition,
    pub geometry: Face3D,
    #[serde(default)]
    pub apertures: Vec<Aperture>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub shades: Vec<Shade>,
    #[serde(default)]
    pub properties: Value,
}

impl Face {
    /// The face outline with its apertures and doors cut out as holes.
    pub fn punched_geometry(&self) -> Face3D {
        let mut punched = self.geometry.clone();
        punched.holes.extend(
            self.apertures
                .iter()
                .map(|a| a.geometry.boundary.clone())
                .chain(self.doors.iter().map(|d| d.geometry.boundary.clone())),
        );
        punched
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub faces: Vec<Face>,
    #[serde(default)]
    pub shades: Vec<Shade>,
    #[serde(default)]
    pub properties: Value,
}

impl Room {
    pub fn geometry(&self) -> Polyface3D {
        Polyface3D::new(self.faces.iter().map(|f| f.geometry.clone()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub orphaned_faces: Vec<Face>,
    #[serde(default)]
    pub orphaned_apertures: Vec<Aperture>,
    #[serde(default)]
    pub orphaned_doors: Vec<Door>,
    #[serde(default)]
    pub orphaned_shades: Vec<Shade>,
}

impl Model {
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    /// Every face of the model: room faces first, then orphaned faces.
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.rooms
            .iter()
            .flat_map(|r| r.faces.iter())
            .chain(self.orphaned_faces.iter())
    }
}

/// An object with planar geometry and a list of attached shades.
pub trait ShadedGeometry {
    fn geometry(&self) -> &Face3D;
    fn shades(&self) -> &[Shade];
}

/// An object with fixed display colors for each [`ColorBy`] mode.
pub trait Colored {
    fn type_color(&self) -> Color;
    fn bc_color(&self) -> Color;
}

macro_rules! impl_shaded {
    ($($ty:ty),*) => {
        $(
            impl ShadedGeometry for $ty {
                fn geometry(&self) -> &Face3D {
                    &self.geometry
                }

                fn shades(&self) -> &[Shade] {
                    &self.shades
                }
            }
        )*
    };
}

impl_shaded!(Face, Aperture, Door, Shade);

impl Colored for Face {
    fn type_color(&self) -> Color {
        self.face_type.color()
    }

    fn bc_color(&self) -> Color {
        self.boundary_condition.color()
    }
}

impl Colored for Aperture {
    fn type_color(&self) -> Color {
        if self.boundary_condition == BoundaryCondition::Surface {
            INTERIOR_APERTURE_COLOR
        } else {
            APERTURE_COLOR
        }
    }

    fn bc_color(&self) -> Color {
        self.boundary_condition.color()
    }
}

impl Colored for Door {
    fn type_color(&self) -> Color {
        if self.is_glass {
            GLASS_DOOR_COLOR
        } else if self.boundary_condition == BoundaryCondition::Surface {
            INTERIOR_DOOR_COLOR
        } else {
            DOOR_COLOR
        }
    }

    fn bc_color(&self) -> Color {
        self.boundary_condition.color()
    }
}

impl Colored for Shade {
    fn type_color(&self) -> Color {
        if self.is_indoor {
            INDOOR_SHADE_COLOR
        } else if self.is_detached {
            CONTEXT_SHADE_COLOR
        } else {
            SHADE_COLOR
        }
    }

    fn bc_color(&self) -> Color {
        SHADE_BC_COLOR
    }
}

/// Which fixed palette colors the model geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBy {
    Type,
    BoundaryCondition,
}

impl ColorBy {
    pub fn color_of<T: Colored + ?Sized>(self, obj: &T) -> Color {
        match self {
            ColorBy::Type => obj.type_color(),
            ColorBy::BoundaryCondition => obj.bc_color(),
        }
    }
}

impl FromStr for ColorBy {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "type" => Ok(ColorBy::Type),
            "boundary_condition" | "bc" => Ok(ColorBy::BoundaryCondition),
            other => Err(DisplayError::InvalidConfiguration(format!(
                "unrecognized color-by mode `{other}`"
            ))),
        }
    }
}

/// A resolved attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl AttrValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => AttrValue::Null,
            Value::Bool(b) => AttrValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(AttrValue::Null, AttrValue::Number),
            Value::String(s) => AttrValue::Text(s.clone()),
            // Objects referenced by attribute (constructions, programs) show by name.
            Value::Object(map) => match map.get("display_name").or_else(|| map.get("identifier")) {
                Some(Value::String(name)) => AttrValue::Text(name.clone()),
                _ => AttrValue::Text(value.to_string()),
            },
            Value::Array(_) => AttrValue::Text(value.to_string()),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Number(v) => write!(f, "{v}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Null => f.write_str("N/A"),
        }
    }
}

/// An object whose attributes can be looked up by dotted path.
pub trait Attributed {
    fn identifier(&self) -> &str;

    fn display_name(&self) -> &str;

    /// Attribute held directly on the object (no dots).
    fn field(&self, name: &str) -> Option<AttrValue>;

    fn properties(&self) -> &Value;

    /// Resolves a path such as `display_name` or `properties.energy.program_type`.
    fn attribute(&self, path: &str) -> Result<AttrValue> {
        let missing = || DisplayError::MissingAttribute {
            path: path.to_string(),
            object: self.identifier().to_string(),
        };
        let mut parts = path.split('.');
        let head = parts.next().filter(|h| !h.is_empty()).ok_or_else(missing)?;
        if head == "properties" {
            let mut node = self.properties();
            for part in parts {
                node = match node {
                    Value::Object(map) => map.get(part).ok_or_else(missing)?,
                    Value::Array(items) => {
                        let idx: usize = part.parse().map_err(|_| missing())?;
                        items.get(idx).ok_or_else(missing)?
                    }
                    _ => return Err(missing()),
                };
            }
            return Ok(AttrValue::from_json(node));
        }
        if parts.next().is_some() {
            return Err(missing());
        }
        match head {
            "identifier" => Ok(AttrValue::Text(self.identifier().to_string())),
            "display_name" => Ok(AttrValue::Text(self.display_name().to_string())),
            other => self.field(other).ok_or_else(missing),
        }
    }
}

impl Attributed for Room {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    fn field(&self, name: &str) -> Option<AttrValue> {
        match name {
            "floor_area" => Some(AttrValue::Number(
                self.faces
                    .iter()
                    .filter(|f| f.face_type == FaceType::Floor)
                    .map(|f| polygon_area(&f.geometry))
                    .sum(),
            )),
            "face_count" => Some(AttrValue::Number(self.faces.len() as f64)),
            _ => None,
        }
    }

    fn properties(&self) -> &Value {
        &self.properties
    }
}

impl Attributed for Face {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    fn field(&self, name: &str) -> Option<AttrValue> {
        match name {
            "type" | "face_type" => Some(AttrValue::Text(self.face_type.to_string())),
            "boundary_condition" => Some(AttrValue::Text(self.boundary_condition.to_string())),
            "area" => Some(AttrValue::Number(polygon_area(&self.geometry))),
            _ => None,
        }
    }

    fn properties(&self) -> &Value {
        &self.properties
    }
}

impl Attributed for Aperture {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    fn field(&self, name: &str) -> Option<AttrValue> {
        match name {
            "type" => Some(AttrValue::Text(
                if self.is_operable { "OperableAperture" } else { "Aperture" }.to_string(),
            )),
            "boundary_condition" => Some(AttrValue::Text(self.boundary_condition.to_string())),
            "is_operable" => Some(AttrValue::Bool(self.is_operable)),
            "area" => Some(AttrValue::Number(polygon_area(&self.geometry))),
            _ => None,
        }
    }

    fn properties(&self) -> &Value {
        &self.properties
    }
}

impl Attributed for Door {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    fn field(&self, name: &str) -> Option<AttrValue> {
        match name {
            "type" => Some(AttrValue::Text(
                if self.is_glass { "GlassDoor" } else { "Door" }.to_string(),
            )),
            "boundary_condition" => Some(AttrValue::Text(self.boundary_condition.to_string())),
            "is_glass" => Some(AttrValue::Bool(self.is_glass)),
            "area" => Some(AttrValue::Number(polygon_area(&self.geometry))),
            _ => None,
        }
    }

    fn properties(&self) -> &Value {
        &self.properties
    }
}

impl Attributed for Shade {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    fn field(&self, name: &str) -> Option<AttrValue> {
        match name {
            "type" => Some(AttrValue::Text("Shade".to_string())),
            "is_indoor" => Some(AttrValue::Bool(self.is_indoor)),
            "is_detached" => Some(AttrValue::Bool(self.is_detached)),
            "area" => Some(AttrValue::Number(polygon_area(&self.geometry))),
            _ => None,
        }
    }

    fn properties(&self) -> &Value {
        &self.properties
    }
}

/// A face, aperture or door of the model, borrowed.
#[derive(Debug, Clone, Copy)]
pub enum FaceObject<'a> {
    Face(&'a Face),
    Aperture(&'a Aperture),
    Door(&'a Door),
}

impl<'a> FaceObject<'a> {
    /// Each face followed by its apertures and then its doors.
    pub fn flatten(faces: impl IntoIterator<Item = &'a Face>) -> Vec<Self> {
        let mut out = Vec::new();
        for face in faces {
            out.push(FaceObject::Face(face));
            out.extend(face.apertures.iter().map(FaceObject::Aperture));
            out.extend(face.doors.iter().map(FaceObject::Door));
        }
        out
    }

    pub fn geometry(&self) -> &'a Face3D {
        match *self {
            FaceObject::Face(f) => &f.geometry,
            FaceObject::Aperture(a) => &a.geometry,
            FaceObject::Door(d) => &d.geometry,
        }
    }

    /// Geometry as drawn in overlays: faces have their apertures and doors
    /// cut out as holes.
    pub fn display_geometry(&self) -> Cow<'a, Face3D> {
        match *self {
            FaceObject::Face(f) => Cow::Owned(f.punched_geometry()),
            other => Cow::Borrowed(other.geometry()),
        }
    }

    pub fn is_face(&self) -> bool {
        matches!(self, FaceObject::Face(_))
    }

    fn inner(&self) -> &'a dyn Attributed {
        match *self {
            FaceObject::Face(f) => f,
            FaceObject::Aperture(a) => a,
            FaceObject::Door(d) => d,
        }
    }
}

impl Attributed for FaceObject<'_> {
    fn identifier(&self) -> &str {
        self.inner().identifier()
    }

    fn display_name(&self) -> &str {
        self.inner().display_name()
    }

    fn field(&self, name: &str) -> Option<AttrValue> {
        self.inner().field(name)
    }

    fn properties(&self) -> &Value {
        self.inner().properties()
    }
}

/// Area of a planar polygon with holes subtracted.
pub fn polygon_area(face: &Face3D) -> f64 {
    let holes: f64 = face.holes.iter().map(|h| ring_area(h)).sum();
    ring_area(&face.boundary) - holes
}

fn ring_area(ring: &[Vec3]) -> f64 {
    let mut acc = Vec3::new(0.0, 0.0, 0.0);
    for (i, a) in ring.iter().enumerate() {
        acc = acc + a.cross(ring[(i + 1) % ring.len()]);
    }
    acc.length() * 0.5
}
