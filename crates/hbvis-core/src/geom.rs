use crate::error::{DisplayError, Result};
use nalgebra::{Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

const ZERO_TOL: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalize(&self) -> Option<Self> {
        let len = self.length();
        if !len.is_finite() || len < ZERO_TOL {
            return None;
        }
        Some(Self::new(self.x / len, self.y / len, self.z / len))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_na(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl BBox3 {
    pub fn empty() -> Self {
        Self {
            min: Vec3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Vec3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.include_point(*p);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn include_point(&mut self, point: Vec3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let mut out = *self;
        out.include_point(other.min);
        out.include_point(other.max);
        out
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Extent along Y.
    pub fn depth(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Extent along Z.
    pub fn height(&self) -> f64 {
        (self.max.z - self.min.z).max(0.0)
    }
}

/// An oriented plane: origin, unit normal and the in-plane X/Y axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub o: Vec3,
    pub n: Vec3,
    pub x: Vec3,
    pub y: Vec3,
}

impl Plane {
    /// Builds a plane from a normal and an origin.
    ///
    /// The X axis is horizontal, `(n.y, -n.x, 0)`, unless the normal is
    /// vertical, in which case it is the world X axis. Y is `n × x`.
    pub fn new(n: Vec3, o: Vec3) -> Result<Self> {
        let n = n.normalize().ok_or_else(|| {
            DisplayError::InvalidGeometry("plane normal has zero length".to_string())
        })?;
        let x = if n.x == 0.0 && n.y == 0.0 {
            Vec3::X
        } else {
            Vec3::new(n.y, -n.x, 0.0).normalize().unwrap_or(Vec3::X)
        };
        let y = n.cross(x);
        Ok(Self { o, n, x, y })
    }

    /// Rotates the plane by `angle` radians about `axis` passing through `origin`.
    pub fn rotate(&self, axis: Vec3, angle: f64, origin: Vec3) -> Self {
        let Some(axis) = Unit::try_new(axis.to_na(), ZERO_TOL) else {
            return *self;
        };
        let rot = Rotation3::from_axis_angle(&axis, angle);
        Self {
            o: origin + Vec3::from(rot * (self.o - origin).to_na()),
            n: Vec3::from(rot * self.n.to_na()),
            x: Vec3::from(rot * self.x.to_na()),
            y: Vec3::from(rot * self.y.to_na()),
        }
    }

    pub fn move_by(&self, v: Vec3) -> Self {
        Self {
            o: self.o + v,
            ..*self
        }
    }

    /// True when text laid out along this plane's Y axis would read downwards.
    pub fn is_upside_down(&self) -> bool {
        self.y.z < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment3D {
    pub start: Vec3,
    pub end: Vec3,
}

impl LineSegment3D {
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }
}

/// A planar polygon with optional interior holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face3D {
    pub boundary: Vec<Vec3>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<Vec3>>,
}

impl Face3D {
    pub fn new(boundary: Vec<Vec3>, holes: Vec<Vec<Vec3>>) -> Result<Self> {
        let face = Self { boundary, holes };
        face.validate()?;
        Ok(face)
    }

    pub fn validate(&self) -> Result<()> {
        check_ring("boundary", &self.boundary)?;
        for (i, hole) in self.holes.iter().enumerate() {
            check_ring(&format!("hole {i}"), hole)?;
        }
        Ok(())
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Unit normal from Newell's method over the boundary ring.
    pub fn normal(&self) -> Result<Vec3> {
        let mut acc = Vec3::new(0.0, 0.0, 0.0);
        for (a, b) in ring_pairs(&self.boundary) {
            acc.x += (a.y - b.y) * (a.z + b.z);
            acc.y += (a.z - b.z) * (a.x + b.x);
            acc.z += (a.x - b.x) * (a.y + b.y);
        }
        acc.normalize()
            .ok_or_else(|| DisplayError::InvalidGeometry("face has zero area".to_string()))
    }

    pub fn bbox(&self) -> BBox3 {
        BBox3::from_points(&self.boundary)
    }

    /// Center of the bounding box, not the area centroid.
    pub fn center(&self) -> Vec3 {
        self.bbox().center()
    }

    pub fn min(&self) -> Vec3 {
        self.bbox().min
    }

    pub fn max(&self) -> Vec3 {
        self.bbox().max
    }

    pub fn boundary_segments(&self) -> Vec<LineSegment3D> {
        ring_segments(&self.boundary)
    }

    pub fn hole_segments(&self) -> Vec<Vec<LineSegment3D>> {
        self.holes.iter().map(|h| ring_segments(h)).collect()
    }
}

/// A set of faces describing a closed volume, such as a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyface3D {
    pub faces: Vec<Face3D>,
}

impl Polyface3D {
    pub fn new(faces: Vec<Face3D>) -> Self {
        Self { faces }
    }

    pub fn bbox(&self) -> BBox3 {
        self.faces
            .iter()
            .fold(BBox3::empty(), |acc, f| acc.union(&f.bbox()))
    }

    pub fn center(&self) -> Vec3 {
        self.bbox().center()
    }

    pub fn min(&self) -> Vec3 {
        self.bbox().min
    }

    pub fn max(&self) -> Vec3 {
        self.bbox().max
    }
}

fn check_ring(name: &str, ring: &[Vec3]) -> Result<()> {
    if ring.len() < 3 {
        return Err(DisplayError::InvalidGeometry(format!(
            "{name} has {} points; at least 3 are required",
            ring.len()
        )));
    }
    if ring.iter().any(|p| !p.is_finite()) {
        return Err(DisplayError::InvalidGeometry(format!(
            "{name} contains a non-finite coordinate"
        )));
    }
    Ok(())
}

fn ring_pairs(ring: &[Vec3]) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

fn ring_segments(ring: &[Vec3]) -> Vec<LineSegment3D> {
    ring_pairs(ring)
        .map(|(a, b)| LineSegment3D::new(a, b))
        .collect()
}
