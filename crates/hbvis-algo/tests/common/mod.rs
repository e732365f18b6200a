#![allow(dead_code)]

use hbvis_core::geom::{Face3D, Vec3};
use hbvis_core::model::{Aperture, BoundaryCondition, Door, Face, FaceType, Room, Shade};
use serde_json::{json, Value};

pub fn v(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

pub fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-9
}

pub fn poly(points: &[[f64; 3]]) -> Face3D {
    Face3D {
        boundary: points.iter().map(|p| v(p[0], p[1], p[2])).collect(),
        holes: Vec::new(),
    }
}

pub fn construction(name: Option<&str>) -> Value {
    json!({ "energy": { "construction": name } })
}

pub fn shade(id: &str, geometry: Face3D) -> Shade {
    Shade {
        identifier: id.to_string(),
        display_name: None,
        geometry,
        is_indoor: false,
        is_detached: false,
        shades: Vec::new(),
        properties: construction(None),
    }
}

pub fn aperture(id: &str, geometry: Face3D) -> Aperture {
    Aperture {
        identifier: id.to_string(),
        display_name: None,
        geometry,
        boundary_condition: BoundaryCondition::Outdoors,
        is_operable: false,
        shades: Vec::new(),
        properties: construction(None),
    }
}

pub fn door(id: &str, geometry: Face3D) -> Door {
    Door {
        identifier: id.to_string(),
        display_name: None,
        geometry,
        boundary_condition: BoundaryCondition::Outdoors,
        is_glass: false,
        shades: Vec::new(),
        properties: construction(None),
    }
}

pub fn face(id: &str, face_type: FaceType, geometry: Face3D) -> Face {
    Face {
        identifier: id.to_string(),
        display_name: None,
        face_type,
        boundary_condition: BoundaryCondition::Outdoors,
        geometry,
        apertures: Vec::new(),
        doors: Vec::new(),
        shades: Vec::new(),
        properties: construction(None),
    }
}

/// An axis-aligned box room with outward-facing faces in the order floor,
/// south, east, north, west, roof.
pub fn box_room(id: &str, min: [f64; 3], size: [f64; 3], program: &str) -> Room {
    let [x0, y0, z0] = min;
    let (x1, y1, z1) = (x0 + size[0], y0 + size[1], z0 + size[2]);
    let faces = vec![
        face(
            &format!("{id}_Floor"),
            FaceType::Floor,
            poly(&[[x0, y0, z0], [x0, y1, z0], [x1, y1, z0], [x1, y0, z0]]),
        ),
        face(
            &format!("{id}_South"),
            FaceType::Wall,
            poly(&[[x0, y0, z0], [x1, y0, z0], [x1, y0, z1], [x0, y0, z1]]),
        ),
        face(
            &format!("{id}_East"),
            FaceType::Wall,
            poly(&[[x1, y0, z0], [x1, y1, z0], [x1, y1, z1], [x1, y0, z1]]),
        ),
        face(
            &format!("{id}_North"),
            FaceType::Wall,
            poly(&[[x1, y1, z0], [x0, y1, z0], [x0, y1, z1], [x1, y1, z1]]),
        ),
        face(
            &format!("{id}_West"),
            FaceType::Wall,
            poly(&[[x0, y1, z0], [x0, y0, z0], [x0, y0, z1], [x0, y1, z1]]),
        ),
        face(
            &format!("{id}_Roof"),
            FaceType::RoofCeiling,
            poly(&[[x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]]),
        ),
    ];
    Room {
        identifier: id.to_string(),
        display_name: None,
        faces,
        shades: Vec::new(),
        properties: json!({ "energy": { "program_type": program } }),
    }
}

/// A 10 x 10 x 3 office with one window and overhang on the south wall.
pub fn shoebox() -> Room {
    let mut room = box_room("Office", [0.0, 0.0, 0.0], [10.0, 10.0, 3.0], "Office");
    let mut window = aperture(
        "Office_South_Glz",
        poly(&[[2.0, 0.0, 1.0], [8.0, 0.0, 1.0], [8.0, 0.0, 2.0], [2.0, 0.0, 2.0]]),
    );
    window.shades.push(shade(
        "Office_South_Glz_Overhang",
        poly(&[[2.0, 0.0, 2.2], [8.0, 0.0, 2.2], [8.0, -1.0, 2.2], [2.0, -1.0, 2.2]]),
    ));
    room.faces[1].apertures.push(window);
    room.faces[1].properties = construction(Some("Generic Exterior Wall"));
    room
}
