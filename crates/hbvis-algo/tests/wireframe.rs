mod common;

use common::{aperture, box_room, face, poly, shade, shoebox, v};
use hbvis_algo::wireframe::{
    extract_wireframe, room_wireframe, HoleMode, WireframeOptions, PRIMARY_WEIGHT,
    SECONDARY_WEIGHT, WIREFRAME_ID,
};
use hbvis_core::geom::{Face3D, LineSegment3D};
use hbvis_core::model::{Color, FaceType};
use hbvis_core::vis::DisplayGeometry;
use hbvis_core::DisplayError;

fn slab_with_holes() -> Face3D {
    Face3D {
        boundary: vec![v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0), v(10.0, 10.0, 0.0), v(0.0, 10.0, 0.0)],
        holes: vec![
            vec![v(1.0, 1.0, 0.0), v(2.0, 1.0, 0.0), v(2.0, 2.0, 0.0)],
            vec![v(5.0, 5.0, 0.0), v(6.0, 5.0, 0.0), v(6.0, 6.0, 0.0), v(5.0, 6.0, 0.0)],
        ],
    }
}

fn widths(segs: &[hbvis_core::vis::DisplayLineSegment3D]) -> Vec<f64> {
    segs.iter().map(|s| s.line_width).collect()
}

#[test]
fn square_face_gives_four_primary_segments() {
    let wall = face(
        "Wall",
        FaceType::Wall,
        poly(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]]),
    );
    let segs = extract_wireframe(&wall, PRIMARY_WEIGHT, &WireframeOptions::default()).unwrap();
    assert_eq!(4, segs.len());
    assert_eq!(vec![2.0; 4], widths(&segs));
    assert!(segs.iter().all(|s| s.color == Color::rgb(0, 0, 0)));
    assert_eq!(
        LineSegment3D::new(v(0.0, 0.0, 1.0), v(0.0, 0.0, 0.0)),
        segs[3].geometry
    );
}

#[test]
fn compat_mode_repeats_boundary_per_hole() {
    let slab = face("Slab", FaceType::Floor, slab_with_holes());
    let opts = WireframeOptions {
        hole_mode: HoleMode::Compat,
        ..WireframeOptions::default()
    };
    let segs = extract_wireframe(&slab, PRIMARY_WEIGHT, &opts).unwrap();
    assert_eq!(4 + 4 * 2, segs.len());
    let boundary = slab.geometry.boundary_segments();
    for (i, seg) in segs.iter().enumerate() {
        assert_eq!(boundary[i % 4], seg.geometry);
    }
}

#[test]
fn corrected_mode_draws_hole_rings() {
    let slab = face("Slab", FaceType::Floor, slab_with_holes());
    let segs = extract_wireframe(&slab, PRIMARY_WEIGHT, &WireframeOptions::default()).unwrap();
    assert_eq!(4 + 3 + 4, segs.len());
    assert_eq!(
        LineSegment3D::new(v(1.0, 1.0, 0.0), v(2.0, 1.0, 0.0)),
        segs[4].geometry
    );
    assert_eq!(
        LineSegment3D::new(v(5.0, 6.0, 0.0), v(5.0, 5.0, 0.0)),
        segs[10].geometry
    );
}

#[test]
fn shades_follow_at_secondary_weight() {
    let mut wall = face(
        "Wall",
        FaceType::Wall,
        poly(&[[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [4.0, 0.0, 3.0], [0.0, 0.0, 3.0]]),
    );
    wall.shades.push(shade(
        "Fin",
        poly(&[[0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 3.0]]),
    ));
    wall.shades.push(shade(
        "Overhang",
        poly(&[[0.0, 0.0, 3.0], [4.0, 0.0, 3.0], [4.0, -1.0, 3.0], [0.0, -1.0, 3.0]]),
    ));
    let segs = extract_wireframe(&wall, PRIMARY_WEIGHT, &WireframeOptions::default()).unwrap();
    assert_eq!(
        vec![2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        widths(&segs)
    );
}

#[test]
fn nested_shades_respect_depth() {
    let mut louver = shade(
        "Louver",
        poly(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]),
    );
    louver.shades.push(shade(
        "Blade",
        poly(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0]]),
    ));
    let mut glz = aperture(
        "Glz",
        poly(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]]),
    );
    glz.shades.push(louver);

    let shallow = extract_wireframe(&glz, SECONDARY_WEIGHT, &WireframeOptions::default()).unwrap();
    assert_eq!(4 + 3, shallow.len());

    let deep_opts = WireframeOptions {
        shade_depth: 2,
        ..WireframeOptions::default()
    };
    let deep = extract_wireframe(&glz, SECONDARY_WEIGHT, &deep_opts).unwrap();
    assert_eq!(4 + 3 + 3, deep.len());
    assert!(deep.iter().all(|s| s.line_width == 1.0));

    let none_opts = WireframeOptions {
        shade_depth: 0,
        ..WireframeOptions::default()
    };
    assert_eq!(4, extract_wireframe(&glz, SECONDARY_WEIGHT, &none_opts).unwrap().len());
}

#[test]
fn degenerate_geometry_is_rejected() {
    let sliver = face(
        "Sliver",
        FaceType::Wall,
        poly(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]),
    );
    let err = extract_wireframe(&sliver, PRIMARY_WEIGHT, &WireframeOptions::default()).unwrap_err();
    assert!(matches!(err, DisplayError::InvalidGeometry(_)));

    let mut wall = face(
        "Wall",
        FaceType::Wall,
        poly(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0]]),
    );
    wall.shades.push(shade("Broken", poly(&[[0.0, 0.0, 0.0]])));
    let err = extract_wireframe(&wall, PRIMARY_WEIGHT, &WireframeOptions::default()).unwrap_err();
    assert!(matches!(err, DisplayError::InvalidGeometry(_)));
}

#[test]
fn weight_must_be_positive() {
    let wall = face(
        "Wall",
        FaceType::Wall,
        poly(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0]]),
    );
    for weight in [0.0, -1.0, f64::NAN] {
        let err = extract_wireframe(&wall, weight, &WireframeOptions::default()).unwrap_err();
        assert!(matches!(err, DisplayError::InvalidConfiguration(_)));
    }
}

#[test]
fn room_wireframe_weights_faces_over_sub_faces() {
    let room = shoebox();
    let layer = room_wireframe(std::slice::from_ref(&room), &WireframeOptions::default()).unwrap();
    assert_eq!(WIREFRAME_ID, layer.identifier);
    assert_eq!(6 * 4 + 4 + 4, layer.geometry.len());

    let weights: Vec<f64> = layer
        .geometry
        .iter()
        .map(|g| match g {
            DisplayGeometry::LineSegment3D(s) => s.line_width,
            other => panic!("unexpected geometry {other:?}"),
        })
        .collect();
    // floor, then south wall, then the window and its overhang
    assert!(weights[..8].iter().all(|w| *w == 2.0));
    assert!(weights[8..16].iter().all(|w| *w == 1.0));
    assert!(weights[16..].iter().all(|w| *w == 2.0));
}

#[test]
fn extraction_is_deterministic() {
    let rooms = vec![
        box_room("A", [0.0, 0.0, 0.0], [5.0, 5.0, 3.0], "Office"),
        box_room("B", [5.0, 0.0, 0.0], [5.0, 5.0, 3.0], "Corridor"),
    ];
    let opts = WireframeOptions::default();
    assert_eq!(
        room_wireframe(&rooms, &opts).unwrap(),
        room_wireframe(&rooms, &opts).unwrap()
    );
}
