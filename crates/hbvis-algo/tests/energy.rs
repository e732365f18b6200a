mod common;

use common::{box_room, shoebox};
use hbvis_algo::colorobj::ColorObjOptions;
use hbvis_algo::energy::{
    format_value, value_color_face_to_vis_set, value_color_room_to_vis_set, ValueColorFace,
    ValueColorRoom,
};
use hbvis_algo::wireframe::WIREFRAME_ID;
use hbvis_core::model::Room;
use hbvis_core::vis::{AnalysisShape, DisplayGeometry, LegendParameters};
use hbvis_core::DisplayError;

fn two_rooms() -> Vec<Room> {
    vec![
        box_room("A", [0.0, 0.0, 0.0], [10.0, 10.0, 3.0], "Office"),
        box_room("B", [10.0, 0.0, 0.0], [10.0, 5.0, 3.0], "Corridor"),
    ]
}

#[test]
fn formats_with_fixed_decimals() {
    assert_eq!("12.30", format_value(12.3, 2));
    assert_eq!("0.333", format_value(1.0 / 3.0, 3));
    assert_eq!("12", format_value(12.3, 0));
}

#[test]
fn room_values_as_labels_skip_missing() {
    let rooms = two_rooms();
    let legend = LegendParameters {
        decimal_count: 1,
        ..LegendParameters::default()
    };
    let color_room = ValueColorRoom::new(
        &rooms,
        vec![Some(12.34), None],
        "Energy Use Intensity",
        "kWh/m2",
        Some(legend),
    )
    .unwrap();
    let opts = ColorObjOptions {
        text_labels: true,
        ..ColorObjOptions::default()
    };
    let vis_set = value_color_room_to_vis_set(&color_room, &opts).unwrap();
    assert_eq!("Energy_Use_Intensity", vis_set.identifier);

    let labels = vis_set.context("Energy_Use_Intensity").unwrap();
    assert_eq!(1, labels.geometry.len());
    match &labels.geometry[0] {
        DisplayGeometry::Text3D(t) => assert_eq!("12.3", t.text),
        other => panic!("unexpected geometry {other:?}"),
    }
    // the wireframe still covers both rooms
    assert_eq!(2 * 6 * 4, vis_set.context(WIREFRAME_ID).unwrap().geometry.len());
}

#[test]
fn room_values_as_analysis_carry_type_and_unit() {
    let rooms = two_rooms();
    let color_room =
        ValueColorRoom::from_attribute(&rooms, "floor_area", "Floor Area", "m2", None).unwrap();
    assert_eq!(vec![Some(100.0), Some(50.0)], color_room.values);

    let vis_set = value_color_room_to_vis_set(&color_room, &ColorObjOptions::default()).unwrap();
    let analysis = vis_set.analysis("Floor_Area").unwrap();
    let data = &analysis.data_sets[0];
    assert_eq!(vec![100.0, 50.0], data.values);
    assert_eq!(Some("Floor Area".to_string()), data.data_type);
    assert_eq!(Some("m2".to_string()), data.unit);
}

#[test]
fn non_numeric_attribute_is_rejected() {
    let rooms = two_rooms();
    let err = ValueColorRoom::from_attribute(
        &rooms,
        "properties.energy.program_type",
        "Program",
        "-",
        None,
    )
    .unwrap_err();
    assert!(matches!(err, DisplayError::InvalidConfiguration(_)));
}

#[test]
fn value_count_must_match_objects() {
    let rooms = two_rooms();
    let err = ValueColorRoom::new(&rooms, vec![Some(1.0)], "EUI", "kWh/m2", None).unwrap_err();
    assert!(matches!(err, DisplayError::InvalidConfiguration(_)));

    let room = shoebox();
    let err =
        ValueColorFace::new(&room.faces, vec![Some(1.0); 6], "Solar", "kWh", None).unwrap_err();
    assert!(matches!(err, DisplayError::InvalidConfiguration(_)));
}

#[test]
fn face_values_cover_apertures_in_order() {
    let room = shoebox();
    let mut values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0), None];
    values.swap(2, 6);
    let color_face =
        ValueColorFace::new(&room.faces, values, "Solar Radiation", "kWh/m2", None).unwrap();
    assert_eq!(6, color_face.matched().count());

    let vis_set = value_color_face_to_vis_set(&color_face, &ColorObjOptions::default()).unwrap();
    let analysis = vis_set.analysis("Solar_Radiation").unwrap();
    assert_eq!(6, analysis.geometry.len());
    assert_eq!(vec![1.0, 2.0, 4.0, 5.0, 6.0, 3.0], analysis.data_sets[0].values);
    assert_eq!(6 * 4 + 4 + 4, vis_set.context(WIREFRAME_ID).unwrap().geometry.len());
}

#[test]
fn face_value_overlay_cuts_out_apertures() {
    let room = shoebox();
    let values = vec![Some(1.0); 7];
    let color_face = ValueColorFace::new(&room.faces, values, "Solar", "kWh", None).unwrap();
    let vis_set = value_color_face_to_vis_set(&color_face, &ColorObjOptions::default()).unwrap();
    let analysis = vis_set.analysis("Solar").unwrap();
    match &analysis.geometry[1] {
        AnalysisShape::Face3D(wall) => assert_eq!(1, wall.holes.len()),
        other => panic!("unexpected geometry {other:?}"),
    }
    match &analysis.geometry[0] {
        AnalysisShape::Face3D(floor) => assert!(floor.holes.is_empty()),
        other => panic!("unexpected geometry {other:?}"),
    }
}
