//! Translation of building models into visualization sets: colored surfaces,
//! wireframes, analysis overlays and text labels.

pub mod aperture;
pub mod colorobj;
pub mod energy;
pub mod face;
pub mod label;
pub mod model;
pub mod wireframe;

pub use label::{place_face_label, place_room_label, LabelOptions, Placement};
pub use model::{model_to_vis_set, ModelVisOptions};
pub use wireframe::{extract_wireframe, HoleMode, WireframeOptions};
