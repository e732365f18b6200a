pub mod error;
pub mod geom;
pub mod model;
pub mod vis;

pub use error::{DisplayError, Result};
