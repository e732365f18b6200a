use thiserror::Error;

pub type Result<T> = std::result::Result<T, DisplayError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DisplayError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("attribute `{path}` not found on {object}")]
    MissingAttribute { path: String, object: String },
}
