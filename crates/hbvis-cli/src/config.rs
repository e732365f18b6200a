use hbvis_algo::label::Placement;
use hbvis_algo::wireframe::WireframeOptions;
use hbvis_core::vis::DEFAULT_FONT;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "HBVIS_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub wireframe: WireframeOptions,
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `HBVIS_CONFIG` if set, else `./config/hbvis.toml` if present, else defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }
        let default_path = env::current_dir()
            .map(|dir| dir.join("config").join("hbvis.toml"))
            .map_err(|source| ConfigError::Context {
                message: "cannot read current directory".to_string(),
                source,
            })?;
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "LabelConfig::default_font")]
    pub font: String,
    #[serde(default)]
    pub text_height: Option<f64>,
    #[serde(default = "LabelConfig::default_decimal_count")]
    pub decimal_count: usize,
    #[serde(default)]
    pub placement: Placement,
}

impl LabelConfig {
    fn default_font() -> String {
        DEFAULT_FONT.to_string()
    }

    fn default_decimal_count() -> usize {
        2
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font: Self::default_font(),
            text_height: None,
            decimal_count: Self::default_decimal_count(),
            placement: Placement::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: std::io::Error,
    },
}
