mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::AppConfig;
use hbvis_algo::model::{model_to_vis_set, ModelVisOptions};
use hbvis_core::model::{ColorBy, Model};
use hbvis_core::vis::LegendParameters;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hbvis")]
#[command(about = "Translate building models into visualization sets.")]
struct Cli {
    /// TOML configuration file. Defaults to $HBVIS_CONFIG, then ./config/hbvis.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate a model JSON file into a visualization set JSON.
    ModelToVis {
        model_file: PathBuf,
        /// Palette for the model surfaces: type, boundary_condition or none.
        #[arg(long, default_value = "type")]
        color_by: String,
        #[arg(long)]
        exclude_wireframe: bool,
        /// Dotted room attribute path. Repeat for several layers.
        #[arg(long)]
        room_attr: Vec<String>,
        /// Dotted face attribute path. Repeat for several layers.
        #[arg(long)]
        face_attr: Vec<String>,
        /// Show attributes as text labels instead of colored overlays.
        #[arg(long)]
        text_attr: bool,
        #[arg(long)]
        text_height: Option<f64>,
        #[arg(long)]
        output_file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::discover()?,
    };
    init_logging(&config.logging.level);

    match cli.cmd {
        Command::ModelToVis {
            model_file,
            color_by,
            exclude_wireframe,
            room_attr,
            face_attr,
            text_attr,
            text_height,
            output_file,
        } => {
            let opts = ModelVisOptions {
                color_by: parse_color_by(&color_by)?,
                include_wireframe: !exclude_wireframe,
                room_attrs: room_attr,
                face_attrs: face_attr,
                text_labels: text_attr,
                legend: legend_from_config(&config, text_height),
                placement: config.labels.placement,
                wireframe: config.wireframe,
            };
            model_to_vis(&model_file, &opts, output_file.as_deref())
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_color_by(value: &str) -> Result<Option<ColorBy>> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let color_by = value
        .parse::<ColorBy>()
        .with_context(|| format!("parse --color-by {value:?}"))?;
    Ok(Some(color_by))
}

fn legend_from_config(config: &AppConfig, text_height: Option<f64>) -> LegendParameters {
    LegendParameters {
        font: config.labels.font.clone(),
        text_height: text_height.or(config.labels.text_height),
        decimal_count: config.labels.decimal_count,
        ..LegendParameters::default()
    }
}

fn model_to_vis(input: &Path, opts: &ModelVisOptions, output: Option<&Path>) -> Result<()> {
    ensure_input_file(input)?;
    let data = std::fs::read_to_string(input).with_context(|| format!("read model: {input:?}"))?;
    let model = Model::from_json(&data).with_context(|| format!("parse model: {input:?}"))?;
    debug!(model = %model.identifier, rooms = model.rooms.len(), "loaded model");

    let vis_set = model_to_vis_set(&model, opts)
        .with_context(|| format!("translate model {:?}", model.identifier))?;
    let json = serde_json::to_string_pretty(&vis_set).context("serialize visualization set")?;

    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(path, &json).with_context(|| format!("write visualization set: {path:?}"))?;
        info!(path = ?path, "wrote visualization set");
    } else {
        println!("{json}");
    }
    Ok(())
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_by_none_disables_surfaces() {
        assert_eq!(None, parse_color_by("none").unwrap());
        assert_eq!(Some(ColorBy::Type), parse_color_by("type").unwrap());
        assert_eq!(
            Some(ColorBy::BoundaryCondition),
            parse_color_by("boundary_condition").unwrap()
        );
        assert!(parse_color_by("rainbow").is_err());
    }

    #[test]
    fn cli_text_height_overrides_config() {
        let mut config = AppConfig::default();
        config.labels.text_height = Some(0.5);
        assert_eq!(Some(0.5), legend_from_config(&config, None).text_height);
        assert_eq!(Some(2.0), legend_from_config(&config, Some(2.0)).text_height);
    }
}
