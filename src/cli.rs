use crate::assets::load_image;
use crate::config::{RenderConfig, load_config};
use crate::ir::CardImages;
use crate::layout::compose_card;
use crate::project::ProjectSnapshot;
use crate::render::{RasterFormat, render_svg, write_output_raster, write_output_svg};
use crate::scene_dump::write_scene_dump;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "speccard", version, about = "Render 1080x1080 product spec cards")]
pub struct Args {
    /// Project snapshot (.json) or '-' for stdin. Defaults to an empty card.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Template override (A-F)
    #[arg(short = 't', long = "template")]
    pub template: Option<String>,

    /// Main photo
    #[arg(long = "photo1")]
    pub photo1: Option<PathBuf>,

    /// First secondary photo (upper inset)
    #[arg(long = "photo2")]
    pub photo2: Option<PathBuf>,

    /// Second secondary photo (lower inset, or right photo in template E)
    #[arg(long = "photo3")]
    pub photo3: Option<PathBuf>,

    /// Output file or directory. Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (style preset, styleVariables, render size)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Raster width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<u32>,

    /// Raster height in pixels
    #[arg(short = 'H', long = "height")]
    pub height: Option<u32>,

    /// JPEG quality (1-100)
    #[arg(short = 'q', long = "quality")]
    pub quality: Option<u8>,

    /// Also write the project snapshot used for this render
    #[arg(long = "save-project")]
    pub save_project: Option<PathBuf>,

    /// Also write a JSON dump of the composed scene
    #[arg(long = "dump-scene")]
    pub dump_scene: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Jpg,
}

impl OutputFormat {
    fn raster(self) -> Option<RasterFormat> {
        match self {
            OutputFormat::Svg => None,
            OutputFormat::Png => Some(RasterFormat::Png),
            OutputFormat::Jpg => Some(RasterFormat::Jpeg),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(quality) = args.quality {
        config.render.jpeg_quality = quality.clamp(1, 100);
    }

    let mut snapshot = read_project(args.project.as_deref())?;
    if let Some(template) = &args.template {
        snapshot.template = template.clone();
    }

    let images = CardImages {
        primary: args.photo1.as_deref().and_then(load_image),
        secondary1: args.photo2.as_deref().and_then(load_image),
        secondary2: args.photo3.as_deref().and_then(load_image),
    };
    let request = snapshot.to_request(images, &config.style)?;
    let scene = compose_card(&request);
    let svg = render_svg(&scene);

    if let Some(path) = &args.dump_scene {
        write_scene_dump(path, &scene, request.template)?;
    }
    if let Some(path) = &args.save_project {
        ProjectSnapshot::capture(snapshot.project_id.clone(), &request).save(path)?;
    }

    let ext = args.output_format.extension();
    let output = resolve_output(args.output.as_deref(), &snapshot, ext);
    let Some(format) = args.output_format.raster() else {
        write_output_svg(&svg, output.as_deref())?;
        return Ok(());
    };

    let output = ensure_output(output, ext)?;
    let written = export_raster(&svg, &output, format, &config.render)?;
    tracing::debug!(path = %written.display(), "wrote card");
    Ok(())
}

/// Write a raster card to `output`. When the raster path is unavailable the
/// SVG is written beside it instead. Returns the path actually written.
fn export_raster(
    svg: &str,
    output: &Path,
    format: RasterFormat,
    render_cfg: &RenderConfig,
) -> Result<PathBuf> {
    match write_output_raster(svg, output, format, render_cfg) {
        Ok(()) => Ok(output.to_path_buf()),
        Err(err) if err.is_degraded_capability() => {
            let fallback = output.with_extension("svg");
            write_output_svg(svg, Some(&fallback))?;
            tracing::warn!(%err, fallback = %fallback.display(), "raster export failed");
            eprintln!(
                "warning: {} export unavailable ({err}); wrote {} instead",
                format.extension().to_uppercase(),
                fallback.display()
            );
            Ok(fallback)
        }
        Err(err) => Err(err.into()),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_project(path: Option<&Path>) -> Result<ProjectSnapshot> {
    let Some(path) = path else {
        return Ok(ProjectSnapshot::default());
    };
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(ProjectSnapshot::from_json(&buf)?);
    }
    Ok(ProjectSnapshot::load(path)?)
}

fn resolve_output(output: Option<&Path>, snapshot: &ProjectSnapshot, ext: &str) -> Option<PathBuf> {
    let path = output?;
    if path.is_dir() {
        return Some(path.join(snapshot.file_name(ext)));
    }
    Some(path.to_path_buf())
}

fn ensure_output(output: Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_flags() {
        let args = Args::try_parse_from([
            "speccard",
            "-p",
            "card.json",
            "-t",
            "D",
            "--photo1",
            "main.jpg",
            "-e",
            "jpg",
            "-o",
            "out",
            "-q",
            "80",
        ])
        .unwrap();
        assert_eq!(args.template.as_deref(), Some("D"));
        assert_eq!(args.output_format, OutputFormat::Jpg);
        assert_eq!(args.output_format.raster(), Some(RasterFormat::Jpeg));
        assert_eq!(args.quality, Some(80));
        assert!(args.photo2.is_none());
    }

    #[test]
    fn output_directory_uses_project_id() {
        let snapshot = ProjectSnapshot {
            project_id: "ES-42".to_string(),
            ..Default::default()
        };
        let dir = std::env::temp_dir();
        assert_eq!(
            resolve_output(Some(&dir), &snapshot, "png"),
            Some(dir.join("ES-42.png"))
        );
        assert_eq!(
            resolve_output(Some(Path::new("card.svg")), &snapshot, "svg"),
            Some(PathBuf::from("card.svg"))
        );
        assert_eq!(resolve_output(None, &snapshot, "svg"), None);
    }

    const TINY_SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\" viewBox=\"0 0 10 10\"><rect x=\"0\" y=\"0\" width=\"10\" height=\"10\" fill=\"#EFEFEF\"/></svg>";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("speccard-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn failed_raster_falls_back_to_svg_beside_output() {
        let dir = scratch_dir("fallback");
        let output = dir.join("card.png");
        let cfg = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };

        let written = export_raster(TINY_SVG, &output, RasterFormat::Png, &cfg).unwrap();
        assert_eq!(written, dir.join("card.svg"));
        assert_eq!(std::fs::read_to_string(&written).unwrap(), TINY_SVG);
        assert!(!output.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn io_errors_during_export_propagate() {
        let dir = scratch_dir("io-error");
        let output = dir.join("missing").join("card.jpg");
        let cfg = RenderConfig {
            width: 10,
            height: 10,
            ..RenderConfig::default()
        };

        assert!(export_raster(TINY_SVG, &output, RasterFormat::Jpeg, &cfg).is_err());
        assert!(!dir.join("missing").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn raster_output_needs_a_path() {
        assert!(ensure_output(None, "png").is_err());
    }
}
