use crate::style::Style;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster output size in pixels. The SVG itself is always 1080x1080.
    pub width: u32,
    pub height: u32,
    pub jpeg_quality: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub style: Style,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StyleVariables {
    font_family: Option<String>,
    background: Option<String>,
    value_color: Option<String>,
    label_color: Option<String>,
    badge_color: Option<String>,
    value_zoom: Option<NumberOrString>,
    label_zoom: Option<NumberOrString>,
    badge_zoom: Option<NumberOrString>,
    line_spacing: Option<NumberOrString>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<u32>,
    height: Option<u32>,
    jpeg_quality: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    style: Option<String>,
    style_variables: Option<StyleVariables>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(name) = parsed.style.as_deref() {
        config.style = Style::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("unknown style preset '{}'", name))?;
    }

    if let Some(vars) = parsed.style_variables {
        if let Some(v) = vars.font_family {
            config.style.font_family = v;
        }
        if let Some(v) = vars.background {
            config.style.background = v;
        }
        if let Some(v) = vars.value_color {
            config.style.value_color = v;
        }
        if let Some(v) = vars.label_color {
            config.style.label_color = v;
        }
        if let Some(v) = vars.badge_color {
            config.style.badge_fill_color = v;
        }
        if let Some(v) = vars.value_zoom.as_ref().and_then(NumberOrString::as_f32) {
            config.style.value_zoom = v;
        }
        if let Some(v) = vars.label_zoom.as_ref().and_then(NumberOrString::as_f32) {
            config.style.label_zoom = v;
        }
        if let Some(v) = vars.badge_zoom.as_ref().and_then(NumberOrString::as_f32) {
            config.style.badge_zoom = v;
        }
        if let Some(v) = vars.line_spacing.as_ref().and_then(NumberOrString::as_f32) {
            config.style.line_spacing = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.jpeg_quality {
            config.render.jpeg_quality = v.clamp(1, 100);
        }
    }

    Ok(config)
}
