use spec_card_renderer::assets::decode_or_skip;
use spec_card_renderer::{CardImages, ProjectSnapshot, Style, render_card};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRenderOptions {
    style: Option<String>,
    font_family: Option<String>,
    background: Option<String>,
}

fn build_base_style(options: CardRenderOptions) -> Style {
    let mut style = options
        .style
        .as_deref()
        .and_then(Style::from_name)
        .unwrap_or_default();
    if let Some(font_family) = options.font_family {
        style.font_family = font_family;
    }
    if let Some(background) = options.background {
        style.background = background;
    }
    style
}

fn render_project(
    project_json: &str,
    options: CardRenderOptions,
    images: CardImages,
) -> Result<String, String> {
    let snapshot = ProjectSnapshot::from_json(project_json).map_err(|error| error.to_string())?;
    let request = snapshot
        .to_request(images, &build_base_style(options))
        .map_err(|error| error.to_string())?;
    Ok(render_card(&request))
}

/// Render a project snapshot to SVG. Photos are raw encoded image bytes;
/// undecodable ones are dropped and their slot left empty.
#[wasm_bindgen]
pub fn render_card_svg(
    project_json: &str,
    primary: Option<Vec<u8>>,
    secondary1: Option<Vec<u8>>,
    secondary2: Option<Vec<u8>>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<CardRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        CardRenderOptions::default()
    };

    let images = CardImages {
        primary: primary.as_deref().and_then(|bytes| decode_or_skip(bytes, "primary")),
        secondary1: secondary1.as_deref().and_then(|bytes| decode_or_skip(bytes, "secondary1")),
        secondary2: secondary2.as_deref().and_then(|bytes| decode_or_skip(bytes, "secondary2")),
    };
    render_project(project_json, options, images).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::{CardRenderOptions, render_project};
    use spec_card_renderer::CardImages;

    #[test]
    fn renders_project_without_photos() {
        let project = r#"{
            "template": "B",
            "v1": "2000mAh", "u1": "Battery",
            "v2": "5", "u2": "Speeds",
            "show_cbl": false
        }"#;
        let svg = render_project(project, CardRenderOptions::default(), CardImages::default())
            .expect("project should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains(">mAh</tspan>"));
        assert!(svg.contains(">Speeds</tspan>"));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn unknown_template_is_reported() {
        let err = render_project(
            r#"{ "template": "Z" }"#,
            CardRenderOptions::default(),
            CardImages::default(),
        )
        .unwrap_err();
        assert!(err.contains('Z'));
    }
}
