use crate::config::RenderConfig;
use crate::error::{CardError, CardResult};
use crate::layout::{ClipShape, DrawCommand, EmbeddedImage, Scene, Stroke, TextRun};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Serialize a composed scene to a standalone SVG document.
///
/// Commands are written in order, so later ones paint on top. Images are
/// inlined as base64 `data:` URIs.
pub fn render_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let width = scene.width;
    let height = scene.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    let mut next_clip = 0usize;
    for command in &scene.commands {
        push_command(&mut svg, command, &mut next_clip);
    }

    svg.push_str("</svg>");
    tracing::debug!(bytes = svg.len(), "serialized card svg");
    svg
}

fn push_command(svg: &mut String, command: &DrawCommand, next_clip: &mut usize) {
    match command {
        DrawCommand::Rect { rect, fill } => {
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                escape_xml(fill)
            ));
        }
        DrawCommand::Image {
            clip,
            placement,
            image,
        } => {
            let clip_id = format!("clip-{}", *next_clip);
            *next_clip += 1;
            svg.push_str(&format!("<defs><clipPath id=\"{clip_id}\">"));
            svg.push_str(&clip_shape_svg(clip));
            svg.push_str("</clipPath></defs>");
            svg.push_str(&format!(
                "<g clip-path=\"url(#{clip_id})\"><image x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" preserveAspectRatio=\"none\" xlink:href=\"{}\"/></g>",
                placement.x,
                placement.y,
                placement.width,
                placement.height,
                data_uri(image)
            ));
        }
        DrawCommand::Circle {
            circle,
            fill,
            stroke,
        } => {
            let fill = fill.as_deref().map(escape_xml).unwrap_or_else(|| "none".to_string());
            svg.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"{}/>",
                circle.cx,
                circle.cy,
                circle.r,
                fill,
                stroke.as_ref().map(stroke_attrs).unwrap_or_default()
            ));
        }
        DrawCommand::Text(run) => svg.push_str(&text_run_svg(run)),
        DrawCommand::Path {
            d,
            fill,
            scale,
            offset,
        } => {
            svg.push_str(&format!(
                "<path d=\"{}\" fill=\"{}\" transform=\"scale({}) translate({} {})\"/>",
                d,
                escape_xml(fill),
                scale,
                offset.0,
                offset.1
            ));
        }
        DrawCommand::Group {
            translate,
            children,
        } => {
            svg.push_str(&format!(
                "<g transform=\"translate({:.2} {:.2})\">",
                translate.0, translate.1
            ));
            for child in children {
                push_command(svg, child, next_clip);
            }
            svg.push_str("</g>");
        }
    }
}

fn clip_shape_svg(clip: &ClipShape) -> String {
    match clip {
        ClipShape::Rect(rect) => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/>",
            rect.x, rect.y, rect.width, rect.height
        ),
        ClipShape::Circle(circle) => format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>",
            circle.cx, circle.cy, circle.r
        ),
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        " stroke=\"{}\" stroke-width=\"{}\"",
        escape_xml(&stroke.color),
        stroke.width
    );
    if let Some(dash) = &stroke.dasharray {
        attrs.push_str(&format!(" stroke-dasharray=\"{}\"", escape_xml(dash)));
    }
    attrs
}

fn text_run_svg(run: &TextRun) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{:.2}\" font-weight=\"{}\" fill=\"{}\" xml:space=\"preserve\">",
        run.x,
        run.y,
        escape_xml(&run.font_family),
        run.font_size,
        run.weight.as_str(),
        escape_xml(&run.fill)
    ));
    for span in &run.spans {
        if span.font_size == run.font_size {
            text.push_str(&format!("<tspan>{}</tspan>", escape_xml(&span.text)));
        } else {
            text.push_str(&format!(
                "<tspan font-size=\"{:.2}\">{}</tspan>",
                span.font_size,
                escape_xml(&span.text)
            ));
        }
    }
    text.push_str("</text>");
    text
}

fn data_uri(image: &EmbeddedImage) -> String {
    format!(
        "data:{};base64,{}",
        image.mime,
        BASE64_STANDARD.encode(&image.data)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

/// Rasterize an SVG card to PNG or JPEG bytes at the configured size.
#[cfg(feature = "raster")]
pub fn encode_raster(svg: &str, format: RasterFormat, render_cfg: &RenderConfig) -> CardResult<Vec<u8>> {
    let pixmap = rasterize(svg, render_cfg)?;
    match format {
        RasterFormat::Png => pixmap
            .encode_png()
            .map_err(|err| CardError::raster(format!("failed to encode PNG: {err}"))),
        RasterFormat::Jpeg => encode_jpeg(&pixmap, render_cfg.jpeg_quality),
    }
}

#[cfg(not(feature = "raster"))]
pub fn encode_raster(_svg: &str, _format: RasterFormat, _render_cfg: &RenderConfig) -> CardResult<Vec<u8>> {
    Err(CardError::RasterUnavailable)
}

#[cfg(feature = "raster")]
fn rasterize(svg: &str, render_cfg: &RenderConfig) -> CardResult<resvg::tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Arial".to_string();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|err| CardError::raster(err.to_string()))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(render_cfg.width, render_cfg.height)
        .ok_or_else(|| CardError::raster("failed to allocate pixmap"))?;
    // JPEG has no alpha; start from an opaque canvas.
    pixmap.fill(resvg::tiny_skia::Color::WHITE);

    let size = tree.size();
    let transform = resvg::tiny_skia::Transform::from_scale(
        render_cfg.width as f32 / size.width(),
        render_cfg.height as f32 / size.height(),
    );
    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, transform, &mut pixmap_mut);
    Ok(pixmap)
}

#[cfg(feature = "raster")]
fn encode_jpeg(pixmap: &resvg::tiny_skia::Pixmap, quality: u8) -> CardResult<Vec<u8>> {
    let (w, h) = (pixmap.width(), pixmap.height());
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    for (src, dst) in pixmap.data().chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst.copy_from_slice(&src[..3]);
    }

    let mut out = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|err| CardError::raster(format!("failed to encode JPEG: {err}")))?;
    Ok(out)
}

pub fn write_output_raster(
    svg: &str,
    output: &Path,
    format: RasterFormat,
    render_cfg: &RenderConfig,
) -> CardResult<()> {
    let bytes = encode_raster(svg, format, render_cfg)?;
    std::fs::write(output, bytes)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
