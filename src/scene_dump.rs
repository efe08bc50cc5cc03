use crate::ir::TemplateId;
use crate::layout::{ClipShape, DrawCommand, Scene};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JSON-friendly view of a composed scene, for debugging layouts.
#[derive(Debug, Serialize)]
pub struct SceneDump {
    pub template: String,
    pub width: f32,
    pub height: f32,
    pub commands: Vec<CommandDump>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandDump {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: String,
    },
    Image {
        clip: ClipDump,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        mime: String,
        bytes: usize,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Option<String>,
        stroke: Option<String>,
        dashed: bool,
    },
    Text {
        x: f32,
        y: f32,
        font_size: f32,
        weight: String,
        fill: String,
        spans: Vec<(String, f32)>,
    },
    Path {
        fill: String,
        scale: f32,
    },
    Group {
        translate: [f32; 2],
        children: Vec<CommandDump>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ClipDump {
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Circle { cx: f32, cy: f32, r: f32 },
}

impl SceneDump {
    pub fn from_scene(scene: &Scene, template: TemplateId) -> Self {
        SceneDump {
            template: template.to_string(),
            width: scene.width,
            height: scene.height,
            commands: scene.commands.iter().map(dump_command).collect(),
        }
    }
}

fn dump_command(command: &DrawCommand) -> CommandDump {
    match command {
        DrawCommand::Rect { rect, fill } => CommandDump::Rect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            fill: fill.clone(),
        },
        DrawCommand::Image {
            clip,
            placement,
            image,
        } => CommandDump::Image {
            clip: match clip {
                ClipShape::Rect(r) => ClipDump::Rect {
                    x: r.x,
                    y: r.y,
                    width: r.width,
                    height: r.height,
                },
                ClipShape::Circle(c) => ClipDump::Circle {
                    cx: c.cx,
                    cy: c.cy,
                    r: c.r,
                },
            },
            x: placement.x,
            y: placement.y,
            width: placement.width,
            height: placement.height,
            mime: image.mime.to_string(),
            bytes: image.data.len(),
        },
        DrawCommand::Circle {
            circle,
            fill,
            stroke,
        } => CommandDump::Circle {
            cx: circle.cx,
            cy: circle.cy,
            r: circle.r,
            fill: fill.clone(),
            stroke: stroke.as_ref().map(|s| s.color.clone()),
            dashed: stroke.as_ref().is_some_and(|s| s.dasharray.is_some()),
        },
        DrawCommand::Text(run) => CommandDump::Text {
            x: run.x,
            y: run.y,
            font_size: run.font_size,
            weight: run.weight.as_str().to_string(),
            fill: run.fill.clone(),
            spans: run
                .spans
                .iter()
                .map(|span| (span.text.clone(), span.font_size))
                .collect(),
        },
        DrawCommand::Path { fill, scale, .. } => CommandDump::Path {
            fill: fill.clone(),
            scale: *scale,
        },
        DrawCommand::Group {
            translate,
            children,
        } => CommandDump::Group {
            translate: [translate.0, translate.1],
            children: children.iter().map(dump_command).collect(),
        },
    }
}

pub fn write_scene_dump(path: &Path, scene: &Scene, template: TemplateId) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = SceneDump::from_scene(scene, template);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
