use std::sync::Arc;

/// Axis-aligned rectangle in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

/// Where a photo's full bitmap lands before clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipShape {
    Rect(Rect),
    Circle(Circle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
    pub dasharray: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// A piece of one text line with its own size. Consecutive spans render
/// back to back on the same baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub font_size: f32,
}

/// A single horizontally centered line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub font_family: String,
    pub weight: FontWeight,
    pub fill: String,
    pub spans: Vec<TextSpan>,
}

impl TextRun {
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub data: Arc<[u8]>,
    pub mime: &'static str,
}

/// One drawing instruction. Later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: String,
    },
    Image {
        clip: ClipShape,
        placement: Placement,
        image: EmbeddedImage,
    },
    Circle {
        circle: Circle,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Text(TextRun),
    Path {
        d: &'static str,
        fill: String,
        scale: f32,
        offset: (f32, f32),
    },
    Group {
        translate: (f32, f32),
        children: Vec<DrawCommand>,
    },
}

/// A fully resolved card, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    /// Depth-first walk over every command, including group children.
    pub fn walk(&self) -> Vec<&DrawCommand> {
        fn visit<'a>(commands: &'a [DrawCommand], out: &mut Vec<&'a DrawCommand>) {
            for command in commands {
                out.push(command);
                if let DrawCommand::Group { children, .. } = command {
                    visit(children, out);
                }
            }
        }
        let mut out = Vec::new();
        visit(&self.commands, &mut out);
        out
    }

    pub fn text_runs(&self) -> Vec<&TextRun> {
        self.walk()
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::Text(run) => Some(run),
                _ => None,
            })
            .collect()
    }
}
