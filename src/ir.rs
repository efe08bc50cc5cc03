use std::fmt;
use std::str::FromStr;

use crate::assets::ImageAsset;
use crate::error::CardError;
use crate::style::Style;

/// The six fixed card layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateId {
    #[default]
    A,
    B,
    C,
    D,
    E,
    F,
}

impl TemplateId {
    pub const ALL: [TemplateId; 6] = [Self::A, Self::B, Self::C, Self::D, Self::E, Self::F];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            "E" | "e" => Some(Self::E),
            "F" | "f" => Some(Self::F),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        }
    }
}

impl FromStr for TemplateId {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| CardError::UnknownTemplate(s.to_string()))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value/unit pair shown inside a badge. Both fields may span lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSlot {
    pub value: String,
    pub unit: String,
}

impl DataSlot {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }

    /// Raw, untrimmed: a whitespace-only slot still claims a badge.
    pub fn is_active(&self) -> bool {
        !self.value.is_empty() || !self.unit.is_empty()
    }
}

/// Which photo an image, transform or inset box belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoKey {
    Primary,
    Secondary1,
    Secondary2,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardImages {
    pub primary: Option<ImageAsset>,
    pub secondary1: Option<ImageAsset>,
    pub secondary2: Option<ImageAsset>,
}

impl CardImages {
    pub fn get(&self, key: PhotoKey) -> Option<&ImageAsset> {
        match key {
            PhotoKey::Primary => self.primary.as_ref(),
            PhotoKey::Secondary1 => self.secondary1.as_ref(),
            PhotoKey::Secondary2 => self.secondary2.as_ref(),
        }
    }
}

/// User pan/zoom for one photo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub offset_x: i32,
    pub offset_y: i32,
    pub zoom: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CardTransforms {
    pub primary: Transform,
    pub secondary1: Transform,
    pub secondary2: Transform,
}

impl CardTransforms {
    pub fn get(&self, key: PhotoKey) -> Transform {
        match key {
            PhotoKey::Primary => self.primary,
            PhotoKey::Secondary1 => self.secondary1,
            PhotoKey::Secondary2 => self.secondary2,
        }
    }
}

/// Placement of a circular inset on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsetBox {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
}

impl InsetBox {
    pub const fn new(center_x: i32, center_y: i32, radius: i32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }
}

/// `None` keeps the template's default box for that inset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsetBoxes {
    pub secondary1: Option<InsetBox>,
    pub secondary2: Option<InsetBox>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CableInfo {
    pub show: bool,
    pub text: String,
    pub caption: String,
}

impl CableInfo {
    pub fn hidden() -> Self {
        Self {
            show: false,
            text: String::new(),
            caption: String::new(),
        }
    }

    pub fn shown(text: impl Into<String>) -> Self {
        Self {
            show: true,
            text: text.into(),
            caption: String::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.show && !self.text.is_empty()
    }
}

impl Default for CableInfo {
    fn default() -> Self {
        Self::hidden()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsetLabels {
    pub secondary1: String,
    pub secondary2: String,
}

/// Everything needed to compose one card. Built fresh per render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderRequest {
    pub template: TemplateId,
    pub data_slots: Vec<DataSlot>,
    pub images: CardImages,
    pub transforms: CardTransforms,
    pub inset_boxes: InsetBoxes,
    pub style: Style,
    pub cable: CableInfo,
    pub inset_labels: InsetLabels,
}

impl RenderRequest {
    pub fn new(template: TemplateId) -> Self {
        Self {
            template,
            ..Default::default()
        }
    }

    pub fn active_slots(&self) -> impl Iterator<Item = &DataSlot> {
        self.data_slots.iter().filter(|slot| slot.is_active())
    }
}
