//! Flat key/value project snapshots.
//!
//! A snapshot mirrors the editing form field by field so a session can be
//! saved and reloaded. Photos are not part of it; they are supplied again on
//! load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, CardResult};
use crate::ir::{
    CableInfo, CardImages, CardTransforms, DataSlot, InsetBox, InsetBoxes, InsetLabels,
    RenderRequest, TemplateId, Transform,
};
use crate::style::Style;

const FORM_SLOTS: usize = 4;
/// Caption printed under the cable length when a project does not set one.
pub const DEFAULT_CABLE_CAPTION: &str = "Lunghezza Cavo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSnapshot {
    pub project_id: String,
    pub template: String,

    pub v1: String,
    pub u1: String,
    pub v2: String,
    pub u2: String,
    pub v3: String,
    pub u3: String,
    pub v4: String,
    pub u4: String,

    pub lbl2: String,
    pub lbl3: String,

    pub show_cbl: bool,
    pub cbl_len: String,
    pub cbl_caption: String,

    pub f1_x: i32,
    pub f1_y: i32,
    pub f1_z: f32,
    pub f2_x: i32,
    pub f2_y: i32,
    pub f2_z: f32,
    pub f3_x: i32,
    pub f3_y: i32,
    pub f3_z: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub f2_cx: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f2_cy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f2_r: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f3_cx: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f3_cy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f3_r: Option<i32>,

    // Style keys left out fall back to the configured style. Label color and
    // zoom follow the text ones unless set on their own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_zoom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_zoom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circle_zoom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
}

impl Default for ProjectSnapshot {
    fn default() -> Self {
        Self {
            project_id: "card".to_string(),
            template: TemplateId::A.as_str().to_string(),
            v1: String::new(),
            u1: String::new(),
            v2: String::new(),
            u2: String::new(),
            v3: String::new(),
            u3: String::new(),
            v4: String::new(),
            u4: String::new(),
            lbl2: String::new(),
            lbl3: String::new(),
            show_cbl: true,
            cbl_len: "120 cm".to_string(),
            cbl_caption: DEFAULT_CABLE_CAPTION.to_string(),
            f1_x: 0,
            f1_y: 0,
            f1_z: 1.0,
            f2_x: 0,
            f2_y: 0,
            f2_z: 1.0,
            f3_x: 0,
            f3_y: 0,
            f3_z: 1.0,
            f2_cx: None,
            f2_cy: None,
            f2_r: None,
            f3_cx: None,
            f3_cy: None,
            f3_r: None,
            text_color: None,
            label_color: None,
            circle_color: None,
            text_zoom: None,
            label_zoom: None,
            circle_zoom: None,
            line_spacing: None,
        }
    }
}

impl ProjectSnapshot {
    /// Parse a snapshot, accepting hand-edited JSON5 when strict JSON fails.
    pub fn from_json(input: &str) -> CardResult<Self> {
        match serde_json::from_str(input) {
            Ok(snapshot) => Ok(snapshot),
            Err(strict_err) => json5::from_str(input).map_err(|lenient_err| {
                CardError::Project(format!("{strict_err} (json5: {lenient_err})"))
            }),
        }
    }

    pub fn load(path: &Path) -> CardResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| CardError::Project(err.to_string()))
    }

    pub fn save(&self, path: &Path) -> CardResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn template_id(&self) -> CardResult<TemplateId> {
        self.template.parse()
    }

    pub fn data_slots(&self) -> Vec<DataSlot> {
        [
            (&self.v1, &self.u1),
            (&self.v2, &self.u2),
            (&self.v3, &self.u3),
            (&self.v4, &self.u4),
        ]
        .into_iter()
        .map(|(value, unit)| DataSlot::new(value.as_str(), unit.as_str()))
        .collect()
    }

    pub fn style(&self, base: &Style) -> Style {
        let mut style = base.clone();
        if let Some(color) = &self.text_color {
            style.value_color = color.clone();
            style.label_color = color.clone();
        }
        if let Some(color) = &self.label_color {
            style.label_color = color.clone();
        }
        if let Some(color) = &self.circle_color {
            style.badge_fill_color = color.clone();
        }
        if let Some(zoom) = self.text_zoom {
            style.value_zoom = zoom;
            style.label_zoom = zoom;
        }
        if let Some(zoom) = self.label_zoom {
            style.label_zoom = zoom;
        }
        if let Some(zoom) = self.circle_zoom {
            style.badge_zoom = zoom;
        }
        if let Some(spacing) = self.line_spacing {
            style.line_spacing = spacing;
        }
        style
    }

    /// Build a render request. Unknown template ids are rejected.
    pub fn to_request(&self, images: CardImages, base_style: &Style) -> CardResult<RenderRequest> {
        Ok(RenderRequest {
            template: self.template_id()?,
            data_slots: self.data_slots(),
            images,
            transforms: CardTransforms {
                primary: transform(self.f1_x, self.f1_y, self.f1_z),
                secondary1: transform(self.f2_x, self.f2_y, self.f2_z),
                secondary2: transform(self.f3_x, self.f3_y, self.f3_z),
            },
            inset_boxes: InsetBoxes {
                secondary1: inset_box(self.f2_cx, self.f2_cy, self.f2_r),
                secondary2: inset_box(self.f3_cx, self.f3_cy, self.f3_r),
            },
            style: self.style(base_style),
            cable: CableInfo {
                show: self.show_cbl,
                text: self.cbl_len.clone(),
                caption: self.cbl_caption.clone(),
            },
            inset_labels: InsetLabels {
                secondary1: self.lbl2.clone(),
                secondary2: self.lbl3.clone(),
            },
        })
    }

    /// Snapshot the form-visible parts of a request. Slots past the fourth
    /// have no form field and are not kept.
    pub fn capture(project_id: impl Into<String>, request: &RenderRequest) -> Self {
        let mut slots = request.data_slots.iter().take(FORM_SLOTS).cloned();
        let mut next = || slots.next().unwrap_or_default();
        let (s1, s2, s3, s4) = (next(), next(), next(), next());
        let t = &request.transforms;
        let style = &request.style;
        Self {
            project_id: project_id.into(),
            template: request.template.as_str().to_string(),
            v1: s1.value,
            u1: s1.unit,
            v2: s2.value,
            u2: s2.unit,
            v3: s3.value,
            u3: s3.unit,
            v4: s4.value,
            u4: s4.unit,
            lbl2: request.inset_labels.secondary1.clone(),
            lbl3: request.inset_labels.secondary2.clone(),
            show_cbl: request.cable.show,
            cbl_len: request.cable.text.clone(),
            cbl_caption: request.cable.caption.clone(),
            f1_x: t.primary.offset_x,
            f1_y: t.primary.offset_y,
            f1_z: t.primary.zoom,
            f2_x: t.secondary1.offset_x,
            f2_y: t.secondary1.offset_y,
            f2_z: t.secondary1.zoom,
            f3_x: t.secondary2.offset_x,
            f3_y: t.secondary2.offset_y,
            f3_z: t.secondary2.zoom,
            f2_cx: request.inset_boxes.secondary1.map(|b| b.center_x),
            f2_cy: request.inset_boxes.secondary1.map(|b| b.center_y),
            f2_r: request.inset_boxes.secondary1.map(|b| b.radius),
            f3_cx: request.inset_boxes.secondary2.map(|b| b.center_x),
            f3_cy: request.inset_boxes.secondary2.map(|b| b.center_y),
            f3_r: request.inset_boxes.secondary2.map(|b| b.radius),
            text_color: Some(style.value_color.clone()),
            label_color: Some(style.label_color.clone()),
            circle_color: Some(style.badge_fill_color.clone()),
            text_zoom: Some(style.value_zoom),
            label_zoom: Some(style.label_zoom),
            circle_zoom: Some(style.badge_zoom),
            line_spacing: Some(style.line_spacing),
        }
    }

    /// File name for an export of this project, e.g. `ES-1234.jpg`.
    pub fn file_name(&self, extension: &str) -> String {
        let stem: String = self
            .project_id
            .trim()
            .chars()
            .map(|ch| if matches!(ch, '/' | '\\' | ':' | '\0') { '_' } else { ch })
            .collect();
        let stem = if stem.is_empty() { "card".to_string() } else { stem };
        format!("{stem}.{extension}")
    }
}

fn transform(offset_x: i32, offset_y: i32, zoom: f32) -> Transform {
    Transform {
        offset_x,
        offset_y,
        zoom,
    }
}

fn inset_box(cx: Option<i32>, cy: Option<i32>, r: Option<i32>) -> Option<InsetBox> {
    Some(InsetBox::new(cx?, cy?, r?))
}
