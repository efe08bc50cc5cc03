use crate::style::Style;

use super::TextSpan;

pub const VALUE_FONT_SIZE: f32 = 45.0;
pub const LABEL_FONT_SIZE: f32 = 18.0;
/// Unit suffixes render at this fraction of the value size.
pub const SUFFIX_SCALE: f32 = 0.6;
/// Ascent correction on the first baseline, as a fraction of the value font size.
pub const ASCENT_FACTOR: f32 = 0.8;

/// Trailing unit tokens recognized in badge values. Case-sensitive.
const UNIT_SUFFIXES: &[&str] = &[
    // weight
    "mg", "g", "kg", "Kg", "KG", "t", "lb", "lbs", "oz",
    // length
    "mm", "cm", "m", "km", "in", "ft", "\"",
    // volume
    "ml", "mL", "cl", "dl", "l", "L", "lt",
    // electrical
    "mA", "A", "Ah", "mAh", "V", "kV", "mW", "W", "kW", "Wh", "kWh", "Hz", "kHz", "MHz", "Ω",
    // time
    "ms", "s", "sec", "min", "h", "hr", "hrs",
    // other
    "%", "°", "°C", "°F", "dB", "rpm", "bar", "psi", "Pa", "kPa", "N", "Nm", "MB", "GB", "TB",
];

/// Font sizes and spacing derived from the global style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextScale {
    pub value_font_size: f32,
    pub label_font_size: f32,
    pub line_spacing: f32,
}

impl TextScale {
    pub fn from_style(style: &Style) -> Self {
        Self {
            value_font_size: VALUE_FONT_SIZE * style.value_zoom,
            label_font_size: LABEL_FONT_SIZE * style.label_zoom,
            line_spacing: style.line_spacing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTier {
    Value,
    Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedLine {
    pub tier: LineTier,
    pub baseline: f32,
    pub font_size: f32,
    pub spans: Vec<TextSpan>,
}

/// Split on explicit newlines, trimming each line and dropping blank ones.
pub(super) fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Find the longest recognized unit at the end of `line` that follows a
/// number. Returns `(main, suffix)`; whitespace between them stays in `main`.
pub fn split_unit_suffix(line: &str) -> Option<(&str, &str)> {
    UNIT_SUFFIXES
        .iter()
        .filter(|unit| line.ends_with(**unit))
        .filter_map(|unit| {
            let main = &line[..line.len() - unit.len()];
            let numeric = main
                .trim_end()
                .chars()
                .next_back()
                .is_some_and(|ch| ch.is_ascii_digit());
            numeric.then_some((main, *unit))
        })
        .max_by_key(|(_, unit)| unit.len())
}

pub fn value_spans(line: &str, font_size: f32) -> Vec<TextSpan> {
    match split_unit_suffix(line) {
        Some((main, suffix)) => vec![
            TextSpan {
                text: main.to_string(),
                font_size,
            },
            TextSpan {
                text: suffix.to_string(),
                font_size: font_size * SUFFIX_SCALE,
            },
        ],
        None => vec![TextSpan {
            text: line.to_string(),
            font_size,
        }],
    }
}

/// Lay out a badge's value lines followed by its unit lines, vertically
/// centered on `pivot_y`.
pub fn stack_badge_text(value: &str, unit: &str, pivot_y: f32, scale: TextScale) -> Vec<StackedLine> {
    let mut lines: Vec<(LineTier, f32, Vec<TextSpan>)> = Vec::new();
    for line in split_lines(value) {
        let spans = value_spans(&line, scale.value_font_size);
        lines.push((LineTier::Value, scale.value_font_size, spans));
    }
    for line in split_lines(unit) {
        let spans = vec![TextSpan {
            text: line,
            font_size: scale.label_font_size,
        }];
        lines.push((LineTier::Label, scale.label_font_size, spans));
    }
    if lines.is_empty() {
        return Vec::new();
    }

    let total_height: f32 = lines
        .iter()
        .map(|(_, font_size, _)| font_size * scale.line_spacing)
        .sum();
    let mut cursor = pivot_y - total_height / 2.0 + ASCENT_FACTOR * scale.value_font_size;
    let mut stacked = Vec::with_capacity(lines.len());
    for (tier, font_size, spans) in lines {
        stacked.push(StackedLine {
            tier,
            baseline: cursor,
            font_size,
            spans,
        });
        cursor += font_size * scale.line_spacing;
    }
    stacked
}

/// Lay out plain label lines downward from `first_baseline`.
pub fn stack_label_lines(text: &str, first_baseline: f32, scale: TextScale) -> Vec<StackedLine> {
    let advance = scale.label_font_size * scale.line_spacing;
    split_lines(text)
        .into_iter()
        .enumerate()
        .map(|(idx, line)| StackedLine {
            tier: LineTier::Label,
            baseline: first_baseline + idx as f32 * advance,
            font_size: scale.label_font_size,
            spans: vec![TextSpan {
                text: line,
                font_size: scale.label_font_size,
            }],
        })
        .collect()
}
