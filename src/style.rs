use serde::{Deserialize, Serialize};

/// Global look of a card: colors and scale factors shared by every text and
/// badge element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub font_family: String,
    pub background: String,
    pub value_color: String,
    pub label_color: String,
    pub badge_fill_color: String,
    pub value_zoom: f32,
    pub label_zoom: f32,
    pub badge_zoom: f32,
    pub line_spacing: f32,
}

impl Style {
    pub fn classic() -> Self {
        Self {
            font_family: "Arial".to_string(),
            background: "white".to_string(),
            value_color: "#000000".to_string(),
            label_color: "#000000".to_string(),
            badge_fill_color: "#EFEFEF".to_string(),
            value_zoom: 1.0,
            label_zoom: 1.0,
            badge_zoom: 1.0,
            line_spacing: 1.1,
        }
    }

    pub fn studio() -> Self {
        Self {
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            background: "white".to_string(),
            value_color: "#1C2430".to_string(),
            label_color: "#5B6472".to_string(),
            badge_fill_color: "#E8EEF6".to_string(),
            value_zoom: 1.0,
            label_zoom: 1.0,
            badge_zoom: 1.0,
            line_spacing: 1.15,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "studio" => Some(Self::studio()),
            _ => None,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        assert_eq!(Style::from_name("default"), Some(Style::classic()));
        assert_eq!(Style::from_name("studio"), Some(Style::studio()));
        assert_eq!(Style::from_name("neon"), None);
    }

    #[test]
    fn classic_matches_form_defaults() {
        let style = Style::default();
        assert_eq!(style.value_color, "#000000");
        assert_eq!(style.badge_fill_color, "#EFEFEF");
        assert_eq!(style.badge_zoom, 1.0);
    }
}
