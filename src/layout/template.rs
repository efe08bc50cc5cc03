use crate::ir::{InsetBox, TemplateId};

use super::Rect;

pub const CANVAS_SIZE: f32 = 1080.0;
/// Badge radius at badge zoom 1.0.
pub const BADGE_RADIUS: f32 = 80.0;
/// Vertical gap between stacked badges; the column step follows the radius.
const BADGE_COLUMN_GAP: f32 = 35.0;
/// Horizontal badge rows use a fixed step that ignores badge zoom.
const BADGE_ROW_STEP: f32 = 210.0;
const BADGE_SLOTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BadgeLayout {
    Column { x: f32, start_y: f32 },
    Row { y: f32, start_x: f32, step: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: TemplateId,
    /// One rectangle, or two side by side for the split layout.
    pub primary: &'static [Rect],
    pub badges: BadgeLayout,
    pub cable_anchor: (f32, f32),
    /// Default boxes for the circular insets; a single entry means the
    /// second secondary photo fills the second primary rectangle instead.
    pub insets: &'static [InsetBox],
}

impl Template {
    pub fn uses_second_inset(&self) -> bool {
        self.insets.len() > 1
    }

    /// Badge centers in drawing order for a given badge radius.
    pub fn badge_anchors(&self, badge_radius: f32) -> Vec<(f32, f32)> {
        (0..BADGE_SLOTS)
            .map(|idx| {
                let i = idx as f32;
                match self.badges {
                    BadgeLayout::Column { x, start_y } => {
                        (x, start_y + i * (badge_radius * 2.0 + BADGE_COLUMN_GAP))
                    }
                    BadgeLayout::Row { y, start_x, step } => (start_x + i * step, y),
                }
            })
            .collect()
    }

    pub fn default_inset(&self, idx: usize) -> Option<InsetBox> {
        self.insets.get(idx).copied()
    }
}

const fn row(y: f32) -> BadgeLayout {
    BadgeLayout::Row {
        y,
        start_x: 150.0,
        step: BADGE_ROW_STEP,
    }
}

static TEMPLATES: [Template; 6] = [
    Template {
        id: TemplateId::A,
        primary: &[Rect::new(260.0, 60.0, 480.0, 960.0)],
        badges: BadgeLayout::Column {
            x: 120.0,
            start_y: 140.0,
        },
        cable_anchor: (120.0, 900.0),
        insets: &[InsetBox::new(900, 220, 150), InsetBox::new(900, 660, 150)],
    },
    Template {
        id: TemplateId::B,
        primary: &[Rect::new(80.0, 60.0, 550.0, 750.0)],
        badges: row(930.0),
        cable_anchor: (930.0, 910.0),
        insets: &[InsetBox::new(855, 250, 150), InsetBox::new(855, 640, 150)],
    },
    Template {
        id: TemplateId::C,
        primary: &[Rect::new(80.0, 260.0, 550.0, 750.0)],
        badges: row(130.0),
        cable_anchor: (930.0, 130.0),
        insets: &[InsetBox::new(855, 450, 150), InsetBox::new(855, 830, 150)],
    },
    Template {
        id: TemplateId::D,
        primary: &[Rect::new(400.0, 60.0, 600.0, 750.0)],
        badges: row(930.0),
        cable_anchor: (930.0, 910.0),
        insets: &[InsetBox::new(210, 250, 150), InsetBox::new(210, 640, 150)],
    },
    Template {
        id: TemplateId::E,
        primary: &[
            Rect::new(60.0, 100.0, 460.0, 700.0),
            Rect::new(560.0, 100.0, 460.0, 700.0),
        ],
        badges: row(930.0),
        cable_anchor: (930.0, 910.0),
        insets: &[InsetBox::new(540, 450, 120)],
    },
    Template {
        id: TemplateId::F,
        primary: &[Rect::new(140.0, 60.0, 800.0, 750.0)],
        badges: row(930.0),
        cable_anchor: (930.0, 910.0),
        insets: &[InsetBox::new(150, 200, 110), InsetBox::new(930, 200, 110)],
    },
];

pub fn template(id: TemplateId) -> &'static Template {
    let idx = match id {
        TemplateId::A => 0,
        TemplateId::B => 1,
        TemplateId::C => 2,
        TemplateId::D => 3,
        TemplateId::E => 4,
        TemplateId::F => 5,
    };
    &TEMPLATES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_indexed_by_id() {
        for id in TemplateId::ALL {
            assert_eq!(template(id).id, id);
        }
    }

    #[test]
    fn template_a_column_matches_table() {
        let anchors = template(TemplateId::A).badge_anchors(BADGE_RADIUS);
        assert_eq!(
            anchors,
            vec![(120.0, 140.0), (120.0, 335.0), (120.0, 530.0), (120.0, 725.0)]
        );
    }

    #[test]
    fn template_a_column_follows_badge_zoom() {
        let anchors = template(TemplateId::A).badge_anchors(BADGE_RADIUS * 1.2);
        let step = anchors[1].1 - anchors[0].1;
        assert!((step - (2.0 * 96.0 + 35.0)).abs() < 1e-4);
    }

    #[test]
    fn rows_keep_fixed_step() {
        for id in [TemplateId::B, TemplateId::D, TemplateId::E, TemplateId::F] {
            let t = template(id);
            assert_eq!(
                t.badge_anchors(BADGE_RADIUS * 1.2),
                vec![(150.0, 930.0), (360.0, 930.0), (570.0, 930.0), (780.0, 930.0)]
            );
            assert_eq!(t.cable_anchor, (930.0, 910.0));
        }
        let c = template(TemplateId::C);
        assert_eq!(c.badge_anchors(BADGE_RADIUS)[3], (780.0, 130.0));
        assert_eq!(c.cable_anchor, (930.0, 130.0));
    }

    #[test]
    fn primary_regions_match_table() {
        assert_eq!(template(TemplateId::A).primary, &[Rect::new(260.0, 60.0, 480.0, 960.0)]);
        assert_eq!(template(TemplateId::D).primary, &[Rect::new(400.0, 60.0, 600.0, 750.0)]);
        assert_eq!(template(TemplateId::F).primary, &[Rect::new(140.0, 60.0, 800.0, 750.0)]);
        let e = template(TemplateId::E);
        assert_eq!(e.primary.len(), 2);
        assert_eq!(e.primary[1], Rect::new(560.0, 100.0, 460.0, 700.0));
    }

    #[test]
    fn only_split_layout_drops_second_inset() {
        for id in TemplateId::ALL {
            assert_eq!(template(id).uses_second_inset(), id != TemplateId::E);
        }
        assert!(template(TemplateId::E).default_inset(1).is_none());
    }
}
