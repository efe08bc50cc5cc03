mod fit;
mod template;
mod text;
pub(crate) mod types;
pub use fit::{fit_circle, fit_rect};
pub use template::{BADGE_RADIUS, BadgeLayout, CANVAS_SIZE, Template, template};
pub use text::{
    LineTier, StackedLine, TextScale, split_unit_suffix, stack_badge_text, stack_label_lines,
    value_spans,
};
pub use types::*;

use crate::ir::{PhotoKey, RenderRequest};
use crate::style::Style;

const RING_STROKE_WIDTH: f32 = 3.0;
const RING_DASHARRAY: &str = "12 8";
/// Distance from an inset's bottom edge to its label's first baseline.
const INSET_LABEL_GAP: f32 = 35.0;

const CABLE_ICON_SCALE: f32 = 3.0;
const CABLE_ICON_OFFSET: (f32, f32) = (-12.0, -12.0);
const CABLE_TEXT_SIZE: f32 = 30.0;
const CABLE_TEXT_Y: f32 = 65.0;
const CABLE_CAPTION_SIZE: f32 = 18.0;
const CABLE_CAPTION_Y: f32 = 90.0;

/// 24x24 connector glyph drawn next to the cable length.
pub const CABLE_ICON_PATH: &str = "M 23.52,7.43 22.31,5.67 20.38,4.42 18.21,4.01 16.03,4.44 14.44,5.42 13.21,6.93 12.5,9.07 12.65,11.18 14.26,11.76 13.91,8.97 14.49,7.48 15.45,6.38 17.36,5.45 19.25,5.47 21.38,6.68 22.57,8.87 22.39,11.33 21.06,13.22 19.19,14.13 16.88,14.2 16.55,13.14 13.66,13.04 12.5,12.67 9.36,9.87 5.38,9.75 4.83,10.25 4.78,11.74 0.63,11.74 0.0,12.36 0.63,13.12 4.75,13.12 4.78,16.59 0.45,16.64 0.03,17.5 0.63,18.0 4.73,18.0 4.81,19.46 5.23,19.96 9.51,19.81 12.68,16.97 16.48,16.62 16.91,15.53 19.75,15.31 21.94,14.15 23.07,12.87 23.85,11.01 23.97,9.32 Z";

/// Build the draw list for one card.
///
/// Pure: the same request always yields the same scene.
pub fn compose_card(request: &RenderRequest) -> Scene {
    let layout = template(request.template);
    let style = &request.style;
    let scale = TextScale::from_style(style);

    let mut commands = vec![DrawCommand::Rect {
        rect: Rect::new(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE),
        fill: style.background.clone(),
    }];

    compose_primary(&mut commands, request, layout);
    compose_insets(&mut commands, request, layout, scale);
    compose_badges(&mut commands, request, layout, scale);
    compose_cable(&mut commands, request, layout);

    tracing::debug!(
        template = %request.template,
        commands = commands.len(),
        "composed card"
    );

    Scene {
        width: CANVAS_SIZE,
        height: CANVAS_SIZE,
        commands,
    }
}

fn compose_primary(commands: &mut Vec<DrawCommand>, request: &RenderRequest, layout: &Template) {
    // The split layout feeds the second rectangle from the second secondary photo.
    let keys = [PhotoKey::Primary, PhotoKey::Secondary2];
    for (region, key) in layout.primary.iter().zip(keys) {
        let Some(image) = request.images.get(key) else {
            continue;
        };
        let Some(placement) = fit_rect(*region, Some(image), request.transforms.get(key)) else {
            continue;
        };
        commands.push(DrawCommand::Image {
            clip: ClipShape::Rect(*region),
            placement,
            image: EmbeddedImage {
                data: image.data.clone(),
                mime: image.mime,
            },
        });
    }
}

fn compose_insets(
    commands: &mut Vec<DrawCommand>,
    request: &RenderRequest,
    layout: &Template,
    scale: TextScale,
) {
    let style = &request.style;
    let insets = [
        (
            PhotoKey::Secondary1,
            request.inset_boxes.secondary1,
            &request.inset_labels.secondary1,
        ),
        (
            PhotoKey::Secondary2,
            request.inset_boxes.secondary2,
            &request.inset_labels.secondary2,
        ),
    ];

    for (idx, (key, custom_box, label)) in insets.into_iter().enumerate() {
        if idx > 0 && !layout.uses_second_inset() {
            break;
        }
        let Some(inset) = custom_box.or_else(|| layout.default_inset(idx)) else {
            continue;
        };
        let circle = Circle {
            cx: inset.center_x as f32,
            cy: inset.center_y as f32,
            r: inset.radius as f32,
        };

        let image = request.images.get(key);
        if let (Some(placement), Some(image)) =
            (fit_circle(circle, image, request.transforms.get(key)), image)
        {
            commands.push(DrawCommand::Image {
                clip: ClipShape::Circle(circle),
                placement,
                image: EmbeddedImage {
                    data: image.data.clone(),
                    mime: image.mime,
                },
            });
        }

        commands.push(DrawCommand::Circle {
            circle,
            fill: None,
            stroke: Some(Stroke {
                color: style.label_color.clone(),
                width: RING_STROKE_WIDTH,
                dasharray: Some(RING_DASHARRAY.to_string()),
            }),
        });

        let first_baseline = circle.cy + circle.r + INSET_LABEL_GAP;
        for line in stack_label_lines(label, first_baseline, scale) {
            commands.push(DrawCommand::Text(text_run(
                circle.cx,
                line,
                style,
                FontWeight::Bold,
                &style.label_color,
            )));
        }
    }
}

fn compose_badges(
    commands: &mut Vec<DrawCommand>,
    request: &RenderRequest,
    layout: &Template,
    scale: TextScale,
) {
    let style = &request.style;
    let radius = BADGE_RADIUS * style.badge_zoom;
    let anchors = layout.badge_anchors(radius);

    for (slot, (x, y)) in request.active_slots().zip(anchors) {
        commands.push(DrawCommand::Circle {
            circle: Circle { cx: x, cy: y, r: radius },
            fill: Some(style.badge_fill_color.clone()),
            stroke: None,
        });
        for line in stack_badge_text(&slot.value, &slot.unit, y, scale) {
            let (weight, fill) = match line.tier {
                LineTier::Value => (FontWeight::Bold, &style.value_color),
                LineTier::Label => (FontWeight::Normal, &style.label_color),
            };
            commands.push(DrawCommand::Text(text_run(x, line, style, weight, fill)));
        }
    }
}

fn compose_cable(commands: &mut Vec<DrawCommand>, request: &RenderRequest, layout: &Template) {
    let cable = &request.cable;
    if !cable.is_visible() {
        return;
    }
    let style = &request.style;

    let mut children = vec![
        DrawCommand::Path {
            d: CABLE_ICON_PATH,
            fill: style.value_color.clone(),
            scale: CABLE_ICON_SCALE,
            offset: CABLE_ICON_OFFSET,
        },
        DrawCommand::Text(plain_run(
            CABLE_TEXT_Y,
            &cable.text,
            CABLE_TEXT_SIZE,
            FontWeight::Bold,
            &style.value_color,
            style,
        )),
    ];
    if !cable.caption.is_empty() {
        children.push(DrawCommand::Text(plain_run(
            CABLE_CAPTION_Y,
            &cable.caption,
            CABLE_CAPTION_SIZE,
            FontWeight::Normal,
            &style.label_color,
            style,
        )));
    }

    commands.push(DrawCommand::Group {
        translate: layout.cable_anchor,
        children,
    });
}

fn text_run(x: f32, line: StackedLine, style: &Style, weight: FontWeight, fill: &str) -> TextRun {
    TextRun {
        x,
        y: line.baseline,
        font_size: line.font_size,
        font_family: style.font_family.clone(),
        weight,
        fill: fill.to_string(),
        spans: line.spans,
    }
}

fn plain_run(y: f32, text: &str, font_size: f32, weight: FontWeight, fill: &str, style: &Style) -> TextRun {
    TextRun {
        x: 0.0,
        y,
        font_size,
        font_family: style.font_family.clone(),
        weight,
        fill: fill.to_string(),
        spans: vec![TextSpan {
            text: text.to_string(),
            font_size,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageAsset;
    use crate::ir::{CableInfo, DataSlot, InsetBox, TemplateId, Transform};

    fn photo(width: u32, height: u32) -> ImageAsset {
        ImageAsset::from_parts(vec![1, 2, 3], "image/png", width, height)
    }

    fn badges(scene: &Scene) -> Vec<Circle> {
        scene
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Circle {
                    circle,
                    fill: Some(_),
                    ..
                } => Some(*circle),
                _ => None,
            })
            .collect()
    }

    fn rings(scene: &Scene) -> Vec<Circle> {
        scene
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Circle {
                    circle,
                    stroke: Some(stroke),
                    ..
                } if stroke.dasharray.is_some() => Some(*circle),
                _ => None,
            })
            .collect()
    }

    fn images(scene: &Scene) -> Vec<(ClipShape, Placement)> {
        scene
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Image { clip, placement, .. } => Some((*clip, *placement)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn background_comes_first() {
        let scene = compose_card(&RenderRequest::new(TemplateId::A));
        assert_eq!(scene.width, 1080.0);
        assert_eq!(scene.height, 1080.0);
        match &scene.commands[0] {
            DrawCommand::Rect { rect, fill } => {
                assert_eq!(*rect, Rect::new(0.0, 0.0, 1080.0, 1080.0));
                assert_eq!(fill, "white");
            }
            other => panic!("expected background rect, got {other:?}"),
        }
    }

    #[test]
    fn only_active_slots_claim_anchors_in_order() {
        let mut request = RenderRequest::new(TemplateId::B);
        request.data_slots = vec![
            DataSlot::new("", ""),
            DataSlot::new("5", "Kg"),
            DataSlot::new("", "Lbl"),
            DataSlot::new("", ""),
        ];
        let scene = compose_card(&request);
        let circles = badges(&scene);
        assert_eq!(circles.len(), 2);
        assert_eq!((circles[0].cx, circles[0].cy), (150.0, 930.0));
        assert_eq!((circles[1].cx, circles[1].cy), (360.0, 930.0));

        let texts: Vec<String> = scene.text_runs().iter().map(|run| run.plain_text()).collect();
        assert_eq!(texts, vec!["5", "Kg", "Lbl"]);
        let lbl = scene.text_runs()[2];
        assert_eq!(lbl.x, 360.0);
        // 930 - 18 * 1.1 / 2 + 0.8 * 45
        assert!((lbl.y - 956.1).abs() < 1e-3);
    }

    #[test]
    fn extra_slots_are_dropped() {
        let mut request = RenderRequest::new(TemplateId::A);
        request.data_slots = (0..6).map(|i| DataSlot::new(i.to_string(), "")).collect();
        let scene = compose_card(&request);
        let circles = badges(&scene);
        assert_eq!(circles.len(), 4);
        assert!(circles.iter().all(|c| c.cx == 120.0));
        assert_eq!(circles[3].cy, 725.0);
    }

    #[test]
    fn whitespace_slot_draws_empty_badge() {
        let mut request = RenderRequest::new(TemplateId::A);
        request.data_slots = vec![DataSlot::new("  ", ""), DataSlot::new("7", "")];
        let scene = compose_card(&request);
        assert_eq!(badges(&scene).len(), 2);
        let runs = scene.text_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].y.round(), (335.0_f32 - 45.0 * 1.1 / 2.0 + 36.0).round());
    }

    #[test]
    fn badge_radius_follows_zoom() {
        let mut request = RenderRequest::new(TemplateId::D);
        request.style.badge_zoom = 1.2;
        request.data_slots = vec![DataSlot::new("1", "")];
        let circle = badges(&compose_card(&request))[0];
        assert!((circle.r - 96.0).abs() < 1e-4);
    }

    #[test]
    fn value_unit_split_only_applies_to_value_field() {
        let mut request = RenderRequest::new(TemplateId::A);
        request.data_slots = vec![DataSlot::new("50Kg", "10Kg")];
        let scene = compose_card(&request);
        let runs = scene.text_runs();
        assert_eq!(runs[0].spans.len(), 2);
        assert_eq!(runs[0].weight, FontWeight::Bold);
        assert_eq!(runs[1].spans.len(), 1);
        assert_eq!(runs[1].weight, FontWeight::Normal);
    }

    #[test]
    fn inset_ring_is_drawn_without_image() {
        let mut request = RenderRequest::new(TemplateId::A);
        request.inset_labels.secondary1 = "Detail".to_string();
        let scene = compose_card(&request);
        let rings = rings(&scene);
        assert_eq!(rings.len(), 2);
        assert_eq!((rings[0].cx, rings[0].cy, rings[0].r), (900.0, 220.0, 150.0));
        assert!(images(&scene).is_empty());

        let label = scene
            .text_runs()
            .into_iter()
            .find(|run| run.plain_text() == "Detail")
            .unwrap();
        assert_eq!((label.x, label.y), (900.0, 220.0 + 150.0 + 35.0));
    }

    #[test]
    fn custom_inset_box_overrides_template_default() {
        let mut request = RenderRequest::new(TemplateId::B);
        request.inset_boxes.secondary2 = Some(InsetBox::new(500, 500, 90));
        request.images.secondary2 = Some(photo(300, 200));
        request.transforms.secondary2 = Transform {
            offset_x: 10,
            offset_y: 0,
            zoom: 1.0,
        };
        let scene = compose_card(&request);
        let rings = rings(&scene);
        assert_eq!((rings[1].cx, rings[1].cy, rings[1].r), (500.0, 500.0, 90.0));
        let (clip, placement) = images(&scene)[0];
        assert!(matches!(clip, ClipShape::Circle(c) if c.r == 90.0));
        assert!((placement.height - 180.0).abs() < 1e-4);
        assert!((placement.x - (500.0 - 135.0 + 10.0)).abs() < 1e-4);
    }

    #[test]
    fn missing_primary_photo_draws_nothing() {
        let scene = compose_card(&RenderRequest::new(TemplateId::F));
        assert!(
            !scene
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Image { clip: ClipShape::Rect(_), .. }))
        );
    }

    #[test]
    fn split_layout_uses_second_secondary_photo_for_right_rect() {
        let mut request = RenderRequest::new(TemplateId::E);
        request.images.primary = Some(photo(460, 700));
        request.images.secondary2 = Some(photo(920, 1400));
        let scene = compose_card(&request);
        let placed = images(&scene);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].0, ClipShape::Rect(Rect::new(60.0, 100.0, 460.0, 700.0)));
        assert_eq!(placed[1].0, ClipShape::Rect(Rect::new(560.0, 100.0, 460.0, 700.0)));
        assert!((placed[1].1.width - 460.0).abs() < 1e-3);
        // Only the first inset remains in the split layout.
        assert_eq!(rings(&scene).len(), 1);
    }

    #[test]
    fn cable_group_sits_at_template_anchor() {
        let mut request = RenderRequest::new(TemplateId::C);
        request.cable = CableInfo {
            show: true,
            text: "2 m".to_string(),
            caption: "Cable length".to_string(),
        };
        let scene = compose_card(&request);
        let Some(DrawCommand::Group { translate, children }) = scene.commands.last() else {
            panic!("cable group should be drawn last");
        };
        assert_eq!(*translate, (930.0, 130.0));
        assert_eq!(children.len(), 3);
        assert!(matches!(children[0], DrawCommand::Path { scale, .. } if scale == 3.0));
        match &children[1] {
            DrawCommand::Text(run) => {
                // Cable text never gets the unit split.
                assert_eq!(run.spans.len(), 1);
                assert_eq!(run.plain_text(), "2 m");
                assert_eq!(run.y, 65.0);
            }
            other => panic!("expected cable text, got {other:?}"),
        }
    }

    #[test]
    fn hidden_or_empty_cable_is_skipped() {
        let mut request = RenderRequest::new(TemplateId::A);
        request.cable = CableInfo::shown("");
        assert!(
            !compose_card(&request)
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Group { .. }))
        );
    }

    #[test]
    fn composing_twice_is_identical() {
        let mut request = RenderRequest::new(TemplateId::D);
        request.images.primary = Some(photo(1200, 800));
        request.data_slots = vec![DataSlot::new("3.5kWh", "Battery")];
        request.cable = CableInfo::shown("1.5 m");
        assert_eq!(compose_card(&request), compose_card(&request));
    }
}
