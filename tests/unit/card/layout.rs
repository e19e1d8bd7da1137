use super::*;
use crate::rsvp::form::RsvpForm;
use crate::rsvp::record::Side;

fn ada() -> RsvpRecord {
    let mut form = RsvpForm::new();
    form.set_name("Ada Lovelace");
    form.set_contact("ada@x.com");
    form.set_side(Some(Side::Bride));
    form.set_guests(2);
    form.submit().unwrap()
}

#[test]
fn commands_follow_fixed_paint_order() {
    let layout = build_card(&ada(), &CardTheme::default());
    let kinds: Vec<&str> = layout
        .commands
        .iter()
        .map(|c| match c {
            DrawCmd::LinearGradient { .. } => "gradient",
            DrawCmd::FillCircle { .. } => "circle",
            DrawCmd::Text { .. } => "text",
            DrawCmd::StrokeRoundedRect { .. } => "border",
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "gradient", "circle", "circle", "text", "text", "text", "text", "text", "text",
            "text", "text", "border"
        ]
    );
}

#[test]
fn every_record_field_is_on_the_card() {
    let layout = build_card(&ada(), &CardTheme::default());
    let texts: Vec<&str> = layout.texts().collect();
    assert!(texts.contains(&"Name: Ada Lovelace"));
    assert!(texts.contains(&"Contact: ada@x.com"));
    assert!(texts.contains(&"Side: Bride's Side"));
    assert!(texts.contains(&"Guests: 2"));
    assert!(texts.contains(&"Wedding Access Card"));
    assert!(texts.contains(&"#OD2025"));
}

#[test]
fn layout_is_deterministic() {
    let theme = CardTheme::default();
    assert_eq!(build_card(&ada(), &theme), build_card(&ada(), &theme));
}

#[test]
fn anchors_stay_inside_canvas() {
    let theme = CardTheme::default();
    let layout = build_card(&ada(), &theme);
    for cmd in &layout.commands {
        match cmd {
            DrawCmd::Text { origin, style, .. } => {
                assert!(layout.canvas.contains(*origin));
                assert!(origin.y - f64::from(style.size_px) >= 0.0);
            }
            DrawCmd::FillCircle { center, radius, .. } => {
                assert!(layout.canvas.contains(*center));
                assert!(*radius > 0.0);
            }
            DrawCmd::StrokeRoundedRect { rect, width, .. } => {
                assert_eq!(*rect, Rect::new(40.0, 40.0, 760.0, 560.0));
                assert!(rect.x0 - width / 2.0 >= 0.0);
            }
            DrawCmd::LinearGradient { rect, start, end, .. } => {
                assert_eq!(*rect, layout.canvas.rect());
                assert_eq!(*start, Point::new(0.0, 0.0));
                assert_eq!(*end, Point::new(800.0, 600.0));
            }
        }
    }
}

#[test]
fn footer_is_split_left_and_right() {
    let layout = build_card(&ada(), &CardTheme::default());
    let footer: Vec<(TextAlign, f64)> = layout
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCmd::Text {
                origin,
                style,
                align,
                ..
            } if *style == FOOTER_STYLE => Some((*align, origin.x)),
            _ => None,
        })
        .collect();
    assert_eq!(footer, [(TextAlign::Left, 100.0), (TextAlign::Right, 750.0)]);
}

#[test]
fn without_text_keeps_shapes_only() {
    let layout = build_card(&ada(), &CardTheme::default()).without_text();
    assert_eq!(layout.commands.len(), 4);
    assert_eq!(layout.texts().count(), 0);
}

#[test]
fn layout_serializes_to_json() {
    let layout = build_card(&ada(), &CardTheme::default());
    let v = serde_json::to_value(&layout).unwrap();
    assert_eq!(v["canvas"]["width"], 800);
    assert!(v["commands"][0].get("linear_gradient").is_some());
    assert_eq!(v["commands"][3]["text"]["align"], "center");
}
