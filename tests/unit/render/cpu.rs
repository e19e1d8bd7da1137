use super::*;
use crate::card::layout::build_card;
use crate::card::theme::CardTheme;
use crate::foundation::core::Canvas;
use crate::rsvp::form::RsvpForm;
use crate::rsvp::record::Side;

fn ada_layout() -> CardLayout {
    let mut form = RsvpForm::new();
    form.set_name("Ada Lovelace");
    form.set_contact("ada@x.com");
    form.set_side(Some(Side::Bride));
    form.set_guests(2);
    build_card(&form.submit().unwrap(), &CardTheme::default())
}

fn shapes_backend() -> CpuBackend {
    CpuBackend::with_fonts(FontBook::empty())
}

fn close(a: [u8; 4], b: [u8; 4], tol: u8) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= tol)
}

#[test]
fn gradient_bake_hits_stops_at_ends_and_middle() {
    let theme = CardTheme::default();
    let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
    let bytes = bake_linear_gradient(
        rect,
        800,
        600,
        Point::new(0.0, 0.0),
        Point::new(800.0, 600.0),
        &theme.gradient,
    )
    .unwrap();
    assert_eq!(bytes.len(), 800 * 600 * 4);

    let at = |x: usize, y: usize| -> [u8; 4] {
        let i = (y * 800 + x) * 4;
        [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
    };
    assert!(close(at(0, 0), [0x55, 0x6b, 0x2f, 255], 1));
    assert!(close(at(799, 599), [0x2e, 0x8b, 0x57, 255], 1));
    assert!(close(at(400, 300), [0x22, 0x8b, 0x22, 255], 2));
}

#[test]
fn gradient_with_single_stop_is_flat() {
    let stops = [GradientStop {
        offset: 0.3,
        color: Rgba8::rgb(10, 20, 30),
    }];
    let bytes = bake_linear_gradient(
        Rect::new(0.0, 0.0, 4.0, 4.0),
        4,
        4,
        Point::new(0.0, 0.0),
        Point::new(4.0, 4.0),
        &stops,
    )
    .unwrap();
    for px in bytes.chunks_exact(4) {
        assert_eq!(px, [10, 20, 30, 255]);
    }
    assert!(
        bake_linear_gradient(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            1,
            1,
            Point::ZERO,
            Point::ZERO,
            &[]
        )
        .is_err()
    );
}

#[test]
fn rounded_rect_path_has_four_quadratic_corners() {
    let path = rounded_rect_path(Rect::new(40.0, 40.0, 760.0, 560.0), 30.0);
    let quads = path
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::QuadTo(..)))
        .count();
    assert_eq!(quads, 4);
    let bb = path.bounding_box();
    for (got, want) in [(bb.x0, 40.0), (bb.y0, 40.0), (bb.x1, 760.0), (bb.y1, 560.0)] {
        assert!((got - want).abs() < 1e-6, "{bb:?}");
    }
}

#[test]
fn shapes_render_gradient_circles_and_border() {
    let layout = ada_layout().without_text();
    let mut backend = shapes_backend();
    let frame = backend.render(&layout).unwrap();

    assert_eq!((frame.width, frame.height), (800, 600));
    assert_eq!(frame.data.len(), 800 * 600 * 4);
    assert!(frame.premultiplied);

    // Corner outside the frame and circles: plain gradient start color.
    assert!(close(frame.pixel(2, 598).unwrap(), frame.pixel(3, 597).unwrap(), 2));
    let corner = frame.pixel(1, 1).unwrap();
    assert!(close(corner, [0x55, 0x6b, 0x2f, 255], 2), "{corner:?}");

    // Gold frame on the left edge.
    let border = frame.pixel(40, 300).unwrap();
    assert!(border[0] > 200 && border[1] > 180 && border[2] < 80, "{border:?}");

    // Opaque up to u8 rounding where the stroke overlaps the translucent circles.
    assert!(frame.data.chunks_exact(4).all(|px| px[3] >= 254));
    assert_eq!(frame.pixel(400, 300).unwrap()[3], 255);
}

#[test]
fn circles_tint_only_their_area() {
    let full = ada_layout().without_text();
    let mut no_circles = full.clone();
    no_circles
        .commands
        .retain(|c| !matches!(c, DrawCmd::FillCircle { .. }));

    let mut backend = shapes_backend();
    let a = backend.render(&full).unwrap();
    let b = backend.render(&no_circles).unwrap();

    assert_ne!(a.pixel(100, 100), b.pixel(100, 100));
    assert_ne!(a.pixel(680, 480), b.pixel(680, 480));
    assert_eq!(a.pixel(400, 300), b.pixel(400, 300));
}

#[test]
fn rendering_is_deterministic() {
    let layout = ada_layout().without_text();
    let a = shapes_backend().render(&layout).unwrap();
    let b = shapes_backend().render(&layout).unwrap();
    assert_eq!(a, b);
}

#[test]
fn text_without_fonts_is_a_font_error() {
    let err = shapes_backend().render(&ada_layout()).unwrap_err();
    assert!(matches!(err, CardError::Font(_)), "{err}");
}

#[test]
fn oversized_canvas_is_a_render_error() {
    let layout = CardLayout {
        canvas: Canvas {
            width: 70_000,
            height: 10,
        },
        commands: Vec::new(),
    };
    let err = shapes_backend().render(&layout).unwrap_err();
    assert!(matches!(err, CardError::Render(_)));
}

#[test]
fn text_draws_pixels_when_fonts_exist() {
    let mut backend = CpuBackend::new(&RenderSettings::from_env());
    if backend.fonts().is_empty() {
        eprintln!("skipping: no fonts on this host");
        return;
    }
    let layout = ada_layout();
    let with_text = backend.render(&layout).unwrap();
    let shapes = backend.render(&layout.without_text()).unwrap();
    assert_ne!(with_text.data, shapes.data);

    let again = backend.render(&layout).unwrap();
    assert_eq!(with_text, again);
}
