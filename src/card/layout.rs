//! Fixed card layout as an ordered list of draw commands.
//!
//! Coordinates are literal positions on the theme canvas (800×600 by default). There is no text
//! measurement or wrapping here; backends only resolve horizontal alignment.

use crate::card::theme::{CardTheme, GradientStop};
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::rsvp::record::RsvpRecord;

/// Generic font family requested by a text command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Decorative script face.
    Cursive,
    /// Plain sans-serif face.
    SansSerif,
    /// Serif face.
    Serif,
}

/// Font weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    Bold,
}

/// Font selection for one text command.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Generic family.
    pub family: FontFamily,
    /// Size in pixels.
    pub size_px: f32,
    /// Weight.
    pub weight: FontWeight,
    /// Italic style.
    pub italic: bool,
}

/// Horizontal anchoring of a text origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Text starts at the origin.
    Left,
    /// Text is centered on the origin.
    Center,
    /// Text ends at the origin.
    Right,
}

/// One drawing step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawCmd {
    /// Fill `rect` with a linear gradient running from `start` to `end`.
    LinearGradient {
        /// Area to fill.
        rect: Rect,
        /// Gradient axis start (offset 0).
        start: Point,
        /// Gradient axis end (offset 1).
        end: Point,
        /// Sorted color stops.
        stops: Vec<GradientStop>,
    },
    /// Fill a circle.
    FillCircle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Straight-alpha fill.
        color: Rgba8,
    },
    /// Draw one line of text. `origin.y` is the baseline.
    Text {
        /// Content.
        text: String,
        /// Anchor point; see `align`.
        origin: Point,
        /// Font selection.
        style: TextStyle,
        /// Fill color.
        color: Rgba8,
        /// Horizontal anchoring.
        align: TextAlign,
    },
    /// Stroke a rounded rectangle.
    StrokeRoundedRect {
        /// Outer bounds of the path (the stroke is centered on it).
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
}

/// A complete card: its canvas and the commands to draw on it, in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CardLayout {
    /// Surface size.
    pub canvas: Canvas,
    /// Commands in paint order.
    pub commands: Vec<DrawCmd>,
}

impl CardLayout {
    /// Text content of every text command, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Copy of the layout without text commands.
    pub fn without_text(&self) -> Self {
        Self {
            canvas: self.canvas,
            commands: self
                .commands
                .iter()
                .filter(|c| !matches!(c, DrawCmd::Text { .. }))
                .cloned()
                .collect(),
        }
    }
}

pub(crate) const TITLE_STYLE: TextStyle = TextStyle {
    family: FontFamily::Cursive,
    size_px: 40.0,
    weight: FontWeight::Bold,
    italic: false,
};

pub(crate) const DETAIL_STYLE: TextStyle = TextStyle {
    family: FontFamily::SansSerif,
    size_px: 28.0,
    weight: FontWeight::Bold,
    italic: false,
};

pub(crate) const THANKS_STYLE: TextStyle = TextStyle {
    family: FontFamily::Serif,
    size_px: 24.0,
    weight: FontWeight::Normal,
    italic: true,
};

pub(crate) const FOOTER_STYLE: TextStyle = TextStyle {
    family: FontFamily::SansSerif,
    size_px: 18.0,
    weight: FontWeight::Bold,
    italic: false,
};

/// Every text style the card uses.
pub const CARD_TEXT_STYLES: [TextStyle; 4] =
    [TITLE_STYLE, DETAIL_STYLE, THANKS_STYLE, FOOTER_STYLE];

const TITLE_Y: f64 = 100.0;
const DETAILS_Y: f64 = 200.0;
const DETAILS_SPACING: f64 = 50.0;
const THANKS_Y: f64 = 420.0;
const FOOTER_Y: f64 = 520.0;
const FOOTER_LEFT_X: f64 = 100.0;
const FOOTER_RIGHT_INSET: f64 = 50.0;

/// Key/value lines printed in the detail block.
pub fn detail_lines(record: &RsvpRecord) -> [(&'static str, String); 4] {
    [
        ("Name", record.name().to_owned()),
        ("Contact", record.contact().to_owned()),
        ("Side", record.side().card_label().to_owned()),
        ("Guests", record.guests().to_string()),
    ]
}

/// Build the card for `record`.
///
/// The command order is fixed: background, circles, title, details, thank-you line, footer,
/// frame. Only text content depends on the record.
pub fn build_card(record: &RsvpRecord, theme: &CardTheme) -> CardLayout {
    let canvas = theme.canvas;
    let full = canvas.rect();
    let cx = canvas.center_x();
    let mut commands = Vec::with_capacity(12);

    commands.push(DrawCmd::LinearGradient {
        rect: full,
        start: Point::new(full.x0, full.y0),
        end: Point::new(full.x1, full.y1),
        stops: theme.gradient.clone(),
    });

    for c in &theme.circles {
        commands.push(DrawCmd::FillCircle {
            center: Point::new(c.cx, c.cy),
            radius: c.radius,
            color: c.color,
        });
    }

    commands.push(DrawCmd::Text {
        text: theme.title.clone(),
        origin: Point::new(cx, TITLE_Y),
        style: TITLE_STYLE,
        color: theme.title_color,
        align: TextAlign::Center,
    });

    for (i, (key, value)) in detail_lines(record).into_iter().enumerate() {
        commands.push(DrawCmd::Text {
            text: format!("{key}: {value}"),
            origin: Point::new(cx, DETAILS_Y + DETAILS_SPACING * i as f64),
            style: DETAIL_STYLE,
            color: theme.detail_color,
            align: TextAlign::Center,
        });
    }

    commands.push(DrawCmd::Text {
        text: theme.thanks.clone(),
        origin: Point::new(cx, THANKS_Y),
        style: THANKS_STYLE,
        color: theme.thanks_color,
        align: TextAlign::Center,
    });

    commands.push(DrawCmd::Text {
        text: theme.footer_label.clone(),
        origin: Point::new(FOOTER_LEFT_X, FOOTER_Y),
        style: FOOTER_STYLE,
        color: theme.footer_color,
        align: TextAlign::Left,
    });
    commands.push(DrawCmd::Text {
        text: theme.hashtag.clone(),
        origin: Point::new(full.x1 - FOOTER_RIGHT_INSET, FOOTER_Y),
        style: FOOTER_STYLE,
        color: theme.footer_color,
        align: TextAlign::Right,
    });

    let b = theme.border;
    commands.push(DrawCmd::StrokeRoundedRect {
        rect: full.inset(-b.margin),
        radius: b.radius,
        width: b.width,
        color: b.color,
    });

    CardLayout { canvas, commands }
}

#[cfg(test)]
#[path = "../../tests/unit/card/layout.rs"]
mod tests;
