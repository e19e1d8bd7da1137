use std::path::Path;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{CardError, CardResult};

/// One color stop of the background gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Position along the gradient axis in `0.0..=1.0`.
    pub offset: f64,
    /// Stop color.
    pub color: Rgba8,
}

/// A translucent decorative circle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecorCircle {
    /// Center x in canvas pixels.
    pub cx: f64,
    /// Center y in canvas pixels.
    pub cy: f64,
    /// Radius in pixels.
    pub radius: f64,
    /// Fill color, usually translucent.
    pub color: Rgba8,
}

/// Rounded frame drawn last, around the whole card.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BorderStyle {
    /// Inset from each canvas edge.
    pub margin: f64,
    /// Corner radius.
    pub radius: f64,
    /// Stroke width.
    pub width: f64,
    /// Stroke color.
    pub color: Rgba8,
}

/// Every literal the card layout uses: palette, strings and geometry.
///
/// `CardTheme::default()` is the olive/emerald card with a gold frame. A theme can be loaded
/// from JSON; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardTheme {
    /// Output surface size.
    pub canvas: Canvas,
    /// Background stops, top-left to bottom-right.
    pub gradient: Vec<GradientStop>,
    /// Decorative circles, drawn in order over the background.
    pub circles: Vec<DecorCircle>,
    /// Centered title.
    pub title: String,
    /// Title color.
    pub title_color: Rgba8,
    /// Color of the key/value detail block.
    pub detail_color: Rgba8,
    /// Thank-you line under the details.
    pub thanks: String,
    /// Thank-you color.
    pub thanks_color: Rgba8,
    /// Left-aligned footer label.
    pub footer_label: String,
    /// Right-aligned event hashtag.
    pub hashtag: String,
    /// Footer color.
    pub footer_color: Rgba8,
    /// Frame style.
    pub border: BorderStyle,
}

impl Default for CardTheme {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 800,
                height: 600,
            },
            gradient: vec![
                GradientStop {
                    offset: 0.0,
                    color: Rgba8::rgb(0x55, 0x6b, 0x2f),
                },
                GradientStop {
                    offset: 0.5,
                    color: Rgba8::rgb(0x22, 0x8b, 0x22),
                },
                GradientStop {
                    offset: 1.0,
                    color: Rgba8::rgb(0x2e, 0x8b, 0x57),
                },
            ],
            circles: vec![
                DecorCircle {
                    cx: 100.0,
                    cy: 100.0,
                    radius: 60.0,
                    color: Rgba8::rgb_alpha(34, 139, 34, 0.4),
                },
                DecorCircle {
                    cx: 680.0,
                    cy: 480.0,
                    radius: 80.0,
                    color: Rgba8::rgb_alpha(0, 100, 0, 0.3),
                },
            ],
            title: "Wedding Access Card".to_owned(),
            title_color: Rgba8::rgb(0xf0, 0xfd, 0xf4),
            detail_color: Rgba8::rgb(0xff, 0xff, 0xff),
            thanks: "Thank you for blessing us with your presence".to_owned(),
            thanks_color: Rgba8::rgb(0xbb, 0xf7, 0xd0),
            footer_label: "Save this card for entry".to_owned(),
            hashtag: "#OD2025".to_owned(),
            footer_color: Rgba8::rgb(0xe0, 0xf2, 0xe9),
            border: BorderStyle {
                margin: 40.0,
                radius: 30.0,
                width: 5.0,
                color: Rgba8::rgb(0xff, 0xd7, 0x00),
            },
        }
    }
}

impl CardTheme {
    /// Read and validate a theme from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let theme: Self = serde_json::from_slice(&bytes)
            .map_err(|e| CardError::serde(format!("theme '{}': {e}", path.display())))?;
        theme.validate()?;
        Ok(theme)
    }

    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> CardResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;

        if self.gradient.is_empty() {
            return Err(CardError::validation("theme gradient needs at least one stop"));
        }
        let mut prev = 0.0;
        for stop in &self.gradient {
            if !stop.offset.is_finite() || !(0.0..=1.0).contains(&stop.offset) {
                return Err(CardError::validation(
                    "gradient stop offsets must be within 0..=1",
                ));
            }
            if stop.offset < prev {
                return Err(CardError::validation(
                    "gradient stop offsets must be sorted ascending",
                ));
            }
            prev = stop.offset;
        }

        for c in &self.circles {
            if !c.radius.is_finite() || c.radius <= 0.0 {
                return Err(CardError::validation("circle radius must be finite and > 0"));
            }
        }

        let b = &self.border;
        let half_w = f64::from(self.canvas.width) / 2.0;
        let half_h = f64::from(self.canvas.height) / 2.0;
        if !(b.margin >= 0.0 && b.margin < half_w.min(half_h)) {
            return Err(CardError::validation(
                "border margin must leave a non-empty frame",
            ));
        }
        if !(b.width.is_finite() && b.width > 0.0) || !(b.radius.is_finite() && b.radius >= 0.0) {
            return Err(CardError::validation(
                "border width must be > 0 and radius >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/theme.rs"]
mod tests;
