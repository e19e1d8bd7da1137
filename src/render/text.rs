use std::collections::HashMap;

use crate::card::layout::{TextAlign, TextStyle};
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::render::fonts::{FaceKey, ResolvedFont};

/// Brush carried through Parley layout runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel (straight alpha).
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A shaped single line of text plus where to put it.
pub struct PlacedLine {
    /// Shaped layout in layout-local coordinates.
    pub layout: parley::Layout<TextBrushRgba8>,
    /// Translation from layout space to canvas space.
    pub offset: (f64, f64),
    /// Measured advance width.
    pub width: f32,
}

/// Stateful helper for building Parley layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<FaceKey, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, key: FaceKey, font: &ResolvedFont) -> CardResult<String> {
        if let Some(name) = self.families.get(&key) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CardError::font("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::font("registered font family has no name"))?
            .to_string();

        self.families.insert(key, name.clone());
        Ok(name)
    }

    /// Shape one unwrapped line and compute its placement.
    ///
    /// `origin.y` is the baseline. The horizontal offset follows `align`, using the measured width.
    pub fn layout_line(
        &mut self,
        text: &str,
        style: &TextStyle,
        font: &ResolvedFont,
        brush: TextBrushRgba8,
        origin: Point,
        align: TextAlign,
    ) -> CardResult<PlacedLine> {
        let size_px = style.size_px;
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(FaceKey::from(style), font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(font.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::FontStyle(if font.italic {
            parley::style::FontStyle::Italic
        } else {
            parley::style::FontStyle::Normal
        }));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let width = layout.width();
        let baseline = layout
            .lines()
            .next()
            .map(|l| l.metrics().baseline)
            .unwrap_or(size_px);

        let x = match align {
            TextAlign::Left => origin.x,
            TextAlign::Center => origin.x - f64::from(width) / 2.0,
            TextAlign::Right => origin.x - f64::from(width),
        };
        let y = origin.y - f64::from(baseline);

        Ok(PlacedLine {
            layout,
            offset: (x, y),
            width,
        })
    }
}
