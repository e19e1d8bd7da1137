use std::path::PathBuf;

use crate::card::layout::CardLayout;
use crate::foundation::error::CardResult;

/// Environment variable naming an extra directory of font files.
pub const FONT_DIR_ENV: &str = "RSVP_CARD_FONT_DIR";

/// A rendered card as RGBA8 pixels.
///
/// Backends output **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of the pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Font discovery settings for raster backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Load fonts installed on the host.
    pub system_fonts: bool,
    /// Extra directories scanned for font files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

impl RenderSettings {
    /// Defaults plus the directory named by [`FONT_DIR_ENV`], when set.
    pub fn from_env() -> Self {
        let mut out = Self::default();
        if let Some(dir) = std::env::var_os(FONT_DIR_ENV).filter(|v| !v.is_empty()) {
            out.font_dirs.push(PathBuf::from(dir));
        }
        out
    }

    /// Add a font directory.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }
}

/// Something that can turn a [`CardLayout`] into pixels.
pub trait CardBackend {
    /// Execute every command of `layout` in order and read back the frame.
    fn render(&mut self, layout: &CardLayout) -> CardResult<FrameRGBA>;
}
