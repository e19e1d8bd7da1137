//! Rasterization of card layouts.

/// Backend trait, frame type and font settings.
pub mod backend;
/// CPU backend implementation.
pub mod cpu;
/// Font discovery and face resolution.
pub mod fonts;
/// Parley text shaping.
pub mod text;
