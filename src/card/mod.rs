//! The access card: theme literals, the declarative layout and the download file name.

/// Download file name derivation.
pub mod filename;
/// Ordered draw commands for one record.
pub mod layout;
/// Palette, strings and geometry of the card.
pub mod theme;
