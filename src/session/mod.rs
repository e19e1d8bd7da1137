//! Session-oriented API tying the form, renderer and exporter together.

/// The invite page controller.
pub mod invite;
