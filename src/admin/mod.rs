//! Read-only listing of persisted RSVP rows.

/// Row model and store implementations.
pub mod store;
/// Plain-text table rendering.
pub mod table;
