//! RSVP record shape and the form that validates input into it.

/// Draft buffer and submit validation.
pub mod form;
/// The validated record and its field types.
pub mod record;
