//! Card export.
//!
//! A rendered frame is encoded to PNG bytes and handed to a [`sink::CardSink`], which yields one
//! scoped [`sink::OutputHandle`] per download.

/// PNG encoding of rendered frames.
pub mod png;
/// Sink trait and built-in sinks.
pub mod sink;
