//! rsvp-card collects wedding RSVPs and renders each one into a printable access card.
//!
//! The public API is session-oriented:
//!
//! - Fill an [`RsvpForm`] draft and submit it into an [`RsvpRecord`]
//! - Turn a record into ordered draw commands with [`build_card`]
//! - Rasterize with [`CpuBackend`] and export through a [`CardSink`]
//!
//! [`InviteSession`] wires those steps together and reports user-visible [`Notice`]s.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Persisted RSVP listing.
pub mod admin;
/// Card theme, layout and file name.
pub mod card;
/// PNG encoding and output sinks.
pub mod encode;
/// Rendering backend(s).
pub mod render;
/// Form input and validated records.
pub mod rsvp;
/// Session-oriented API.
pub mod session;
/// Link sharing and notices.
pub mod share;

pub use crate::foundation::color::parse_hex;
pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::admin::store::{JsonFileStore, MemoryStore, RsvpRow, RsvpStore};
pub use crate::admin::table::render_admin_table;
pub use crate::card::filename::card_filename;
pub use crate::card::layout::{CardLayout, DrawCmd, TextStyle, build_card};
pub use crate::card::theme::CardTheme;
pub use crate::encode::png::encode_png;
pub use crate::encode::sink::{CardSink, DirSink, InMemorySink, OutputHandle, SavedCard};
pub use crate::render::backend::{CardBackend, FrameRGBA, RenderSettings};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::fonts::FontBook;
pub use crate::rsvp::form::{FieldUpdate, RsvpDraft, RsvpForm};
pub use crate::rsvp::record::{GuestCount, RsvpRecord, Side};
pub use crate::session::invite::InviteSession;
pub use crate::share::{
    Clipboard, LogNotifier, MemoryClipboard, NoShareSheet, Notice, Notifier, Osc52Clipboard,
    RecordingNotifier, ShareOutcome, ShareSheet, copy_link, share_invite,
};
