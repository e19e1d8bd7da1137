//! Invite link sharing and user-visible notices.
//!
//! Platform services are modeled as single-shot traits. Failures are handled where they occur:
//! a failed share falls back to copying, a failed copy asks the user to copy manually.

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::foundation::error::{CardError, CardResult};

/// Title passed to the platform share sheet.
pub const SHARE_TITLE: &str = "Wedding Invite";

/// A user-visible notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// A submission was rejected because required fields are blank.
    MissingFields,
    /// A submission was accepted.
    Registered,
    /// The invite link is on the clipboard.
    LinkCopied,
    /// The clipboard write failed.
    CopyFailed,
}

impl Notice {
    /// Text shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingFields => "Please fill in all fields",
            Self::Registered => "Thank you for registering!",
            Self::LinkCopied => "Link copied!",
            Self::CopyFailed => "Couldn't copy. Please copy manually.",
        }
    }

    /// Whether the notice reports a failure.
    pub fn is_error(self) -> bool {
        matches!(self, Self::MissingFields | Self::CopyFailed)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives user-visible notices.
pub trait Notifier {
    /// Show `notice` to the user.
    fn notify(&mut self, notice: Notice);
}

/// Text clipboard.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> CardResult<()>;
}

/// Platform share sheet.
pub trait ShareSheet {
    /// Whether sharing is supported at all.
    fn is_available(&self) -> bool;
    /// Offer `url` under `title` to the platform share targets.
    fn share(&mut self, title: &str, url: &str) -> CardResult<()>;
}

/// How a share request ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareOutcome {
    /// Handed to the share sheet.
    Shared,
    /// Copied to the clipboard instead.
    Copied,
    /// Neither worked; the user was asked to copy manually.
    Failed,
}

/// Copy `url` to the clipboard and tell the user how it went.
pub fn copy_link(url: &str, clipboard: &mut dyn Clipboard, notifier: &mut dyn Notifier) -> bool {
    match clipboard.write_text(url) {
        Ok(()) => {
            notifier.notify(Notice::LinkCopied);
            true
        }
        Err(err) => {
            tracing::error!(%err, "copy failed");
            notifier.notify(Notice::CopyFailed);
            false
        }
    }
}

/// Share `url` through the share sheet, falling back to [`copy_link`].
pub fn share_invite(
    url: &str,
    sheet: &mut dyn ShareSheet,
    clipboard: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
) -> ShareOutcome {
    if sheet.is_available() {
        match sheet.share(SHARE_TITLE, url) {
            Ok(()) => return ShareOutcome::Shared,
            Err(err) => tracing::error!(%err, "share failed"),
        }
    }
    if copy_link(url, clipboard, notifier) {
        ShareOutcome::Copied
    } else {
        ShareOutcome::Failed
    }
}

/// Clipboard held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    fail: bool,
}

impl MemoryClipboard {
    /// Empty, working clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard whose writes always fail.
    pub fn failing() -> Self {
        Self {
            contents: None,
            fail: true,
        }
    }

    /// Last written text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> CardResult<()> {
        if self.fail {
            return Err(CardError::Other(anyhow::anyhow!("clipboard unavailable")));
        }
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// Terminal clipboard using the OSC 52 escape sequence.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    /// Clipboard writing escape sequences to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    /// Clipboard on the process' stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> CardResult<()> {
        let payload = STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{payload}\x07")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Share sheet that is never available.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShareSheet;

impl ShareSheet for NoShareSheet {
    fn is_available(&self) -> bool {
        false
    }

    fn share(&mut self, _title: &str, _url: &str) -> CardResult<()> {
        Err(CardError::Other(anyhow::anyhow!("share sheet unavailable")))
    }
}

/// Keeps every notice it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices in arrival order.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.notices.last().copied()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Forwards notices to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!(?notice, "{}", notice.message());
        } else {
            tracing::info!(?notice, "{}", notice.message());
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/share.rs"]
mod tests;
