use crate::card::filename::card_filename;
use crate::card::layout::{CardLayout, build_card};
use crate::card::theme::CardTheme;
use crate::encode::png::encode_png;
use crate::encode::sink::{CardSink, SavedCard};
use crate::foundation::error::CardResult;
use crate::render::backend::{CardBackend, FrameRGBA};
use crate::rsvp::form::RsvpForm;
use crate::rsvp::record::RsvpRecord;
use crate::share::{Notice, Notifier};

/// Controller for one visitor: the form draft, the current record and the card pipeline.
///
/// The session owns all of its state. A new submission replaces the current record; downloads
/// never consume it, so repeated downloads yield identical files.
pub struct InviteSession<B: CardBackend, N: Notifier> {
    form: RsvpForm,
    current: Option<RsvpRecord>,
    theme: CardTheme,
    backend: B,
    notifier: N,
}

impl<B: CardBackend, N: Notifier> InviteSession<B, N> {
    /// Start a session with an empty form and no record.
    pub fn new(theme: CardTheme, backend: B, notifier: N) -> Self {
        Self {
            form: RsvpForm::new(),
            current: None,
            theme,
            backend,
            notifier,
        }
    }

    /// Read-only access to the form.
    pub fn form(&self) -> &RsvpForm {
        &self.form
    }

    /// Edit the form draft.
    pub fn form_mut(&mut self) -> &mut RsvpForm {
        &mut self.form
    }

    /// Card theme in use.
    pub fn theme(&self) -> &CardTheme {
        &self.theme
    }

    /// Notification sink.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Raster backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Last accepted record, if any.
    pub fn current(&self) -> Option<&RsvpRecord> {
        self.current.as_ref()
    }

    /// Submit the draft.
    ///
    /// A rejected draft triggers [`Notice::MissingFields`] and changes nothing. An accepted one
    /// becomes the current record and triggers [`Notice::Registered`].
    pub fn submit(&mut self) -> CardResult<&RsvpRecord> {
        match self.form.submit() {
            Ok(record) => {
                self.notifier.notify(Notice::Registered);
                Ok(self.current.insert(record))
            }
            Err(err) => {
                tracing::debug!(%err, "rsvp rejected");
                self.notifier.notify(Notice::MissingFields);
                Err(err)
            }
        }
    }

    /// Clear the draft and forget the current record.
    pub fn reset(&mut self) {
        self.form.reset();
        self.current = None;
    }

    /// Layout of the current record's card.
    pub fn current_layout(&self) -> Option<CardLayout> {
        self.current
            .as_ref()
            .map(|record| build_card(record, &self.theme))
    }

    /// Rasterize the current record's card.
    pub fn render_current(&mut self) -> CardResult<Option<FrameRGBA>> {
        let Some(layout) = self.current_layout() else {
            return Ok(None);
        };
        self.backend.render(&layout).map(Some)
    }

    /// Render the current card and hand it to `sink` as `RSVP_Card_<name>.png`.
    ///
    /// Without a current record this is a no-op. Failures are logged and reported as `None`;
    /// they never propagate to the caller.
    pub fn download_card(&mut self, sink: &mut dyn CardSink) -> Option<SavedCard> {
        let Some(record) = self.current.as_ref() else {
            tracing::debug!("download requested without a record");
            return None;
        };
        let filename = card_filename(record.name());
        let layout = build_card(record, &self.theme);

        match export(&mut self.backend, &layout, &filename, sink) {
            Ok(saved) => {
                tracing::debug!(file = %saved.filename, bytes = saved.len, "card saved");
                Some(saved)
            }
            Err(err) => {
                tracing::error!(%err, file = %filename, "card download failed");
                None
            }
        }
    }
}

impl<B: CardBackend + std::fmt::Debug, N: Notifier + std::fmt::Debug> std::fmt::Debug
    for InviteSession<B, N>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InviteSession")
            .field("form", &self.form)
            .field("current", &self.current)
            .field("backend", &self.backend)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

fn export(
    backend: &mut dyn CardBackend,
    layout: &CardLayout,
    filename: &str,
    sink: &mut dyn CardSink,
) -> CardResult<SavedCard> {
    let frame = backend.render(layout)?;
    let png = encode_png(&frame)?;
    let mut handle = sink.begin(filename)?;
    handle.write_all(&png)?;
    handle.commit()
}

#[cfg(test)]
#[path = "../../tests/unit/session/invite.rs"]
mod tests;
