use super::*;
use crate::encode::sink::{InMemorySink, OutputHandle};
use crate::foundation::error::CardError;
use crate::render::cpu::CpuBackend;
use crate::render::fonts::FontBook;
use crate::rsvp::record::Side;
use crate::share::RecordingNotifier;

/// Renders everything but text, so tests run on hosts without fonts.
struct ShapesOnly(CpuBackend);

impl CardBackend for ShapesOnly {
    fn render(&mut self, layout: &CardLayout) -> CardResult<FrameRGBA> {
        self.0.render(&layout.without_text())
    }
}

struct BrokenSink;

impl CardSink for BrokenSink {
    fn begin(&mut self, _filename: &str) -> CardResult<Box<dyn OutputHandle + '_>> {
        Err(CardError::Io(std::io::Error::other("disk full")))
    }
}

fn session() -> InviteSession<ShapesOnly, RecordingNotifier> {
    InviteSession::new(
        CardTheme::default(),
        ShapesOnly(CpuBackend::with_fonts(FontBook::empty())),
        RecordingNotifier::new(),
    )
}

fn fill_ada(s: &mut InviteSession<ShapesOnly, RecordingNotifier>) {
    let form = s.form_mut();
    form.set_name("Ada Lovelace");
    form.set_contact("ada@x.com");
    form.set_side(Some(Side::Bride));
    form.set_guests(2);
}

#[test]
fn rejected_submit_notifies_and_keeps_state() {
    let mut s = session();
    s.form_mut().set_name("Ada Lovelace");
    s.form_mut().set_contact("ada@x.com");

    let err = s.submit().unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
    assert!(s.current().is_none());
    assert_eq!(s.form().draft().name, "Ada Lovelace");
    assert_eq!(s.notifier().notices(), &[Notice::MissingFields]);
}

#[test]
fn accepted_submit_publishes_record() {
    let mut s = session();
    fill_ada(&mut s);
    let record = s.submit().unwrap().clone();
    assert_eq!(record.name(), "Ada Lovelace");
    assert_eq!(record.guests().get(), 2);
    assert_eq!(s.current(), Some(&record));
    assert_eq!(s.form().draft().name, "");
    assert_eq!(s.notifier().last(), Some(Notice::Registered));

    let texts: Vec<String> = s
        .current_layout()
        .unwrap()
        .texts()
        .map(str::to_owned)
        .collect();
    assert!(texts.iter().any(|t| t.contains("Ada Lovelace")));
    assert!(texts.iter().any(|t| t.contains("Bride")));
    assert!(texts.iter().any(|t| t.contains('2')));
}

#[test]
fn later_submission_replaces_record() {
    let mut s = session();
    fill_ada(&mut s);
    s.submit().unwrap();

    let form = s.form_mut();
    form.set_name("Grace Hopper");
    form.set_contact("+1 555 0100");
    form.set_side(Some(Side::Groom));
    s.submit().unwrap();
    assert_eq!(s.current().map(|r| r.name()), Some("Grace Hopper"));
}

#[test]
fn download_without_record_is_noop() {
    let mut s = session();
    let mut sink = InMemorySink::new();
    assert!(s.download_card(&mut sink).is_none());
    assert!(sink.saved().is_empty());
    assert_eq!(sink.released(), 0);
    assert!(s.render_current().unwrap().is_none());
}

#[test]
fn repeated_downloads_are_identical() {
    let mut s = session();
    fill_ada(&mut s);
    s.submit().unwrap();

    let mut sink = InMemorySink::new();
    let first = s.download_card(&mut sink).unwrap();
    let second = s.download_card(&mut sink).unwrap();
    assert_eq!(first.filename, "RSVP_Card_Ada_Lovelace.png");
    assert_eq!(first, second);
    assert_eq!(sink.saved().len(), 2);
    assert_eq!(sink.saved()[0], sink.saved()[1]);
    assert_eq!(sink.released(), 2);
    assert!(s.current().is_some());
}

#[test]
fn download_failures_are_swallowed() {
    let mut s = session();
    fill_ada(&mut s);
    s.submit().unwrap();
    assert!(s.download_card(&mut BrokenSink).is_none());

    // The real backend with no fonts fails on text; still no error escapes.
    let mut fontless = InviteSession::new(
        CardTheme::default(),
        CpuBackend::with_fonts(FontBook::empty()),
        RecordingNotifier::new(),
    );
    fontless.form_mut().set_name("Ada");
    fontless.form_mut().set_contact("ada@x.com");
    fontless.form_mut().set_side(Some(Side::Groom));
    fontless.submit().unwrap();
    let mut sink = InMemorySink::new();
    assert!(fontless.download_card(&mut sink).is_none());
    assert!(sink.saved().is_empty());
}

#[test]
fn reset_clears_record_and_draft() {
    let mut s = session();
    fill_ada(&mut s);
    s.submit().unwrap();
    s.form_mut().set_name("half typed");
    s.reset();
    assert!(s.current().is_none());
    assert_eq!(s.form().draft(), &crate::rsvp::form::RsvpDraft::default());
}
