use super::*;

fn filled() -> RsvpForm {
    let mut form = RsvpForm::new();
    form.set_name("Ada Lovelace");
    form.set_contact("ada@x.com");
    form.set_side(Some(Side::Bride));
    form.set_guests(2);
    form
}

#[test]
fn valid_submission_builds_exact_record_and_resets_draft() {
    let mut form = filled();
    let record = form.submit().unwrap();

    assert_eq!(record.name(), "Ada Lovelace");
    assert_eq!(record.contact(), "ada@x.com");
    assert_eq!(record.side(), Side::Bride);
    assert_eq!(record.guests().get(), 2);
    assert_eq!(form.draft(), &RsvpDraft::default());
}

#[test]
fn missing_side_is_rejected_and_draft_kept() {
    let mut form = filled();
    form.set_side(None);
    let before = form.draft().clone();

    let err = form.submit().unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
    assert!(err.to_string().contains("side"));
    assert_eq!(form.draft(), &before);
}

#[test]
fn every_missing_combination_is_rejected() {
    for mask in 1u8..8 {
        let mut form = filled();
        if mask & 1 != 0 {
            form.set_name("");
        }
        if mask & 2 != 0 {
            form.set_contact("   ");
        }
        if mask & 4 != 0 {
            form.set_side(None);
        }
        let before = form.draft().clone();
        assert!(form.submit().is_err(), "mask {mask} should fail");
        assert_eq!(form.draft(), &before);
        assert_eq!(form.draft().missing_fields().len(), mask.count_ones() as usize);
    }
}

#[test]
fn guest_count_is_clamped_on_submit() {
    let mut form = filled();
    form.set_guests(9);
    assert_eq!(form.submit().unwrap().guests().get(), 5);

    let mut form = filled();
    form.set_guests(0);
    assert_eq!(form.submit().unwrap().guests().get(), 1);
}

#[test]
fn error_lists_fields_in_form_order() {
    let mut form = RsvpForm::new();
    let err = form.submit().unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation error: missing required fields: name, contact, side"
    );
}

#[test]
fn apply_and_reset() {
    let mut form = RsvpForm::new();
    form.apply(FieldUpdate::Name("Jane".to_owned()));
    form.apply(FieldUpdate::Guests(3));
    assert_eq!(form.draft().name, "Jane");
    assert_eq!(form.draft().guests, 3);
    form.reset();
    assert_eq!(form.draft(), &RsvpDraft::default());
}
