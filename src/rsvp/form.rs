use crate::foundation::error::{CardError, CardResult};
use crate::rsvp::record::{GuestCount, RsvpRecord, Side};

/// Field names that must be filled before a submission is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredField {
    /// Guest display name.
    Name,
    /// Email or phone.
    Contact,
    /// Bride or groom side.
    Side,
}

impl RequiredField {
    /// Lowercase field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Contact => "contact",
            Self::Side => "side",
        }
    }
}

/// Draft buffer for the RSVP form. Holds raw, unvalidated input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsvpDraft {
    /// Name as typed.
    pub name: String,
    /// Contact as typed.
    pub contact: String,
    /// Selected side, if any.
    pub side: Option<Side>,
    /// Raw guest count input.
    pub guests: i64,
}

impl Default for RsvpDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            contact: String::new(),
            side: None,
            guests: i64::from(GuestCount::MIN),
        }
    }
}

impl RsvpDraft {
    /// Required fields that are blank or unselected, in form order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut out = Vec::new();
        if self.name.trim().is_empty() {
            out.push(RequiredField::Name);
        }
        if self.contact.trim().is_empty() {
            out.push(RequiredField::Contact);
        }
        if self.side.is_none() {
            out.push(RequiredField::Side);
        }
        out
    }
}

/// One field-level edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Replace the name.
    Name(String),
    /// Replace the contact.
    Contact(String),
    /// Select or clear the side.
    Side(Option<Side>),
    /// Replace the raw guest count.
    Guests(i64),
}

/// The RSVP form: a draft buffer plus the submit transition.
#[derive(Clone, Debug, Default)]
pub struct RsvpForm {
    draft: RsvpDraft,
}

impl RsvpForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the current draft.
    pub fn draft(&self) -> &RsvpDraft {
        &self.draft
    }

    /// Apply one field update to the draft.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.draft.name = v,
            FieldUpdate::Contact(v) => self.draft.contact = v,
            FieldUpdate::Side(v) => self.draft.side = v,
            FieldUpdate::Guests(v) => self.draft.guests = v,
        }
    }

    /// Set the name field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.apply(FieldUpdate::Name(name.into()));
    }

    /// Set the contact field.
    pub fn set_contact(&mut self, contact: impl Into<String>) {
        self.apply(FieldUpdate::Contact(contact.into()));
    }

    /// Select or clear the side.
    pub fn set_side(&mut self, side: Option<Side>) {
        self.apply(FieldUpdate::Side(side));
    }

    /// Set the raw guest count; it is clamped on submit.
    pub fn set_guests(&mut self, guests: i64) {
        self.apply(FieldUpdate::Guests(guests));
    }

    /// Validate the draft into a record.
    ///
    /// On failure the draft is left untouched and the error lists the missing fields. On success
    /// the draft resets to defaults.
    pub fn submit(&mut self) -> CardResult<RsvpRecord> {
        let missing = self.draft.missing_fields();
        let Some(side) = self.draft.side else {
            return Err(missing_fields_error(&missing));
        };
        if !missing.is_empty() {
            return Err(missing_fields_error(&missing));
        }

        let draft = std::mem::take(&mut self.draft);
        let record = RsvpRecord::new(
            draft.name,
            draft.contact,
            side,
            GuestCount::clamped(draft.guests),
        );
        tracing::debug!(name = record.name(), side = %record.side(), "rsvp submitted");
        Ok(record)
    }

    /// Discard the draft.
    pub fn reset(&mut self) {
        self.draft = RsvpDraft::default();
    }
}

fn missing_fields_error(missing: &[RequiredField]) -> CardError {
    let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
    CardError::validation(format!("missing required fields: {}", names.join(", ")))
}

#[cfg(test)]
#[path = "../../tests/unit/rsvp/form.rs"]
mod tests;
