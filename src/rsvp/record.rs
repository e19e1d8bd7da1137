use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{CardError, CardResult};

/// Which wedding party a guest belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Guest of the bride's family.
    Bride,
    /// Guest of the groom's family.
    Groom,
}

impl Side {
    /// Lowercase identifier, as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bride => "bride",
            Self::Groom => "groom",
        }
    }

    /// Human-facing label printed on the card.
    pub fn card_label(self) -> &'static str {
        match self {
            Self::Bride => "Bride's Side",
            Self::Groom => "Groom's Side",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = CardError;

    fn from_str(s: &str) -> CardResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("bride") {
            Ok(Self::Bride)
        } else if s.eq_ignore_ascii_case("groom") {
            Ok(Self::Groom)
        } else {
            Err(CardError::validation(format!(
                "side must be \"bride\" or \"groom\", got \"{s}\""
            )))
        }
    }
}

/// Number of attending guests, always within [`GuestCount::MIN`]..=[`GuestCount::MAX`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct GuestCount(u8);

impl GuestCount {
    /// Smallest allowed party size.
    pub const MIN: u8 = 1;
    /// Largest allowed party size.
    pub const MAX: u8 = 5;

    /// Clamp raw form input into range. Zero and negative input fall back to the default of one.
    pub fn clamped(raw: i64) -> Self {
        if raw < i64::from(Self::MIN) {
            return Self::default();
        }
        Self(raw.min(i64::from(Self::MAX)) as u8)
    }

    /// Strict constructor used when reading stored data.
    pub fn new(n: u8) -> CardResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&n) {
            return Err(CardError::validation(format!(
                "guest count must be within {}..={}, got {n}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(n))
    }

    /// The count as a plain integer.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for GuestCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for GuestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for GuestCount {
    type Error = CardError;

    fn try_from(v: i64) -> CardResult<Self> {
        let n = u8::try_from(v)
            .map_err(|_| CardError::validation(format!("guest count out of range: {v}")))?;
        Self::new(n)
    }
}

impl From<GuestCount> for u8 {
    fn from(v: GuestCount) -> Self {
        v.0
    }
}

/// A validated guest response.
///
/// Only [`crate::RsvpForm::submit`] constructs one, so every record has a non-blank name and
/// contact, a chosen side and an in-range guest count. Records are never mutated; a new
/// submission replaces the old record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RsvpRecord {
    name: String,
    contact: String,
    side: Side,
    guests: GuestCount,
}

impl RsvpRecord {
    pub(crate) fn new(name: String, contact: String, side: Side, guests: GuestCount) -> Self {
        Self {
            name,
            contact,
            side,
            guests,
        }
    }

    /// Guest display name, as submitted.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email or phone, free-form.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Wedding party.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Party size.
    pub fn guests(&self) -> GuestCount {
        self.guests
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rsvp/record.rs"]
mod tests;
