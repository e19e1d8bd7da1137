use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::foundation::error::{CardError, CardResult};

/// One persisted RSVP, as stored by the invitation backend.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RsvpRow {
    /// Row identifier.
    pub id: Uuid,
    /// Guest display name.
    pub name: String,
    /// Email or phone.
    pub contact: String,
    /// Side as stored, free text.
    pub side: String,
    /// Party size as stored; not range-checked.
    pub guests: i64,
    /// Issued entry code.
    pub code: String,
    /// End of the code's validity window.
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    /// Whether the code has been redeemed.
    #[serde(default)]
    pub used: bool,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
}

impl RsvpRow {
    /// Whether the row counts as a valid reservation in the admin listing.
    pub fn is_valid(&self) -> bool {
        self.guests > 0
    }
}

/// Source of persisted rows.
pub trait RsvpStore {
    /// All rows, newest `created_at` first.
    fn list_recent(&self) -> CardResult<Vec<RsvpRow>>;
}

fn newest_first(rows: &mut [RsvpRow]) {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Rows read from a JSON array on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`. The file is read on every listing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RsvpStore for JsonFileStore {
    fn list_recent(&self) -> CardResult<Vec<RsvpRow>> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            CardError::store(format!("read {}: {e}", self.path.display()))
        })?;
        let mut rows: Vec<RsvpRow> = serde_json::from_slice(&bytes).map_err(|e| {
            CardError::serde(format!("parse {}: {e}", self.path.display()))
        })?;
        newest_first(&mut rows);
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "rsvp rows loaded");
        Ok(rows)
    }
}

/// Rows held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    rows: Vec<RsvpRow>,
}

impl MemoryStore {
    /// Store over `rows`, in any order.
    pub fn new(rows: Vec<RsvpRow>) -> Self {
        Self { rows }
    }
}

impl RsvpStore for MemoryStore {
    fn list_recent(&self) -> CardResult<Vec<RsvpRow>> {
        let mut rows = self.rows.clone();
        newest_first(&mut rows);
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/admin/store.rs"]
mod tests;
