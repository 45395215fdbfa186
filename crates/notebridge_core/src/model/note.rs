//! Note domain record.
//!
//! # Responsibility
//! - Define the note shape rendered by the host UI.
//! - Serialize timestamps as ISO-8601 UTC with millisecond precision.
//!
//! # Invariants
//! - `id` and `content` are non-empty.
//! - `merge_from` never changes `id`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied note identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// One note in the session collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique key within the collection, chosen by the command sender.
    pub id: NoteId,
    /// Free text body.
    pub content: String,
    /// Optional origin label (e.g. the sending room or user).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Processing time of the last successful add/update.
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl Note {
    /// Creates a validated note.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is empty.
    /// - `EmptyContent` when `content` is empty.
    pub fn new(
        id: impl Into<NoteId>,
        content: impl Into<String>,
        from: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            id: id.into(),
            content: content.into(),
            from,
            timestamp,
        };
        note.validate()?;
        Ok(note)
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }

    /// Applies an incoming revision of the same note.
    ///
    /// Every field of the incoming revision overwrites the stored one,
    /// including an absent `from`.
    pub fn merge_from(&mut self, incoming: Note) {
        self.content = incoming.content;
        self.from = incoming.from;
        self.timestamp = incoming.timestamp;
    }

    /// Timestamp in the wire format (`2026-10-18T09:30:00.000Z`).
    pub fn timestamp_iso(&self) -> String {
        format_iso_millis(&self.timestamp)
    }
}

/// Formats a UTC instant as ISO-8601 with millisecond precision.
pub fn format_iso_millis(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Field-level validation errors for `Note`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyId,
    EmptyContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "note id must not be empty"),
            Self::EmptyContent => write!(f, "note content must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

mod iso_millis {
    use super::format_iso_millis;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_iso_millis(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
