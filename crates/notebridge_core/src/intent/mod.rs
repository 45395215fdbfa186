//! Note intent contracts.
//!
//! # Responsibility
//! - Name the intents this core answers and the context type it accepts.
//! - Validate incoming contexts into typed requests before any mutation.
//! - Build the result envelopes returned to the intent caller.
//!
//! # Invariants
//! - Handlers return an `IntentResult` for every input; failures are values.
//! - Validation stops at the first failing check and never mutates the store.

pub mod context;
pub mod error;
pub mod result;
pub mod service;

use error::IntentError;
use std::fmt::{Display, Formatter};

/// Context type tag accepted by every note intent.
pub const NOTE_CONTEXT_TYPE: &str = "fdc3.note";

/// Wire name of the add/update intent.
pub const INTENT_ADD_NOTE: &str = "AddNote";
/// Wire name of the remove intent.
pub const INTENT_REMOVE_NOTE: &str = "RemoveNote";

const SUPPORTED_INTENTS: &[IntentName] = &[IntentName::AddNote, IntentName::RemoveNote];

/// Intents handled by the note core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntentName {
    AddNote,
    RemoveNote,
}

impl IntentName {
    /// Stable wire name registered with the interop host.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddNote => INTENT_ADD_NOTE,
            Self::RemoveNote => INTENT_REMOVE_NOTE,
        }
    }

    /// User-facing short description, shown in the empty-list hint.
    pub fn description(self) -> &'static str {
        match self {
            Self::AddNote => "Add or update a note",
            Self::RemoveNote => "Remove a note by ID",
        }
    }

    /// Expected context shape, shown in the empty-list hint.
    pub fn context_hint(self) -> &'static str {
        match self {
            Self::AddNote => r#"type: "fdc3.note", id: { noteId: "string", content: "string" }"#,
            Self::RemoveNote => r#"type: "fdc3.note", id: { noteId: "string" }"#,
        }
    }
}

impl Display for IntentName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns every intent this core registers, in registration order.
pub fn supported_intents() -> &'static [IntentName] {
    SUPPORTED_INTENTS
}

/// Parses one intent from its wire name. Matching is exact.
pub fn parse_intent_name(value: &str) -> Result<IntentName, IntentError> {
    match value {
        INTENT_ADD_NOTE => Ok(IntentName::AddNote),
        INTENT_REMOVE_NOTE => Ok(IntentName::RemoveNote),
        other => Err(IntentError::UnknownIntent(other.to_string())),
    }
}
