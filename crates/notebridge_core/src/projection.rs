//! Display projection of the session note list.
//!
//! # Responsibility
//! - Turn stored notes into rows ready for a list view.
//! - Derive the connection status label and empty-state intent hints.
//!
//! # Invariants
//! - Rows keep store order.
//! - An empty `from` is never shown.

use crate::bridge::intent_bridge::IntentBridge;
use crate::intent::supported_intents;
use crate::model::note::Note;
use crate::store::note_store::NoteStore;
use chrono::{Local, TimeZone};
use std::fmt::Display;

const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Interop connection label shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn from_ready(ready: bool) -> Self {
        if ready {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }
}

/// One rendered list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub note_id: String,
    pub content: String,
    pub from: Option<String>,
    /// Processing time rendered in the viewer's zone.
    pub timestamp_display: String,
}

/// Empty-state hint for one supported intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentHint {
    pub name: &'static str,
    pub description: &'static str,
    pub context: &'static str,
}

/// Full view model for the notes screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesView {
    pub status: ConnectionStatus,
    pub count: usize,
    pub rows: Vec<NoteRow>,
    /// Filled only while the list is empty.
    pub hints: Vec<IntentHint>,
}

/// Projects notes using the local time zone.
pub fn project_notes(notes: &[Note]) -> Vec<NoteRow> {
    project_notes_in(notes, &Local)
}

/// Projects notes rendering timestamps in `zone`.
pub fn project_notes_in<Tz>(notes: &[Note], zone: &Tz) -> Vec<NoteRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    notes
        .iter()
        .map(|note| NoteRow {
            note_id: note.id.clone(),
            content: note.content.clone(),
            from: note.from.clone().filter(|from| !from.is_empty()),
            timestamp_display: note
                .timestamp
                .with_timezone(zone)
                .format(TIMESTAMP_DISPLAY_FORMAT)
                .to_string(),
        })
        .collect()
}

/// Builds the screen view model from bridge state.
pub fn build_view<S: NoteStore>(bridge: &IntentBridge<S>) -> NotesView {
    let rows = project_notes(bridge.notes());
    let hints = if rows.is_empty() {
        intent_hints()
    } else {
        Vec::new()
    };
    NotesView {
        status: ConnectionStatus::from_ready(bridge.is_ready()),
        count: rows.len(),
        rows,
        hints,
    }
}

fn intent_hints() -> Vec<IntentHint> {
    supported_intents()
        .iter()
        .map(|intent| IntentHint {
            name: intent.as_str(),
            description: intent.description(),
            context: intent.context_hint(),
        })
        .collect()
}
