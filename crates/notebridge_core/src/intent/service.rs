//! Note intent use-case service.
//!
//! # Responsibility
//! - Apply `AddNote` / `RemoveNote` contexts to a `NoteStore`.
//! - Convert every failure, including store faults and panics, into an
//!   error envelope.
//!
//! # Invariants
//! - No store mutation happens unless validation passed.
//! - Removing an unknown id succeeds and echoes the requested id.
//! - Log events carry ids and lengths only, never note content.

use super::context::{parse_add_note, parse_remove_note};
use super::error::IntentError;
use super::result::IntentResult;
use super::IntentName;
use crate::clock::{Clock, SystemClock};
use crate::model::note::Note;
use crate::store::note_store::{NoteStore, StoreResult, UpsertOutcome};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Intent handlers bound to one note store.
pub struct NoteIntentService<S: NoteStore> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: NoteStore> NoteIntentService<S> {
    /// Creates a service stamping notes with wall-clock time.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a service with an explicit processing-time source.
    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Handles one intent delivery and returns the caller-facing envelope.
    pub fn handle(&mut self, intent: IntentName, context: &Value) -> IntentResult {
        debug!("event=intent_received module=intent intent={intent}");
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match intent {
            IntentName::AddNote => self.apply_add_note(context),
            IntentName::RemoveNote => self.apply_remove_note(context),
        }))
        .unwrap_or_else(|payload| {
            Err(IntentError::ProcessingFailed {
                intent,
                cause: panic_cause(payload.as_ref()),
            })
        });

        match &outcome {
            Ok(note_id) => info!(
                "event=intent_handled module=intent status=ok intent={intent} note_id={note_id}"
            ),
            Err(err @ IntentError::ProcessingFailed { .. }) => error!(
                "event=intent_handled module=intent status=error intent={intent} code={} error={err}",
                err.code()
            ),
            Err(err) => warn!(
                "event=intent_handled module=intent status=rejected intent={intent} code={}",
                err.code()
            ),
        }
        IntentResult::from(outcome)
    }

    /// Handles an `AddNote` delivery.
    pub fn handle_add_note(&mut self, context: &Value) -> IntentResult {
        self.handle(IntentName::AddNote, context)
    }

    /// Handles a `RemoveNote` delivery.
    pub fn handle_remove_note(&mut self, context: &Value) -> IntentResult {
        self.handle(IntentName::RemoveNote, context)
    }

    /// Removes a note on behalf of the local UI, bypassing the intent envelope.
    ///
    /// Returns whether a note was removed.
    pub fn remove_local(&mut self, note_id: &str) -> StoreResult<bool> {
        let removed = self.store.remove(note_id)?.is_some();
        info!("event=note_removed module=intent source=local note_id={note_id} found={removed}");
        Ok(removed)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn apply_add_note(&mut self, context: &Value) -> Result<String, IntentError> {
        let request = parse_add_note(context)?;
        let note = Note::new(
            request.note_id,
            request.content,
            request.from,
            self.clock.now(),
        )
        .map_err(|err| processing_failed(IntentName::AddNote, err))?;
        let note_id = note.id.clone();
        let content_chars = note.content.chars().count();

        let outcome = self
            .store
            .upsert(note)
            .map_err(|err| processing_failed(IntentName::AddNote, err))?;
        match outcome {
            UpsertOutcome::Inserted { index } => debug!(
                "event=note_upserted module=intent action=insert note_id={note_id} index={index} content_chars={content_chars}"
            ),
            UpsertOutcome::Updated { index } => debug!(
                "event=note_upserted module=intent action=update note_id={note_id} index={index} content_chars={content_chars}"
            ),
        }
        Ok(note_id)
    }

    fn apply_remove_note(&mut self, context: &Value) -> Result<String, IntentError> {
        let request = parse_remove_note(context)?;
        let removed = self
            .store
            .remove(request.note_id.as_str())
            .map_err(|err| processing_failed(IntentName::RemoveNote, err))?;
        debug!(
            "event=note_removed module=intent source=intent note_id={} found={}",
            request.note_id,
            removed.is_some()
        );
        Ok(request.note_id)
    }
}

fn processing_failed(intent: IntentName, err: impl Display) -> IntentError {
    IntentError::ProcessingFailed {
        intent,
        cause: err.to_string(),
    }
}

fn panic_cause(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::NoteIntentService;
    use crate::clock::ManualClock;
    use crate::store::note_store::{InMemoryNoteStore, NoteStore};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn add_then_remove_round_trip() {
        let start = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let mut service = NoteIntentService::with_clock(InMemoryNoteStore::new(), clock.clone());

        let added = service.handle_add_note(&json!({
            "type": "fdc3.note",
            "id": { "noteId": "n1", "content": "Hello", "from": "Alice" }
        }));
        assert_eq!(added.note_id(), Some("n1"));
        let stored = service.store().get("n1").expect("note stored");
        assert_eq!(stored.from.as_deref(), Some("Alice"));
        assert_eq!(stored.timestamp, start);

        clock.advance(Duration::seconds(5));
        let removed = service.handle_remove_note(&json!({
            "type": "fdc3.note",
            "id": { "noteId": "n1" }
        }));
        assert_eq!(removed.note_id(), Some("n1"));
        assert!(service.store().is_empty());
    }

    #[test]
    fn local_removal_reports_whether_note_existed() {
        let mut service = NoteIntentService::new(InMemoryNoteStore::new());
        service.handle_add_note(&json!({
            "type": "fdc3.note",
            "id": { "noteId": "n1", "content": "Hello" }
        }));

        assert!(service.remove_local("n1").unwrap());
        assert!(!service.remove_local("n1").unwrap());
    }
}
