//! Note store contract and in-memory implementation.
//!
//! # Responsibility
//! - Expose `upsert`, `remove`, `get` and `list` over the session collection.
//! - Keep insertion order stable for display.
//!
//! # Invariants
//! - `upsert` merges into an existing note with the same id instead of
//!   duplicating it.
//! - `remove` of an unknown id is a no-op, not an error.

use crate::model::note::{Note, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-layer errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Note failed field validation before write.
    InvalidNote(NoteValidationError),
    /// Backend-specific consistency failure reported by a store implementation.
    InconsistentState(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNote(err) => write!(f, "invalid note: {err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note store: {details}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidNote(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::InvalidNote(value)
    }
}

/// Store result alias.
pub type StoreResult<T> = Result<T, StoreError>;

/// What an upsert did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Appended as a new entry at `index`.
    Inserted { index: usize },
    /// Merged into the existing entry at `index`.
    Updated { index: usize },
}

/// Storage contract for the session note collection.
pub trait NoteStore {
    /// Inserts a new note or merges into the one with the same id.
    fn upsert(&mut self, note: Note) -> StoreResult<UpsertOutcome>;
    /// Removes the note with `note_id`, returning it when present.
    fn remove(&mut self, note_id: &str) -> StoreResult<Option<Note>>;
    /// Looks up one note by id.
    fn get(&self, note_id: &str) -> Option<&Note>;
    /// Returns all notes in display order.
    fn list(&self) -> &[Note];

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

/// Vec-backed store living for one UI session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryNoteStore {
    notes: Vec<Note>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, note_id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == note_id)
    }
}

impl NoteStore for InMemoryNoteStore {
    fn upsert(&mut self, note: Note) -> StoreResult<UpsertOutcome> {
        note.validate()?;
        match self.position(note.id.as_str()) {
            Some(index) => {
                self.notes[index].merge_from(note);
                Ok(UpsertOutcome::Updated { index })
            }
            None => {
                self.notes.push(note);
                Ok(UpsertOutcome::Inserted {
                    index: self.notes.len() - 1,
                })
            }
        }
    }

    fn remove(&mut self, note_id: &str) -> StoreResult<Option<Note>> {
        let Some(index) = self.position(note_id) else {
            return Ok(None);
        };
        Ok(Some(self.notes.remove(index)))
    }

    fn get(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    fn list(&self) -> &[Note] {
        &self.notes
    }
}
