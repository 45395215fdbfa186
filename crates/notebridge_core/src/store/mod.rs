//! Session note storage.
//!
//! # Responsibility
//! - Define the store contract used by intent handlers and projections.
//! - Provide the in-memory implementation backing one UI session.
//!
//! # Invariants
//! - At most one note per id.
//! - New notes are appended; updates keep their position.

pub mod note_store;
