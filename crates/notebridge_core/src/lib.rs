//! Core logic for the note intent bridge.
//! This crate owns the note collection and the intent contract answered to
//! desktop interop hosts.

pub mod bridge;
pub mod clock;
pub mod intent;
pub mod logging;
pub mod model;
pub mod projection;
pub mod store;

pub use bridge::host::{HostError, InteropHost, LocalHost};
pub use bridge::intent_bridge::IntentBridge;
pub use clock::{Clock, ManualClock, SystemClock};
pub use intent::context::{AddNoteRequest, NoteContext, NoteContextData, RemoveNoteRequest};
pub use intent::error::IntentError;
pub use intent::result::{IntentResult, ResultPayload, ResultStatus};
pub use intent::service::NoteIntentService;
pub use intent::{parse_intent_name, supported_intents, IntentName, NOTE_CONTEXT_TYPE};
pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LogConfig, LogLevel,
    LoggingError,
};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use projection::{build_view, project_notes, ConnectionStatus, NoteRow, NotesView};
pub use store::note_store::{InMemoryNoteStore, NoteStore, StoreError, StoreResult, UpsertOutcome};

/// Session bridge backed by the in-memory store.
pub type SessionBridge = IntentBridge<InMemoryNoteStore>;

/// Creates a disconnected session bridge with wall-clock timestamps.
pub fn session_bridge() -> SessionBridge {
    IntentBridge::new(NoteIntentService::new(InMemoryNoteStore::new()))
}

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
