//! FFI use-case API for UI-host calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI host via FRB.
//! - Own the single process-wide session bridge.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Intent results are returned as `{ type, name, id }` JSON strings.
//! - All session access is serialized through one mutex.

use notebridge_core::{
    build_view, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, session_bridge, InteropHost, LocalHost, NoteRow, SessionBridge,
};
use std::sync::{Mutex, MutexGuard, OnceLock};

static SESSION: OnceLock<Mutex<SessionBridge>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Interop status for the header indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteropStatus {
    /// Whether both intent listeners are registered.
    pub ready: bool,
    /// `Connected` or `Disconnected`.
    pub label: String,
    /// Registered intent names in registration order.
    pub intents: Vec<String>,
}

/// One list item for the notes view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub note_id: String,
    pub content: String,
    pub from: Option<String>,
    /// Localized processing time.
    pub timestamp: String,
}

/// Notes list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub items: Vec<NoteItem>,
    pub status: InteropStatus,
}

/// Generic action response envelope for local UI actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Requested note ID.
    pub note_id: String,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Connects the session bridge to the desktop interop host.
///
/// `host_available` reports whether the host injected its interop API.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; returns the resulting readiness flag.
#[flutter_rust_bridge::frb(sync)]
pub fn interop_connect(host_available: bool) -> bool {
    let mut host = if host_available {
        LocalHost::connected()
    } else {
        LocalHost::disconnected()
    };
    let ready = lock_session().initialize(Some(&mut host as &mut dyn InteropHost));
    log::info!("event=interop_connect module=ffi host_available={host_available} ready={ready}");
    ready
}

/// Returns current interop readiness.
#[flutter_rust_bridge::frb(sync)]
pub fn interop_status() -> InteropStatus {
    status_of(&lock_session())
}

/// Delivers one intent from the host.
///
/// # FFI contract
/// - `context_json` is the raw context JSON object.
/// - Never panics; always returns a result envelope JSON string.
#[flutter_rust_bridge::frb(sync)]
pub fn intent_dispatch(intent: String, context_json: String) -> String {
    lock_session()
        .dispatch_raw(intent.as_str(), context_json.as_str())
        .to_value()
        .to_string()
}

/// Lists notes in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesListResponse {
    let session = lock_session();
    let view = build_view(&*session);
    NotesListResponse {
        items: view.rows.into_iter().map(to_note_item).collect(),
        status: status_of(&session),
    }
}

/// Removes one note from the local UI, without an intent envelope.
///
/// # FFI contract
/// - Removing an unknown id succeeds with a "not found" message.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_remove(note_id: String) -> NoteActionResponse {
    match lock_session().remove_local(note_id.as_str()) {
        Ok(true) => NoteActionResponse {
            ok: true,
            note_id,
            message: "Note removed.".to_string(),
        },
        Ok(false) => NoteActionResponse {
            ok: true,
            note_id,
            message: "Note not found.".to_string(),
        },
        Err(err) => NoteActionResponse {
            ok: false,
            note_id,
            message: format!("note_remove failed: {err}"),
        },
    }
}

fn lock_session() -> MutexGuard<'static, SessionBridge> {
    SESSION
        .get_or_init(|| Mutex::new(session_bridge()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn status_of(session: &SessionBridge) -> InteropStatus {
    let view_status = build_view(session).status;
    InteropStatus {
        ready: session.is_ready(),
        label: view_status.label().to_string(),
        intents: session
            .registered_intents()
            .into_iter()
            .map(|intent| intent.as_str().to_string())
            .collect(),
    }
}

fn to_note_item(row: NoteRow) -> NoteItem {
    NoteItem {
        note_id: row.note_id,
        content: row.content,
        from: row.from,
        timestamp: row.timestamp_display,
    }
}
