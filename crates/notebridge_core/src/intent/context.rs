//! Note context schema and validation.
//!
//! # Responsibility
//! - Describe the `fdc3.note` context shape with explicit optional fields.
//! - Turn raw JSON contexts into typed requests, checking `type` first.
//!
//! # Invariants
//! - `type` is checked before the `id` payload is decoded.
//! - A returned request always has non-empty required fields.

use super::error::IntentError;
use super::{IntentName, NOTE_CONTEXT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Context envelope as sent by the intent caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContext {
    /// Context type tag; must equal `fdc3.note`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Note payload. Named `id` on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NoteContextData>,
}

/// Payload carried under the context `id` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteContextData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl NoteContext {
    /// Builds a well-formed add/update context.
    pub fn add_note(
        note_id: impl Into<String>,
        content: impl Into<String>,
        from: Option<String>,
    ) -> Self {
        Self {
            kind: Some(NOTE_CONTEXT_TYPE.to_string()),
            id: Some(NoteContextData {
                note_id: Some(note_id.into()),
                content: Some(content.into()),
                from,
            }),
        }
    }

    /// Builds a well-formed remove context.
    pub fn remove_note(note_id: impl Into<String>) -> Self {
        Self {
            kind: Some(NOTE_CONTEXT_TYPE.to_string()),
            id: Some(NoteContextData {
                note_id: Some(note_id.into()),
                ..NoteContextData::default()
            }),
        }
    }

    /// Serializes into the JSON shape delivered by the interop host.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Validated add/update command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddNoteRequest {
    pub note_id: String,
    pub content: String,
    pub from: Option<String>,
}

/// Validated remove command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveNoteRequest {
    pub note_id: String,
}

/// Validates an `AddNote` context.
///
/// # Errors
/// - `InvalidContextType` when `type` is not `fdc3.note`.
/// - `ProcessingFailed` when `id` cannot be decoded (e.g. non-string fields).
/// - `MissingRequiredFields` when `noteId` or `content` is absent or empty.
pub fn parse_add_note(context: &Value) -> Result<AddNoteRequest, IntentError> {
    let data = decode_payload(context, IntentName::AddNote)?;
    match (non_empty(data.note_id), non_empty(data.content)) {
        (Some(note_id), Some(content)) => Ok(AddNoteRequest {
            note_id,
            content,
            from: data.from,
        }),
        _ => Err(IntentError::MissingRequiredFields(IntentName::AddNote)),
    }
}

/// Validates a `RemoveNote` context.
///
/// # Errors
/// Same taxonomy as [`parse_add_note`]; only `noteId` is required.
pub fn parse_remove_note(context: &Value) -> Result<RemoveNoteRequest, IntentError> {
    let data = decode_payload(context, IntentName::RemoveNote)?;
    non_empty(data.note_id)
        .map(|note_id| RemoveNoteRequest { note_id })
        .ok_or(IntentError::MissingRequiredFields(IntentName::RemoveNote))
}

fn decode_payload(context: &Value, intent: IntentName) -> Result<NoteContextData, IntentError> {
    check_context_type(context)?;
    let payload = match context.get("id") {
        None | Some(Value::Null) => return Err(IntentError::MissingRequiredFields(intent)),
        Some(payload) => payload,
    };
    NoteContextData::deserialize(payload).map_err(|err| IntentError::ProcessingFailed {
        intent,
        cause: err.to_string(),
    })
}

fn check_context_type(context: &Value) -> Result<(), IntentError> {
    match context.get("type") {
        Some(Value::String(kind)) if kind == NOTE_CONTEXT_TYPE => Ok(()),
        Some(Value::String(kind)) => Err(IntentError::InvalidContextType {
            received: Some(kind.clone()),
        }),
        Some(Value::Null) | None => Err(IntentError::InvalidContextType { received: None }),
        Some(other) => Err(IntentError::InvalidContextType {
            received: Some(other.to_string()),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{parse_add_note, parse_remove_note, NoteContext};
    use crate::intent::error::IntentError;
    use crate::intent::IntentName;
    use serde_json::json;

    #[test]
    fn parses_full_add_context() {
        let request = parse_add_note(&json!({
            "type": "fdc3.note",
            "id": { "noteId": "n1", "content": "Hello", "from": "Alice" }
        }))
        .expect("valid context");
        assert_eq!(request.note_id, "n1");
        assert_eq!(request.content, "Hello");
        assert_eq!(request.from.as_deref(), Some("Alice"));
    }

    #[test]
    fn type_is_checked_before_payload() {
        let err = parse_add_note(&json!({ "type": "fdc3.contact", "id": 42 })).unwrap_err();
        assert_eq!(
            err,
            IntentError::InvalidContextType {
                received: Some("fdc3.contact".to_string())
            }
        );

        let err = parse_remove_note(&json!({ "id": { "noteId": "n1" } })).unwrap_err();
        assert_eq!(err, IntentError::InvalidContextType { received: None });
    }

    #[test]
    fn non_string_type_is_reported_by_json_text() {
        let err = parse_add_note(&json!({
            "type": 5,
            "id": { "noteId": "n1", "content": "Hello" }
        }))
        .unwrap_err();
        assert_eq!(
            err,
            IntentError::InvalidContextType {
                received: Some("5".to_string())
            }
        );
        assert!(err.to_string().ends_with("received '5'"));
    }

    #[test]
    fn empty_origin_is_kept_as_provided() {
        let request = parse_add_note(&json!({
            "type": "fdc3.note",
            "id": { "noteId": "n1", "content": "Hello", "from": "" }
        }))
        .expect("valid context");
        assert_eq!(request.from.as_deref(), Some(""));
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let err = parse_add_note(&json!({
            "type": "fdc3.note",
            "id": { "noteId": "n1", "content": "" }
        }))
        .unwrap_err();
        assert_eq!(err, IntentError::MissingRequiredFields(IntentName::AddNote));

        let err = parse_remove_note(&json!({ "type": "fdc3.note" })).unwrap_err();
        assert_eq!(err, IntentError::MissingRequiredFields(IntentName::RemoveNote));
    }

    #[test]
    fn undecodable_payload_is_processing_failure() {
        let err = parse_add_note(&json!({
            "type": "fdc3.note",
            "id": { "noteId": 7, "content": "x" }
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            IntentError::ProcessingFailed {
                intent: IntentName::AddNote,
                ..
            }
        ));
    }

    #[test]
    fn builders_emit_wire_names() {
        let value = NoteContext::add_note("n1", "Hello", None).to_value();
        assert_eq!(value["type"], "fdc3.note");
        assert_eq!(value["id"]["noteId"], "n1");
        assert!(value["id"].get("from").is_none());

        let value = NoteContext::remove_note("n1").to_value();
        assert!(value["id"].get("content").is_none());
    }
}
