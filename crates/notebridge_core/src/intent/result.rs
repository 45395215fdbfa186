//! Result envelopes returned to intent callers.

use super::error::IntentError;
use super::NOTE_CONTEXT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome tag carried in the envelope `name` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Payload carried under the envelope `id` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    Ack {
        #[serde(rename = "noteId")]
        note_id: String,
    },
    Error {
        error: String,
    },
}

/// `{ type, name, id }` envelope answered for every intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: ResultStatus,
    pub id: ResultPayload,
}

impl IntentResult {
    pub fn success(note_id: impl Into<String>) -> Self {
        Self {
            kind: NOTE_CONTEXT_TYPE.to_string(),
            name: ResultStatus::Success,
            id: ResultPayload::Ack {
                note_id: note_id.into(),
            },
        }
    }

    pub fn failure(err: &IntentError) -> Self {
        Self {
            kind: NOTE_CONTEXT_TYPE.to_string(),
            name: ResultStatus::Error,
            id: ResultPayload::Error {
                error: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.name == ResultStatus::Success
    }

    /// Acknowledged note id, `None` for error envelopes.
    pub fn note_id(&self) -> Option<&str> {
        match &self.id {
            ResultPayload::Ack { note_id } => Some(note_id),
            ResultPayload::Error { .. } => None,
        }
    }

    /// Error message, `None` for success envelopes.
    pub fn error_message(&self) -> Option<&str> {
        match &self.id {
            ResultPayload::Error { error } => Some(error),
            ResultPayload::Ack { .. } => None,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<Result<String, IntentError>> for IntentResult {
    fn from(value: Result<String, IntentError>) -> Self {
        match value {
            Ok(note_id) => Self::success(note_id),
            Err(err) => Self::failure(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IntentResult;
    use crate::intent::error::IntentError;
    use serde_json::json;

    #[test]
    fn success_envelope_matches_wire_shape() {
        assert_eq!(
            IntentResult::success("n1").to_value(),
            json!({ "type": "fdc3.note", "name": "SUCCESS", "id": { "noteId": "n1" } })
        );
    }

    #[test]
    fn error_envelope_matches_wire_shape() {
        let result = IntentResult::failure(&IntentError::UnknownIntent("Nope".to_string()));
        assert!(!result.is_success());
        assert_eq!(
            result.to_value(),
            json!({ "type": "fdc3.note", "name": "ERROR", "id": { "error": "Unknown intent 'Nope'" } })
        );
    }

    #[test]
    fn decodes_host_echoed_envelope() {
        let decoded: IntentResult = serde_json::from_value(json!({
            "type": "fdc3.note", "name": "SUCCESS", "id": { "noteId": "n9" }
        }))
        .unwrap();
        assert_eq!(decoded.note_id(), Some("n9"));
        assert_eq!(decoded.error_message(), None);
    }
}
