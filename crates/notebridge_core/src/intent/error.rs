//! Intent error taxonomy.

use super::{IntentName, NOTE_CONTEXT_TYPE};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Every failure an intent caller can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    /// Context `type` tag is not `fdc3.note`. `None` when the tag is absent.
    InvalidContextType { received: Option<String> },
    /// A required `id.*` field is absent or empty.
    MissingRequiredFields(IntentName),
    /// Unexpected fault while handling an otherwise valid command.
    ProcessingFailed { intent: IntentName, cause: String },
    /// Interop host refused a handler registration.
    RegistrationFailed { intent: IntentName, cause: String },
    /// Dispatch of a name this core does not know.
    UnknownIntent(String),
    /// Dispatch of a known intent that is not registered with a host.
    NotRegistered(IntentName),
}

impl IntentError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidContextType { .. } => "invalid_context_type",
            Self::MissingRequiredFields(_) => "missing_required_fields",
            Self::ProcessingFailed { .. } => "processing_failed",
            Self::RegistrationFailed { .. } => "registration_failed",
            Self::UnknownIntent(_) => "unknown_intent",
            Self::NotRegistered(_) => "not_registered",
        }
    }
}

impl Display for IntentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidContextType { received } => write!(
                f,
                "Invalid context type. Expected '{NOTE_CONTEXT_TYPE}', received '{}'",
                received.as_deref().unwrap_or("<missing>")
            ),
            Self::MissingRequiredFields(IntentName::AddNote) => write!(
                f,
                "Missing required fields: id.noteId and id.content must be provided"
            ),
            Self::MissingRequiredFields(IntentName::RemoveNote) => {
                write!(f, "Missing required field: id.noteId must be provided")
            }
            Self::ProcessingFailed { intent, cause } => {
                write!(f, "Failed to process {intent} intent: {cause}")
            }
            Self::RegistrationFailed { intent, cause } => {
                write!(f, "Failed to register {intent} intent listener: {cause}")
            }
            Self::UnknownIntent(name) => write!(f, "Unknown intent '{name}'"),
            Self::NotRegistered(intent) => {
                write!(f, "Intent '{intent}' is not registered with an interop host")
            }
        }
    }
}

impl Error for IntentError {}

#[cfg(test)]
mod tests {
    use super::IntentError;
    use crate::intent::IntentName;

    #[test]
    fn invalid_type_message_names_expected_and_received() {
        let err = IntentError::InvalidContextType {
            received: Some("fdc3.instrument".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid context type. Expected 'fdc3.note', received 'fdc3.instrument'"
        );
    }

    #[test]
    fn missing_fields_message_depends_on_intent() {
        assert!(IntentError::MissingRequiredFields(IntentName::AddNote)
            .to_string()
            .contains("id.content"));
        assert!(!IntentError::MissingRequiredFields(IntentName::RemoveNote)
            .to_string()
            .contains("id.content"));
    }

    #[test]
    fn processing_failed_wraps_cause() {
        let err = IntentError::ProcessingFailed {
            intent: IntentName::RemoveNote,
            cause: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to process RemoveNote intent: boom");
        assert_eq!(err.code(), "processing_failed");
    }
}
