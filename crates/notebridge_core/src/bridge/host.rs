//! Interop host contract and in-process host implementations.

use crate::intent::IntentName;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Host-side registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Host capability disappeared between detection and registration.
    Unavailable,
    /// Host refused the listener.
    Rejected { intent: IntentName, reason: String },
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "interop host is unavailable"),
            Self::Rejected { intent, reason } => {
                write!(f, "interop host rejected {intent} listener: {reason}")
            }
        }
    }
}

impl Error for HostError {}

/// Desktop interop capability as seen from the note core.
pub trait InteropHost {
    /// Whether the capability is present in this environment.
    fn is_available(&self) -> bool;
    /// Registers interest in one intent; the host then routes matching
    /// deliveries to the bridge.
    fn add_intent_listener(&mut self, intent: IntentName) -> Result<(), HostError>;
}

/// Host living in the same process, used by the CLI probe and FFI layer.
///
/// Accepts every registration unless the intent was marked as refused.
#[derive(Debug, Clone, Default)]
pub struct LocalHost {
    available: bool,
    refused: BTreeSet<IntentName>,
    listeners: BTreeSet<IntentName>,
}

impl LocalHost {
    pub fn connected() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Makes later registrations of `intent` fail.
    pub fn refuse(mut self, intent: IntentName) -> Self {
        self.refused.insert(intent);
        self
    }

    /// Intents registered so far.
    pub fn listeners(&self) -> impl Iterator<Item = IntentName> + '_ {
        self.listeners.iter().copied()
    }
}

impl InteropHost for LocalHost {
    fn is_available(&self) -> bool {
        self.available
    }

    fn add_intent_listener(&mut self, intent: IntentName) -> Result<(), HostError> {
        if !self.available {
            return Err(HostError::Unavailable);
        }
        if self.refused.contains(&intent) {
            return Err(HostError::Rejected {
                intent,
                reason: "listener refused by host policy".to_string(),
            });
        }
        self.listeners.insert(intent);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{HostError, InteropHost, LocalHost};
    use crate::intent::IntentName;

    #[test]
    fn disconnected_host_rejects_registration() {
        let mut host = LocalHost::disconnected();
        assert!(!host.is_available());
        assert_eq!(
            host.add_intent_listener(IntentName::AddNote).unwrap_err(),
            HostError::Unavailable
        );
    }

    #[test]
    fn refused_intent_is_not_listed() {
        let mut host = LocalHost::connected().refuse(IntentName::RemoveNote);
        host.add_intent_listener(IntentName::AddNote).unwrap();
        assert!(host.add_intent_listener(IntentName::RemoveNote).is_err());
        assert_eq!(host.listeners().collect::<Vec<_>>(), vec![IntentName::AddNote]);
    }
}
