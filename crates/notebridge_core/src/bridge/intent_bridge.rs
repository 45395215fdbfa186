//! Bridge bootstrap, readiness and dispatch.
//!
//! # Responsibility
//! - Detect the interop host and register every supported intent once.
//! - Expose the readiness flag consumed by the UI status indicator.
//! - Route host deliveries to the intent service.
//!
//! # Invariants
//! - `ready` is true only when the host was detected and every
//!   registration succeeded.
//! - Registration failures are logged and never retried.
//! - Without a host, only local actions mutate the store.

use super::host::InteropHost;
use crate::intent::error::IntentError;
use crate::intent::result::IntentResult;
use crate::intent::service::NoteIntentService;
use crate::intent::{parse_intent_name, supported_intents, IntentName};
use crate::model::note::Note;
use crate::store::note_store::{NoteStore, StoreResult};
use log::{error, info, warn};
use serde_json::Value;
use std::collections::BTreeSet;

/// Bridge state for one UI session.
pub struct IntentBridge<S: NoteStore> {
    service: NoteIntentService<S>,
    registered: BTreeSet<IntentName>,
    ready: bool,
}

impl<S: NoteStore> IntentBridge<S> {
    /// Creates a disconnected bridge around `service`.
    pub fn new(service: NoteIntentService<S>) -> Self {
        Self {
            service,
            registered: BTreeSet::new(),
            ready: false,
        }
    }

    /// Detects `host` and registers every supported intent.
    ///
    /// Returns the resulting readiness flag. `None` or an unavailable host
    /// selects standalone mode and is not an error.
    pub fn initialize(&mut self, host: Option<&mut dyn InteropHost>) -> bool {
        self.registered.clear();
        self.ready = false;

        let Some(host) = host.filter(|host| host.is_available()) else {
            warn!("event=interop_init module=bridge status=standalone reason=host_unavailable");
            return false;
        };

        for intent in supported_intents() {
            if let Err(err) = host.add_intent_listener(*intent) {
                let failure = IntentError::RegistrationFailed {
                    intent: *intent,
                    cause: err.to_string(),
                };
                error!(
                    "event=interop_init module=bridge status=error code={} error={failure}",
                    failure.code()
                );
                return false;
            }
            self.registered.insert(*intent);
        }

        self.ready = true;
        info!(
            "event=interop_init module=bridge status=ok intents={}",
            self.registered.len()
        );
        true
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Intents currently registered with the host.
    pub fn registered_intents(&self) -> Vec<IntentName> {
        self.registered.iter().copied().collect()
    }

    /// Routes one host delivery by wire intent name.
    pub fn dispatch(&mut self, intent_name: &str, context: &Value) -> IntentResult {
        match self.resolve(intent_name) {
            Ok(intent) => self.service.handle(intent, context),
            Err(err) => {
                warn!(
                    "event=intent_dispatch module=bridge status=rejected code={}",
                    err.code()
                );
                IntentResult::failure(&err)
            }
        }
    }

    /// Routes one host delivery whose context is still raw JSON text.
    ///
    /// Undecodable JSON is answered with `ProcessingFailed` for a known
    /// intent and `UnknownIntent` otherwise; the store is not touched.
    pub fn dispatch_raw(&mut self, intent_name: &str, context_json: &str) -> IntentResult {
        match serde_json::from_str::<Value>(context_json) {
            Ok(context) => self.dispatch(intent_name, &context),
            Err(err) => {
                warn!("event=intent_dispatch module=bridge status=rejected reason=invalid_json");
                IntentResult::failure(&malformed_context(intent_name, &err))
            }
        }
    }

    /// Local UI removal action.
    pub fn remove_local(&mut self, note_id: &str) -> StoreResult<bool> {
        self.service.remove_local(note_id)
    }

    /// Current notes in display order.
    pub fn notes(&self) -> &[Note] {
        self.service.store().list()
    }

    pub fn service(&self) -> &NoteIntentService<S> {
        &self.service
    }

    fn resolve(&self, intent_name: &str) -> Result<IntentName, IntentError> {
        let intent = parse_intent_name(intent_name)?;
        if !self.registered.contains(&intent) {
            return Err(IntentError::NotRegistered(intent));
        }
        Ok(intent)
    }
}

fn malformed_context(intent_name: &str, err: &serde_json::Error) -> IntentError {
    match parse_intent_name(intent_name) {
        Ok(intent) => IntentError::ProcessingFailed {
            intent,
            cause: format!("context is not valid JSON: {err}"),
        },
        Err(unknown) => unknown,
    }
}
