//! Interop bridge between a desktop intent host and the note core.
//!
//! The host is an external collaborator: this module only models its
//! availability check and handler registration. Deliveries arrive as
//! `(intent name, context JSON)` messages through `IntentBridge::dispatch`.

pub mod host;
pub mod intent_bridge;
