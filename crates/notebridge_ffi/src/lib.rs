//! Host-facing bindings for the note intent bridge.

pub mod api;
