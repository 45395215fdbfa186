//! Note domain model shared by the store, intent handlers and projections.
//!
//! # Responsibility
//! - Define the canonical `Note` record kept in the session collection.
//! - Own field-level validation and the merge rule used by upserts.
//!
//! # Invariants
//! - A note always carries a non-empty `id` and non-empty `content`.
//! - `timestamp` is assigned by the core, never by the caller.

pub mod note;
