//! Use-case services over the persistence layer.
//!
//! # Responsibility
//! - Orchestrate collection loads and mutations into application APIs.
//! - Keep host/UI layers decoupled from storage and serialization details.
//!
//! # Invariants
//! - Every successful mutation is persisted before the call returns
//!   (write-through).
//! - Cascade deletes keep foreign keys from dangling.

pub mod gradebook;
pub mod preferences;
