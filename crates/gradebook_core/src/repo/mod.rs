//! Persistence layer for whole-collection JSON blobs.
//!
//! # Responsibility
//! - Load, seed and save collections over the `Store` boundary.
//! - Keep serialization details out of service/business orchestration.
//!
//! # Invariants
//! - A corrupted persisted blob is recovered with seed data, never
//!   propagated as an error.
//! - Every save re-serializes the whole collection (write-through).

pub mod collection_repo;
pub mod seed;
