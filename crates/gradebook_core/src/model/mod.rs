//! Domain model for the gradebook collections.
//!
//! # Responsibility
//! - Define the flat entity records persisted as JSON arrays.
//! - Keep one stable identity scheme across all collections.
//!
//! # Invariants
//! - Every record is identified by a stable `EntityId`, unique within its
//!   collection.
//! - Foreign-key fields (`Grade::student_id`, `Grade::assignment_id`) may
//!   dangle after a delete; cascade handling lives in the service layer.

pub mod record;
