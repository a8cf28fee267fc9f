//! Read-only aggregates derived from the current collections.
//!
//! # Responsibility
//! - Compute averages, performance bands, trend and time-series data.
//!
//! # Invariants
//! - Every function is pure and recomputes from raw records on each call;
//!   no aggregate is cached or persisted as a source of truth.
//! - A missing parent or zero denominator yields `0`, never NaN or a
//!   division error.

pub mod performance;
pub mod timeline;
