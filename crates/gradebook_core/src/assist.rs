//! AI text-extraction boundary.
//!
//! The extraction service itself is an external collaborator; hosts
//! implement [`TextExtractor`]. This module owns the calling contract:
//! a typed result, a generation guard so a superseded request's late
//! reply cannot overwrite newer state, and a defensive parse of the
//! reply into an app schema with a plain-text fallback.
//!
//! # Invariants
//! - `RequestGuard::accept` is true only for the latest generation token.
//! - `parse_reply` never surfaces a serde error; an unparseable reply is
//!   returned as plain text.

use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

pub type AssistResult<T> = Result<T, ExtractError>;

/// Opaque error surfaced by a host extraction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractError {
    message: String,
}

impl ExtractError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "extraction failed: {}", self.message)
    }
}

impl Error for ExtractError {}

/// Host-implemented extraction service.
///
/// Takes a free-text instruction and an optional file attachment; returns
/// the raw reply text. Blocking or async dispatch is the host's concern;
/// the guard below makes out-of-order completion safe either way.
pub trait TextExtractor {
    fn extract(&self, instruction: &str, attachment: Option<&[u8]>) -> AssistResult<String>;
}

/// Token identifying one request generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Generation counter guarding against stale extraction replies.
///
/// Call [`begin`](Self::begin) when dispatching a request and
/// [`accept`](Self::accept) when its reply arrives: only the reply for
/// the most recent `begin` is accepted, so a superseded request's result
/// is discarded instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct RequestGuard {
    generation: AtomicU64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request generation, invalidating all earlier tokens.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True when `token` belongs to the latest generation.
    pub fn accept(&self, token: RequestToken) -> bool {
        token.0 == self.generation.load(Ordering::SeqCst)
    }
}

/// Outcome of defensively parsing a reply against an app schema.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedReply<T> {
    /// Reply parsed as the expected JSON shape.
    Structured(T),
    /// Reply did not match the schema; raw text preserved for display.
    PlainText(String),
}

/// Parses a reply as `T`, tolerating a fenced code block around the JSON.
/// Anything that does not parse falls back to trimmed plain text.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> ExtractedReply<T> {
    let trimmed = raw.trim();
    let candidate = strip_code_fence(trimmed);
    match serde_json::from_str(candidate) {
        Ok(value) => ExtractedReply::Structured(value),
        Err(_) => ExtractedReply::PlainText(trimmed.to_string()),
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix("```") else {
        return raw;
    };
    let Some(body_start) = rest.find('\n') else {
        return raw;
    };
    let body = &rest[body_start + 1..];
    match body.rfind("```") {
        Some(end) => body[..end].trim(),
        None => raw,
    }
}
