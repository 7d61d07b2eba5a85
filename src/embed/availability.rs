//! Best-effort availability heuristic for embed pages.
//!
//! Classification is a pure function of the HTTP status and body so it can be
//! exercised against fixture strings. It only looks for substrings and has no
//! knowledge of the provider's real playback state.

use serde::Serialize;

/// Phrases that mark a page as unavailable, checked in order.
pub const NEGATIVE_PHRASES: &[&str] = &[
    "not found",
    "no sources",
    "unavailable",
    "error 404",
    "doesn't exist",
    "does not exist",
    "no video",
    "removed",
    "dmca",
];

/// Phrases that suggest a working player.
pub const POSITIVE_PHRASES: &[&str] = &["iframe", "player", "video", "source", "embed", "stream"];

/// Bodies longer than this with no recognizable phrase are assumed playable.
const MIN_CONTENT_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

/// Outcome of a probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl Availability {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
            confidence: None,
        }
    }

    fn available(confidence: Confidence) -> Self {
        Self {
            available: true,
            reason: None,
            confidence: Some(confidence),
        }
    }
}

/// Classify a fetched embed page.
pub fn classify(status: u16, body: &str) -> Availability {
    if !(200..300).contains(&status) {
        return Availability::unavailable(format!("HTTP {status}"));
    }

    let body = body.to_lowercase();

    if let Some(phrase) = NEGATIVE_PHRASES.iter().find(|p| body.contains(*p)) {
        return Availability::unavailable(*phrase);
    }

    if POSITIVE_PHRASES.iter().any(|p| body.contains(p)) {
        return Availability::available(Confidence::High);
    }

    if body.chars().count() > MIN_CONTENT_LEN {
        return Availability::available(Confidence::Low);
    }

    Availability::unavailable("empty or minimal response")
}
