//! Error types for the Lectern domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. Display strings double as
//! the caller-facing plain-text messages, so they stay short and never carry
//! upstream response bodies.

use thiserror::Error;

/// The top-level error type for all Lectern operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Request errors (client-side, HTTP 400) ---
    #[error("{0}")]
    Request(#[from] RequestError),

    // --- Transcript lookup errors (HTTP 404) ---
    #[error("{0}")]
    Transcript(#[from] TranscriptError),

    // --- Materials errors (HTTP 500) ---
    #[error("{0}")]
    Materials(#[from] MaterialsError),

    // --- Generation errors (upstream, HTTP 502) ---
    #[error("{0}")]
    Generation(#[from] GenerationError),

    // --- Configuration errors (HTTP 500) ---
    #[error("{message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors caused by the caller's request. Always a client error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Invalid JSON")]
    MalformedBody,

    #[error("Missing mode or question")]
    MissingQuestion,

    #[error("Missing transcript selection")]
    MissingTranscript,

    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Invalid transcript name: {0}")]
    InvalidTranscriptName(String),
}

/// A named transcript could not be found. Distinct from [`MaterialsError`]
/// because the caller picked the name — it maps to 404, not 500.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("Transcript not found: {0}")]
    NotFound(String),
}

/// Knowledge-source failures: missing, unreadable, empty, or oversized
/// course materials. Always a server-side error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterialsError {
    /// The backing document or directory is missing or unreadable.
    /// `reason` is kept for logs; the display stays generic.
    #[error("Error loading {label}")]
    Unavailable { label: String, reason: String },

    #[error("No materials available for this section yet.")]
    Empty { label: String },

    #[error("Context too large: {estimated_tokens} tokens (limit {limit})")]
    ContextTooLarge { estimated_tokens: usize, limit: usize },

    #[error("Too many files in {label}: {count} (limit {limit})")]
    TooManyFiles {
        label: String,
        count: usize,
        limit: usize,
    },
}

/// Failures talking to the external generation API. An unusable-but-successful
/// response is NOT an error — the client substitutes the sentinel text instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Network(String),

    /// Non-2xx from the API. `message` holds the upstream body for logs only.
    #[error("Generation API error (status {status_code})")]
    Api { status_code: u16, message: String },
}
