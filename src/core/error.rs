use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the ledger and its draft lifecycle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LedgerError {
    /// One or more lines failed the save precondition.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A save is already in flight for this draft.
    #[error("a save is already in progress")]
    SaveInProgress,

    /// The invoice API rejected or failed the save.
    #[error("save failed: {0}")]
    Save(#[from] SaveError),

    /// Invalid ledger configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Payload could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl LedgerError {
    /// Join validation errors into one `Validation` error.
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        let msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(msg)
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path to the invalid field (e.g. "items[2].description").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    /// Create an error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Broad cause of a failed save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SaveErrorKind {
    /// The request never got a response.
    Network,
    /// The server answered with an error (5xx).
    Server,
    /// The server refused the payload (4xx).
    Rejected,
}

/// Outcome of a failed save, independent of any HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind:?}: {}", .message.as_deref().unwrap_or("no message"))]
pub struct SaveError {
    pub kind: SaveErrorKind,
    /// Message provided by the server, shown verbatim when present.
    pub message: Option<String>,
}

impl SaveError {
    /// Failure without a server message.
    pub fn new(kind: SaveErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Failure carrying the server's message.
    pub fn with_message(kind: SaveErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Text for the user: the server message, or `fallback` if there is none.
    pub fn display_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.message.as_deref() {
            Some(msg) if !msg.trim().is_empty() => msg,
            _ => fallback,
        }
    }
}
