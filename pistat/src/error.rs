//! Error taxonomy for the ingestion core.

use thiserror::Error;

/// Why a single inbound frame was rejected. Both variants are fatal for the
/// session and trip the error latch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The frame is not valid JSON (or not text at all).
    #[error("Fatal error: WebSocket message is not valid JSON ({size} bytes): {detail}")]
    MalformedEncoding {
        detail: String,
        size: usize,
        preview: String,
    },

    /// The frame decoded but a field does not have the expected shape.
    #[error("Fatal error, malformed message: {field}: {reason}")]
    SchemaViolation { field: String, reason: String },
}

impl FrameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FrameError::MalformedEncoding { .. } => ErrorKind::MalformedEncoding,
            FrameError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    MalformedEncoding,
    SchemaViolation,
}

/// Connection-level failure. Surfaced to the user but never latched.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("websocket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),
}

impl TransportError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Transport
    }
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preferences io: {0}")]
    Io(#[from] std::io::Error),

    #[error("preferences encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}
