//! Error types for trace sessions.

use thiserror::Error;

/// Instrumentation error type.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Write or close attempted after the writer was closed
    #[error("writer not open")]
    WriterClosed,

    /// A session is already being recorded
    #[error("session '{name}' is already open")]
    AlreadyOpen { name: String },

    /// No session is being recorded
    #[error("no session is open")]
    NotOpen,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
