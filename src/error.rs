//! Error types for otpad
//!
//! Provides a unified error type for the cipher, the wire protocol and
//! both sides of a connection.

use std::path::PathBuf;
use thiserror::Error;

use crate::protocol::ServerKind;

/// Result type alias using OtpError
pub type Result<T> = std::result::Result<T, OtpError>;

/// Unified error type for otpad operations
#[derive(Debug, Error)]
pub enum OtpError {
    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("invalid symbol 0x{byte:02x} at position {position} (only A-Z and space allowed)")]
    InvalidSymbol { byte: u8, position: usize },

    #[error("key is too short: {key_len} symbols for {input_len} symbols of input")]
    KeyTooShort { key_len: usize, input_len: usize },

    #[error("role mismatch: expected a {expected} daemon, peer announced kind {announced}")]
    RoleMismatch { expected: ServerKind, announced: i32 },

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("peer closed connection after {received} of {expected} bytes")]
    PeerClosed { expected: usize, received: usize },

    #[error("protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}

impl OtpError {
    /// True for failures of the transport itself: socket I/O, early close,
    /// or unexpected data at some protocol state.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            OtpError::Connection(_) | OtpError::PeerClosed { .. } | OtpError::Protocol(_)
        )
    }

    /// True when the peer went away rather than the exchange going wrong
    pub fn is_disconnect(&self) -> bool {
        match self {
            OtpError::PeerClosed { .. } => true,
            OtpError::Connection(e) => matches!(
                e.kind(),
                std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}
