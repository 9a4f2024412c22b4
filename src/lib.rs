//! # otpad
//!
//! A one-time pad simulation split across a client and a daemon:
//! - 27-symbol alphabet (A-Z and space) with position-wise encode/decode
//! - Length-prefixed, big-endian wire protocol with exact-length reads
//! - Encode and decode daemons generated from one exchange state machine
//! - One worker thread per connection, reaped off the accept path
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────────────────────┐
//! │  otp-client  │ ◄──── TCP ───────► │          otp-daemon          │
//! │  (Session)   │                    │   accept loop (Server)       │
//! └──────┬───────┘                    └──────┬───────────────┬───────┘
//!        │                                   │ spawn         │ events
//!        │                                   ▼               ▼
//!        │                           ┌──────────────┐  ┌────────────┐
//!        │                           │  Connection  │  │   Reaper   │
//!        │                           │  (worker)    │  │  (joins)   │
//!        │                           └──────┬───────┘  └────────────┘
//!        │                                  │
//!        ▼                                  ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Protocol codec (Number / payload)              │
//! └─────────────────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Cipher (alphabet, encode/decode)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod cipher;
pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{OtpError, Result};
pub use config::Config;
pub use protocol::ServerKind;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of otpad
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
