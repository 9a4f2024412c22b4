//! Configuration for otpad
//!
//! Centralized configuration with sensible defaults. Shared by the daemon
//! and the client; each side reads the fields that concern it.

use crate::error::{OtpError, Result};

/// Default upper bound on any declared payload length (16 MB)
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Main configuration for an otpad daemon or client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address (daemon only)
    pub listen_addr: String,

    /// Max concurrent worker threads (daemon only)
    pub max_connections: usize,

    /// Per-read deadline in milliseconds (0 disables)
    pub read_timeout_ms: u64,

    /// Per-write deadline in milliseconds (0 disables)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Payload Configuration
    // -------------------------------------------------------------------------
    /// Largest length a peer may declare for an input or key
    pub max_payload_size: usize,

    /// Validate the key against the alphabet as well as the input
    ///
    /// Keys normally come from `otp-keygen` and are trusted.
    pub validate_key: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:0".to_string(),
            max_connections: 64,
            read_timeout_ms: 30_000,
            write_timeout_ms: 30_000,
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
            validate_key: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings that would make the daemon unusable
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(OtpError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.max_payload_size == 0 {
            return Err(OtpError::Config(
                "max_payload_size must be at least 1".to_string(),
            ));
        }
        if self.max_payload_size > i32::MAX as usize {
            return Err(OtpError::Config(format!(
                "max_payload_size {} does not fit the 32-bit length field",
                self.max_payload_size
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum number of concurrent connections
    pub fn max_connections(mut self, count: usize) -> Self {
        self.config.max_connections = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the maximum declared payload size (in bytes)
    pub fn max_payload_size(mut self, size: usize) -> Self {
        self.config.max_payload_size = size;
        self
    }

    /// Validate keys as well as inputs
    pub fn validate_key(mut self, enabled: bool) -> Self {
        self.config.validate_key = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
