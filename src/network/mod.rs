//! Network Module
//!
//! TCP daemon and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - One worker thread per connection, owning its socket and buffers
//! - Reaper thread joins finished workers off the accept path

mod connection;
mod reaper;
mod server;
mod session;

pub use connection::{Connection, ConnectionState};
pub use server::{Server, ShutdownHandle};
pub use session::{Request, Session};

use std::net::TcpStream;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;

/// Apply the configured per-step deadlines to a socket
pub(crate) fn apply_timeouts(stream: &TcpStream, config: &Config) -> Result<()> {
    let to_duration = |ms: u64| (ms > 0).then(|| Duration::from_millis(ms));

    stream.set_read_timeout(to_duration(config.read_timeout_ms))?;
    stream.set_write_timeout(to_duration(config.write_timeout_ms))?;
    Ok(())
}
