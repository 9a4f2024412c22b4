//! Connection Handler
//!
//! Runs the daemon half of the exchange for a single client.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;

use crate::cipher::alphabet;
use crate::config::Config;
use crate::error::{OtpError, Result};
use crate::protocol::{
    read_length, read_payload, write_ack, write_number, write_payload, ServerKind,
};

/// Where a connection is in the exchange
///
/// States only ever move forward; any error leaves the connection in the
/// state that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Accepted,
    SentKind,
    RecvInputSize,
    AckInputSize,
    RecvKeySize,
    AckKeySize,
    RecvInputPayload,
    AckInputPayload,
    RecvKeyPayload,
    Transform,
    SendResult,
    Closed,
}

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Transform this daemon performs
    kind: ServerKind,

    /// Largest length the client may declare
    max_payload_size: usize,

    /// Validate the key before transforming
    validate_key: bool,

    /// Current position in the exchange
    state: ConnectionState,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O and configures timeouts
    pub fn new(stream: TcpStream, kind: ServerKind, config: &Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Every message is tiny and answered before the next one is sent
        stream.set_nodelay(true)?;
        super::apply_timeouts(&stream, config)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            kind,
            max_payload_size: config.max_payload_size,
            validate_key: config.validate_key,
            state: ConnectionState::Accepted,
            peer_addr,
        })
    }

    /// Handle the connection (blocking until the exchange ends)
    ///
    /// Errors are logged here and returned; they never affect other
    /// connections.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        match self.exchange() {
            Ok(symbols) => {
                tracing::debug!(
                    "Served {} symbols ({}) to {}",
                    symbols,
                    self.kind,
                    self.peer_addr
                );
                Ok(())
            }
            Err(e) if e.is_disconnect() => {
                tracing::debug!(
                    "Client {} went away during {:?}: {}",
                    self.peer_addr,
                    self.state,
                    e
                );
                Err(e)
            }
            Err(e) => {
                tracing::warn!(
                    "Exchange with {} failed during {:?}: {}",
                    self.peer_addr,
                    self.state,
                    e
                );
                Err(e)
            }
        }
    }

    /// Run the exchange, returning the number of symbols transformed
    fn exchange(&mut self) -> Result<usize> {
        self.advance(ConnectionState::SentKind);
        write_number(&mut self.writer, self.kind.tag())?;

        self.advance(ConnectionState::RecvInputSize);
        let input_len = read_length(&mut self.reader, self.max_payload_size)?;

        self.advance(ConnectionState::AckInputSize);
        write_ack(&mut self.writer)?;

        self.advance(ConnectionState::RecvKeySize);
        let key_len = read_length(&mut self.reader, self.max_payload_size)?;
        if key_len < input_len {
            return Err(OtpError::KeyTooShort { key_len, input_len });
        }

        self.advance(ConnectionState::AckKeySize);
        write_ack(&mut self.writer)?;

        self.advance(ConnectionState::RecvInputPayload);
        let input = read_payload(&mut self.reader, input_len)?;

        self.advance(ConnectionState::AckInputPayload);
        write_ack(&mut self.writer)?;

        self.advance(ConnectionState::RecvKeyPayload);
        let key = read_payload(&mut self.reader, key_len)?;

        self.advance(ConnectionState::Transform);
        let key = &key[..input_len];
        if self.validate_key {
            alphabet::verify(key)?;
        }
        let output = self.kind.apply(&input, key)?;

        self.advance(ConnectionState::SendResult);
        write_payload(&mut self.writer, &output)?;

        self.advance(ConnectionState::Closed);
        Ok(output.len())
    }

    fn advance(&mut self, next: ConnectionState) {
        tracing::trace!("{}: {:?} -> {:?}", self.peer_addr, self.state, next);
        self.state = next;
    }

    /// Get the current state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
