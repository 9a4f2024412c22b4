//! Client Session
//!
//! Runs the client half of the exchange against a daemon.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

use bytes::Bytes;

use crate::cipher::Payload;
use crate::config::Config;
use crate::error::{OtpError, Result};
use crate::protocol::{
    read_ack, read_number, read_payload, write_length, write_payload, ServerKind,
};

/// A checked request, ready to send
///
/// Building one performs every local check, so a failed request never
/// opens a socket.
#[derive(Debug, Clone)]
pub struct Request {
    kind: ServerKind,
    input: Payload,
    key: Payload,
}

impl Request {
    /// Validate `input` (and `key` when `validate_key` is set) and check
    /// that the key covers the input
    pub fn new(kind: ServerKind, input: Payload, key: Payload, validate_key: bool) -> Result<Self> {
        input.validate()?;
        if key.len() < input.len() {
            return Err(OtpError::KeyTooShort {
                key_len: key.len(),
                input_len: input.len(),
            });
        }
        if validate_key {
            key.validate()?;
        }

        Ok(Self { kind, input, key })
    }

    /// Kind of daemon this request must be sent to
    pub fn kind(&self) -> ServerKind {
        self.kind
    }

    pub fn input(&self) -> &Payload {
        &self.input
    }

    pub fn key(&self) -> &Payload {
        &self.key
    }
}

/// One client connection to a daemon
pub struct Session {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    peer_addr: String,
}

impl Session {
    /// Connect to a daemon with the configured timeouts
    pub fn connect<A: ToSocketAddrs>(addr: A, config: &Config) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;
        super::apply_timeouts(&stream, config)?;

        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            peer_addr,
        })
    }

    /// Send `request` and return the transformed input
    ///
    /// Consumes the session: the daemon closes after one exchange.
    pub fn transmit(mut self, request: &Request) -> Result<Bytes> {
        let announced = read_number(&mut self.reader)?;
        if announced != request.kind.tag() {
            tracing::debug!(
                "{} announced kind {}, wanted {}",
                self.peer_addr,
                announced,
                request.kind
            );
            let _ = self.writer.get_ref().shutdown(Shutdown::Both);
            return Err(OtpError::RoleMismatch {
                expected: request.kind,
                announced,
            });
        }

        write_length(&mut self.writer, request.input.len())?;
        read_ack(&mut self.reader)?;

        write_length(&mut self.writer, request.key.len())?;
        read_ack(&mut self.reader)?;

        write_payload(&mut self.writer, &request.input)?;
        read_ack(&mut self.reader)?;

        write_payload(&mut self.writer, &request.key)?;

        let result = read_payload(&mut self.reader, request.input.len())?;
        tracing::debug!("Received {} symbols from {}", result.len(), self.peer_addr);

        Ok(result)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
