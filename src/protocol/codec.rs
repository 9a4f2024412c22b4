//! Protocol codec
//!
//! Read/write primitives for the two message shapes on the wire.
//!
//! ## Wire Format
//!
//! ### Number
//! ```text
//! ┌──────────────────────────┐
//! │ i32, big-endian (4)      │
//! └──────────────────────────┘
//! ```
//!
//! ### Exact payload
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ n bytes, length agreed out of band          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every receive, short or long, goes through [`fill`], which loops until
//! the buffer is full and turns a zero-byte read into `PeerClosed`.

use std::io::{ErrorKind, Read, Write};

use bytes::{Bytes, BytesMut};

use crate::error::{OtpError, Result};

/// Width of a Number on the wire
pub const NUMBER_SIZE: usize = 4;

/// Acknowledgement token sent by the daemon to pace the exchange
pub const ACK: &[u8; 3] = b"ACK";

// =============================================================================
// Numbers
// =============================================================================

/// Write a Number in network byte order
pub fn write_number<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_all(&value.to_be_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read a Number in network byte order
pub fn read_number<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; NUMBER_SIZE];
    fill(reader, &mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

/// Write a payload length as a Number
pub fn write_length<W: Write>(writer: &mut W, len: usize) -> Result<()> {
    let value = i32::try_from(len).map_err(|_| {
        OtpError::Protocol(format!("length {} does not fit in 32 bits", len))
    })?;
    write_number(writer, value)
}

/// Read a declared payload length, bounded by `max`
pub fn read_length<R: Read>(reader: &mut R, max: usize) -> Result<usize> {
    let value = read_number(reader)?;

    let len = usize::try_from(value)
        .map_err(|_| OtpError::Protocol(format!("negative length: {}", value)))?;

    if len > max {
        return Err(OtpError::Protocol(format!(
            "declared length too large: {} bytes (max {})",
            len, max
        )));
    }

    Ok(len)
}

// =============================================================================
// Payloads
// =============================================================================

/// Write exactly `payload.len()` bytes
pub fn write_payload<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    if payload.is_empty() {
        return Ok(());
    }
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Read exactly `len` bytes
pub fn read_payload<R: Read>(reader: &mut R, len: usize) -> Result<Bytes> {
    let mut buf = BytesMut::zeroed(len);
    fill(reader, &mut buf)?;
    Ok(buf.freeze())
}

// =============================================================================
// Acknowledgements
// =============================================================================

/// Send the acknowledgement token
pub fn write_ack<W: Write>(writer: &mut W) -> Result<()> {
    write_payload(writer, ACK)
}

/// Wait for the acknowledgement token
///
/// The content is not checked, only its length.
pub fn read_ack<R: Read>(reader: &mut R) -> Result<()> {
    let mut buf = [0u8; ACK.len()];
    fill(reader, &mut buf)?;
    if &buf != ACK {
        tracing::trace!("unexpected acknowledgement bytes: {:?}", buf);
    }
    Ok(())
}

// =============================================================================
// Exact-length read
// =============================================================================

/// Read until `buf` is full
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut received = 0;

    while received < buf.len() {
        match reader.read(&mut buf[received..]) {
            Ok(0) => {
                return Err(OtpError::PeerClosed {
                    expected: buf.len(),
                    received,
                })
            }
            Ok(n) => received += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(OtpError::Connection(e)),
        }
    }

    Ok(())
}
