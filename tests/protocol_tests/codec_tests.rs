//! Codec Tests
//!
//! Tests for Number and exact-length payload framing, including transports
//! that split reads and writes into small pieces.

use std::io::{self, Cursor, Read, Write};

use otpad::protocol::{
    read_ack, read_length, read_number, read_payload, write_ack, write_length, write_number,
    write_payload, ACK, NUMBER_SIZE,
};
use otpad::OtpError;

// =============================================================================
// Simulated Transports
// =============================================================================

/// Hands out at most `chunk` bytes per read call
struct ChunkedReader {
    inner: Cursor<Vec<u8>>,
    chunk: usize,
    calls: usize,
}

impl ChunkedReader {
    fn new(bytes: Vec<u8>, chunk: usize) -> Self {
        Self {
            inner: Cursor::new(bytes),
            chunk,
            calls: 0,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        let n = buf.len().min(self.chunk);
        self.inner.read(&mut buf[..n])
    }
}

/// Interrupts every other read before delivering data
struct InterruptingReader {
    inner: Cursor<Vec<u8>>,
    interrupt_next: bool,
}

impl Read for InterruptingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt_next = !self.interrupt_next;
        if self.interrupt_next {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        let n = buf.len().min(1);
        self.inner.read(&mut buf[..n])
    }
}

/// Accepts at most `chunk` bytes per write call
struct ChunkedWriter {
    written: Vec<u8>,
    chunk: usize,
    calls: usize,
}

impl Write for ChunkedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        let n = buf.len().min(self.chunk);
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Refuses to take any bytes
struct StalledWriter;

impl Write for StalledWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Ok(0)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Fails every read
struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::ConnectionReset))
    }
}

// =============================================================================
// Number Tests
// =============================================================================

#[test]
fn test_number_width_and_byte_order() {
    let mut out = Vec::new();
    write_number(&mut out, 1).unwrap();
    assert_eq!(out.len(), NUMBER_SIZE);
    assert_eq!(out, [0, 0, 0, 1]);

    let mut out = Vec::new();
    write_number(&mut out, -2).unwrap();
    assert_eq!(out, [0xFF, 0xFF, 0xFF, 0xFE]);
}

#[test]
fn test_number_roundtrip() {
    for value in [0, 1, 27, 4196, i32::MAX, i32::MIN, -1] {
        let mut out = Vec::new();
        write_number(&mut out, value).unwrap();
        assert_eq!(read_number(&mut Cursor::new(out)).unwrap(), value);
    }
}

#[test]
fn test_number_split_across_reads() {
    let mut reader = ChunkedReader::new(vec![0x00, 0x01, 0x02, 0x03], 1);
    assert_eq!(read_number(&mut reader).unwrap(), 0x0001_0203);
    assert_eq!(reader.calls, 4);
}

#[test]
fn test_number_truncated() {
    let mut reader = Cursor::new(vec![0x00, 0x01]);
    assert!(matches!(
        read_number(&mut reader),
        Err(OtpError::PeerClosed { expected: 4, received: 2 })
    ));
}

// =============================================================================
// Length Tests
// =============================================================================

#[test]
fn test_length_within_limit() {
    let mut out = Vec::new();
    write_length(&mut out, 100).unwrap();
    assert_eq!(read_length(&mut Cursor::new(out), 100).unwrap(), 100);
}

#[test]
fn test_negative_length_is_protocol_error() {
    let mut out = Vec::new();
    write_number(&mut out, -5).unwrap();
    let err = read_length(&mut Cursor::new(out), 100).unwrap_err();
    assert!(matches!(err, OtpError::Protocol(_)));
    assert!(err.is_connection_error());
}

#[test]
fn test_oversized_length_is_protocol_error() {
    let mut out = Vec::new();
    write_length(&mut out, 101).unwrap();
    let err = read_length(&mut Cursor::new(out), 100).unwrap_err();
    assert!(err.to_string().contains("too large"));
}

#[test]
fn test_length_must_fit_32_bits() {
    let mut out = Vec::new();
    let err = write_length(&mut out, i32::MAX as usize + 1).unwrap_err();
    assert!(matches!(err, OtpError::Protocol(_)));
    assert!(out.is_empty());
}

// =============================================================================
// Payload Tests
// =============================================================================

#[test]
fn test_payload_reassembled_from_small_chunks() {
    let payload: Vec<u8> = b"THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG".to_vec();
    let mut reader = ChunkedReader::new(payload.clone(), 3);

    let received = read_payload(&mut reader, payload.len()).unwrap();
    assert_eq!(&received[..], &payload[..]);
    assert!(reader.calls > 1);
}

#[test]
fn test_large_payload_reassembled() {
    let payload: Vec<u8> = (0..100_000).map(|i| b'A' + (i % 26) as u8).collect();
    let mut reader = ChunkedReader::new(payload.clone(), 1500);

    let received = read_payload(&mut reader, payload.len()).unwrap();
    assert_eq!(&received[..], &payload[..]);
}

#[test]
fn test_payload_leaves_following_bytes() {
    let mut reader = ChunkedReader::new(b"HELLOWORLD".to_vec(), 4);
    assert_eq!(&read_payload(&mut reader, 5).unwrap()[..], b"HELLO");
    assert_eq!(&read_payload(&mut reader, 5).unwrap()[..], b"WORLD");
}

#[test]
fn test_payload_survives_interrupts() {
    let mut reader = InterruptingReader {
        inner: Cursor::new(b"ABC".to_vec()),
        interrupt_next: false,
    };
    assert_eq!(&read_payload(&mut reader, 3).unwrap()[..], b"ABC");
}

#[test]
fn test_payload_peer_closed_early() {
    let mut reader = ChunkedReader::new(b"HEL".to_vec(), 2);
    match read_payload(&mut reader, 5) {
        Err(OtpError::PeerClosed { expected, received }) => {
            assert_eq!(expected, 5);
            assert_eq!(received, 3);
        }
        other => panic!("Expected PeerClosed, got {:?}", other),
    }
}

#[test]
fn test_payload_read_error() {
    let err = read_payload(&mut BrokenReader, 5).unwrap_err();
    assert!(matches!(err, OtpError::Connection(_)));
    assert!(err.is_disconnect());
}

#[test]
fn test_partial_writes_are_completed() {
    let mut writer = ChunkedWriter {
        written: Vec::new(),
        chunk: 2,
        calls: 0,
    };
    write_payload(&mut writer, b"HELLO WORLD").unwrap();
    assert_eq!(writer.written, b"HELLO WORLD");
    assert_eq!(writer.calls, 6);
}

#[test]
fn test_stalled_write_is_connection_error() {
    let err = write_payload(&mut StalledWriter, b"HELLO").unwrap_err();
    assert!(matches!(err, OtpError::Connection(_)));
}

#[test]
fn test_empty_payload_writes_nothing() {
    let mut writer = ChunkedWriter {
        written: Vec::new(),
        chunk: 2,
        calls: 0,
    };
    write_payload(&mut writer, b"").unwrap();
    assert_eq!(writer.calls, 0);
}

// =============================================================================
// Acknowledgement Tests
// =============================================================================

#[test]
fn test_ack_is_exact_length() {
    let mut out = Vec::new();
    write_ack(&mut out).unwrap();
    assert_eq!(&out[..], &ACK[..]);

    // Two acks back to back must not be swallowed by one read
    out.extend_from_slice(ACK);
    let mut reader = ChunkedReader::new(out, 64);
    read_ack(&mut reader).unwrap();
    read_ack(&mut reader).unwrap();
    assert!(read_ack(&mut reader).is_err());
}

#[test]
fn test_ack_content_not_checked() {
    let mut reader = Cursor::new(b"OK!".to_vec());
    assert!(read_ack(&mut reader).is_ok());
}

#[test]
fn test_ack_split_across_reads() {
    let mut reader = ChunkedReader::new(ACK.to_vec(), 1);
    read_ack(&mut reader).unwrap();
    assert_eq!(reader.calls, ACK.len());
}
