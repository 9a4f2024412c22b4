//! Protocol Module
//!
//! Defines the wire protocol spoken between a client and a daemon.
//!
//! The stream carries no delimiters: every read is for an exact byte count
//! that both sides already agree on.
//!
//! ## Number
//! ```text
//! ┌──────────────────────────┐
//! │ i32, big-endian (4)      │
//! └──────────────────────────┘
//! ```
//!
//! ## Exchange
//! ```text
//!  client                              daemon
//!    │ ◄────────── Number(kind) ──────── │  0 = decode, 1 = encode
//!    │ ── Number(input_len) ───────────► │
//!    │ ◄──────────────── ACK ─────────── │
//!    │ ── Number(key_len) ─────────────► │
//!    │ ◄──────────────── ACK ─────────── │
//!    │ ── input (input_len bytes) ─────► │
//!    │ ◄──────────────── ACK ─────────── │
//!    │ ── key (key_len bytes) ─────────► │
//!    │ ◄──── result (input_len bytes) ── │
//! ```
//!
//! There is no error message on the wire. A peer that sees the wrong data
//! at the wrong state closes the connection.

mod codec;
mod kind;

pub use codec::{
    read_ack, read_length, read_number, read_payload, write_ack, write_length, write_number,
    write_payload, ACK, NUMBER_SIZE,
};
pub use kind::ServerKind;
