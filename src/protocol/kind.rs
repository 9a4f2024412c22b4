//! Server kind
//!
//! The tag a daemon announces as the first message on every connection.

use std::fmt;
use std::str::FromStr;

use crate::cipher;
use crate::error::{OtpError, Result};

/// Which transform a daemon performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ServerKind {
    Decode = 0,
    Encode = 1,
}

impl ServerKind {
    /// Wire value of this kind
    pub fn tag(self) -> i32 {
        self as i32
    }

    /// Run this kind's transform over `input` with `key`
    pub fn apply(self, input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        match self {
            ServerKind::Encode => cipher::encode(input, key),
            ServerKind::Decode => cipher::decode(input, key),
        }
    }
}

impl TryFrom<i32> for ServerKind {
    type Error = OtpError;

    fn try_from(tag: i32) -> Result<Self> {
        match tag {
            0 => Ok(ServerKind::Decode),
            1 => Ok(ServerKind::Encode),
            _ => Err(OtpError::Protocol(format!("unknown server kind: {}", tag))),
        }
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerKind::Decode => f.write_str("decode"),
            ServerKind::Encode => f.write_str("encode"),
        }
    }
}

impl FromStr for ServerKind {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "encode" | "enc" => Ok(ServerKind::Encode),
            "decode" | "dec" => Ok(ServerKind::Decode),
            _ => Err(OtpError::Config(format!(
                "unknown kind '{}' (expected encode or decode)",
                s
            ))),
        }
    }
}
