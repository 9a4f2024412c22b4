//! Payload
//!
//! An owned run of symbols headed for the wire, with no terminator and no
//! trailing newline.

use std::fs;
use std::ops::Deref;
use std::path::Path;

use bytes::Bytes;

use super::alphabet;
use crate::error::{OtpError, Result};

/// Owned payload bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    bytes: Bytes,
}

impl Payload {
    /// Wrap `bytes`, checking that every byte is an alphabet symbol
    pub fn new(bytes: impl Into<Bytes>) -> Result<Self> {
        let bytes = bytes.into();
        alphabet::verify(&bytes)?;
        Ok(Self { bytes })
    }

    /// Wrap `bytes` without validation (keys from a trusted generator)
    pub fn trusted(bytes: impl Into<Bytes>) -> Self {
        Self { bytes: bytes.into() }
    }

    /// Read a payload file, dropping one trailing newline
    ///
    /// The contents are not validated; pass them to [`Payload::new`] or
    /// use [`Payload::validate`] afterwards.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut contents = fs::read(path).map_err(|source| OtpError::Input {
            path: path.to_path_buf(),
            source,
        })?;

        if contents.last() == Some(&b'\n') {
            contents.pop();
            if contents.last() == Some(&b'\r') {
                contents.pop();
            }
        }

        Ok(Self::trusted(contents))
    }

    /// Check the alphabet invariant on an already-wrapped payload
    pub fn validate(&self) -> Result<()> {
        alphabet::verify(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl Deref for Payload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}
