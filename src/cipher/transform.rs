//! Transform
//!
//! Position-wise encode/decode of an input against a key. Both functions
//! use only the first `input.len()` symbols of the key, never touch the
//! key, and always return a fresh buffer.

use super::alphabet::{self, LEN};
use crate::error::{OtpError, Result};

/// Encode `input` with `key`
///
/// `out[i] = symbol((idx(input[i]) + idx(key[i])) mod 27)`
pub fn encode(input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    apply(input, key, |i, k| (i + k) % LEN)
}

/// Decode `input` with `key`
///
/// Exact inverse of [`encode`] for the same key.
pub fn decode(input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    apply(input, key, |i, k| (i + LEN - k) % LEN)
}

fn apply(input: &[u8], key: &[u8], combine: impl Fn(usize, usize) -> usize) -> Result<Vec<u8>> {
    if key.len() < input.len() {
        return Err(OtpError::KeyTooShort {
            key_len: key.len(),
            input_len: input.len(),
        });
    }

    let mut output = Vec::with_capacity(input.len());
    for (position, (&i, &k)) in input.iter().zip(key).enumerate() {
        let i = index_at(i, position)?;
        let k = index_at(k, position)?;
        output.push(alphabet::symbol_at(combine(i, k)));
    }

    Ok(output)
}

#[inline]
fn index_at(byte: u8, position: usize) -> Result<usize> {
    alphabet::index_of(byte).ok_or(OtpError::InvalidSymbol { byte, position })
}
