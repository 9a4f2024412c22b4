//! Alphabet
//!
//! The ordered symbol set every transform is computed over. This is
//! process-wide constant data; nothing here allocates or mutates.

use crate::error::{OtpError, Result};

/// The 26 uppercase Latin letters followed by space
pub const SYMBOLS: &[u8; LEN] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ ";

/// Number of symbols in the alphabet
pub const LEN: usize = 27;

/// Marks a byte with no alphabet index
const NOT_A_SYMBOL: u8 = u8::MAX;

/// Reverse lookup: byte value -> index, built at compile time
static INDEX: [u8; 256] = build_index();

const fn build_index() -> [u8; 256] {
    let mut table = [NOT_A_SYMBOL; 256];
    let mut i = 0;
    while i < LEN {
        table[SYMBOLS[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Index of `symbol` in the alphabet, or `None` if it is not a symbol
#[inline]
pub fn index_of(symbol: u8) -> Option<usize> {
    match INDEX[symbol as usize] {
        NOT_A_SYMBOL => None,
        idx => Some(idx as usize),
    }
}

/// Symbol at `index`
///
/// # Panics
/// Panics if `index >= LEN`.
#[inline]
pub fn symbol_at(index: usize) -> u8 {
    SYMBOLS[index]
}

/// True if `symbol` belongs to the alphabet
#[inline]
pub fn contains(symbol: u8) -> bool {
    index_of(symbol).is_some()
}

/// Check that every byte is an alphabet symbol
///
/// Reports the first offending byte and its position.
pub fn verify(bytes: &[u8]) -> Result<()> {
    match bytes.iter().position(|&b| !contains(b)) {
        Some(position) => Err(OtpError::InvalidSymbol {
            byte: bytes[position],
            position,
        }),
        None => Ok(()),
    }
}
