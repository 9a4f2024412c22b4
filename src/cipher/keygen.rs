//! Key generation
//!
//! Draws symbols uniformly from the alphabet. The thread-local RNG is fine
//! for this simulation but the output is not a secure pad.

use rand::Rng;

use super::alphabet::{self, LEN};

/// Generate a key of `len` symbols
pub fn generate(len: usize) -> String {
    generate_with(&mut rand::rng(), len)
}

/// Generate a key of `len` symbols from the given RNG
pub fn generate_with<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| alphabet::symbol_at(rng.random_range(0..LEN)) as char)
        .collect()
}
