//! Cipher Module
//!
//! The one-time pad itself: a fixed 27-symbol alphabet and a position-wise
//! transform of an input against an equal-length slice of a key.
//!
//! ## Alphabet
//! ```text
//! ┌───┬───┬───┬─────┬───┬───┐
//! │ A │ B │ C │ ... │ Z │ ␠ │
//! │ 0 │ 1 │ 2 │     │25 │26 │
//! └───┴───┴───┴─────┴───┴───┘
//! ```
//!
//! ## Transform
//! - encode: `out[i] = (input[i] + key[i]) mod 27`
//! - decode: `out[i] = (input[i] - key[i]) mod 27`

pub mod alphabet;
pub mod keygen;
mod payload;
mod transform;

pub use payload::Payload;
pub use transform::{decode, encode};
