//! Tests for key generation

use otpad::cipher::{alphabet, encode, keygen};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_generates_requested_length() {
    assert_eq!(keygen::generate(0).len(), 0);
    assert_eq!(keygen::generate(1).len(), 1);
    assert_eq!(keygen::generate(4096).len(), 4096);
}

#[test]
fn test_keys_use_only_alphabet() {
    let key = keygen::generate(10_000);
    assert!(alphabet::verify(key.as_bytes()).is_ok());
}

#[test]
fn test_seeded_generation_is_deterministic() {
    let a = keygen::generate_with(&mut StdRng::seed_from_u64(42), 64);
    let b = keygen::generate_with(&mut StdRng::seed_from_u64(42), 64);
    assert_eq!(a, b);
}

#[test]
fn test_every_symbol_is_reachable() {
    let key = keygen::generate_with(&mut StdRng::seed_from_u64(7), 10_000);
    for &symbol in alphabet::SYMBOLS.iter() {
        assert!(key.as_bytes().contains(&symbol), "missing {:?}", symbol as char);
    }
}

#[test]
fn test_generated_key_encodes() {
    let key = keygen::generate(11);
    let encoded = encode(b"HELLO WORLD", key.as_bytes()).unwrap();
    assert_eq!(encoded.len(), 11);
}
