//! Shared fixtures for the integration tests

#![allow(dead_code)]

use sig_engine::keys;

#[path = "../../src/fixtures.rs"]
mod fixtures;

pub use fixtures::*;

/// Flip one bit of `bytes`
pub fn flip_bit(bytes: &[u8], bit: usize) -> Vec<u8> {
    let mut flipped = bytes.to_vec();
    flipped[bit / 8] ^= 0x80 >> (bit % 8);
    flipped
}
