//! Reference number generation.
//!
//! A reference number is `n` cryptographically random bytes encoded as
//! URL-safe base64 without padding. With the default 12 bytes that is a
//! 16-character code over `[A-Za-z0-9_-]`.
//!
//! Uniqueness is probabilistic here and enforced by the store; a collision
//! surfaces as [`crate::error::SwapError::DuplicateReference`].

use crate::types::ReferenceNumber;
use base64::Engine;
use rand::RngCore;

/// Generate a fresh reference number from `bytes` random bytes.
#[must_use]
pub fn generate_reference_number(bytes: usize) -> ReferenceNumber {
    let mut rng = rand::thread_rng();
    let mut random_bytes = vec![0u8; bytes];
    rng.fill_bytes(&mut random_bytes);
    ReferenceNumber(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes))
}

/// Length of the encoded reference for `bytes` random bytes.
#[must_use]
pub const fn encoded_len(bytes: usize) -> usize {
    (bytes * 8).div_ceil(6)
}
