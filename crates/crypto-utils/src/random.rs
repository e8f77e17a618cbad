use rand::RngCore;
use rand_core::OsRng;

use crate::error::CryptoError;

/// Fills `buf` from the operating system's CSPRNG.
///
/// Unlike `fill_bytes`, a failing entropy source surfaces as an error
/// instead of a panic.
pub fn fill_random(buf: &mut [u8]) -> Result<(), CryptoError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::RandomUnavailable(e.to_string()))
}

/// Generates a fixed-size array of cryptographically secure random bytes.
pub fn random_bytes_fixed<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut buf = [0u8; N];
    fill_random(&mut buf)?;
    Ok(buf)
}
