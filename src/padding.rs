//! PKCS#7 block padding.
//!
//! With an 8-byte block this is PKCS#5. Padding is always between 1 and
//! `block_size` bytes, each byte holding the padding length.

use crate::error::{Error, Result};

/// Pad `data` up to the next multiple of `block_size`.
///
/// A full block of padding is appended when `data` is already aligned.
pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&block_size));

    let padding = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + padding);
    padded.extend_from_slice(data);
    padded.resize(data.len() + padding, padding as u8);
    padded
}

/// Strip the padding added by [`pad`].
///
/// # Errors
///
/// Returns [`Error::InvalidPadding`] if:
/// - `data` is empty
/// - the claimed padding length is zero, larger than `data` or larger than `block_size`
/// - any padding byte differs from the claimed length
pub fn unpad(data: &[u8], block_size: usize) -> Result<&[u8]> {
    let Some(&last) = data.last() else {
        return Err(Error::InvalidPadding);
    };

    let padding = last as usize;
    if padding == 0 || padding > data.len() || padding > block_size {
        return Err(Error::InvalidPadding);
    }

    let (body, tail) = data.split_at(data.len() - padding);
    if tail.iter().any(|&b| b != last) {
        return Err(Error::InvalidPadding);
    }

    Ok(body)
}
