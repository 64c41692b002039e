//! Salt generation.
//!
//! Hashers draw their salt through the [`SaltGenerator`] trait so tests can
//! substitute a fixed salt. Production code uses [`OsSaltGenerator`].

use getrandom::fill;

use crate::error::{Error, Result};

/// Source of salt bytes for a single hash operation.
pub trait SaltGenerator {
    /// Returns `len` fresh salt bytes, or an error if the source failed.
    fn generate(&self, len: usize) -> Result<Vec<u8>>;
}

/// Salt drawn from the operating system's secure random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSaltGenerator;

impl SaltGenerator for OsSaltGenerator {
    fn generate(&self, len: usize) -> Result<Vec<u8>> {
        generate_salt(len)
    }
}

impl<F> SaltGenerator for F
where
    F: Fn(usize) -> Result<Vec<u8>>,
{
    fn generate(&self, len: usize) -> Result<Vec<u8>> {
        self(len)
    }
}

/// Fill buffer with cryptographically secure random bytes
pub(crate) fn secure_random(buf: &mut [u8]) -> Result<(), getrandom::Error> {
    fill(buf)
}

/// Generate a salt of exactly `len` bytes
pub fn generate_salt(len: usize) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt).map_err(|e| Error::SaltGeneration(e.to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_salt_has_requested_length() {
        let salt = generate_salt(10).unwrap();
        assert_eq!(salt.len(), 10);
    }

    #[test]
    fn generate_salt_zero_length() {
        assert!(generate_salt(0).unwrap().is_empty());
    }

    #[test]
    fn salts_are_fresh() {
        let a = OsSaltGenerator.generate(32).unwrap();
        let b = OsSaltGenerator.generate(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn closure_generator_is_used_as_is() {
        let fixed = |_len: usize| -> Result<Vec<u8>> { Ok(b"salt".to_vec()) };
        assert_eq!(fixed.generate(32).unwrap(), b"salt");
    }

    #[test]
    fn closure_generator_error_propagates() {
        let failing = |_len: usize| -> Result<Vec<u8>> {
            Err(Error::SaltGeneration("salt gen failed".to_string()))
        };
        match failing.generate(16) {
            Err(Error::SaltGeneration(msg)) => assert_eq!(msg, "salt gen failed"),
            other => panic!("expected SaltGeneration, got: {other:?}"),
        }
    }
}
