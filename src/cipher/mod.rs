//! AES encryption in CBC and GCM modes.
//!
//! Both modes accept 16, 24 or 32-byte secrets (AES-128/192/256).

pub mod cbc;
pub mod gcm;

pub use cbc::Cbc;
pub use gcm::Gcm;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use crate::error::{Error, Result};

/// AES block length in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Encrypted bytes with their text representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    bytes: Vec<u8>,
}

impl Ciphertext {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = const_hex::decode(hex).map_err(|source| Error::HexDecode {
            field: "ciphertext",
            source,
        })?;
        Ok(Self { bytes })
    }

    /// Parse the URL-safe, padded base64 form produced by [`Ciphertext::to_base64`].
    pub fn from_base64(encoded: &str) -> Result<Self> {
        Ok(Self {
            bytes: URL_SAFE.decode(encoded)?,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        const_hex::encode(&self.bytes)
    }

    /// URL-safe base64 with padding.
    pub fn to_base64(&self) -> String {
        URL_SAFE.encode(&self.bytes)
    }
}

impl AsRef<[u8]> for Ciphertext {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings_describe_same_bytes() {
        let ct = Ciphertext::new(vec![0xfb, 0xff, 0x00, 0x1c]);

        assert_eq!(ct.to_hex(), "fbff001c");
        assert_eq!(ct.to_base64(), "-_8AHA==");
        assert_eq!(Ciphertext::from_hex(&ct.to_hex()).unwrap(), ct);
        assert_eq!(Ciphertext::from_base64(&ct.to_base64()).unwrap(), ct);
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            Ciphertext::from_hex("zz"),
            Err(Error::HexDecode { field: "ciphertext", .. })
        ));
    }

    #[test]
    fn from_base64_rejects_standard_alphabet() {
        assert!(matches!(
            Ciphertext::from_base64("+/8AHA=="),
            Err(Error::Base64Decode(_))
        ));
    }
}
