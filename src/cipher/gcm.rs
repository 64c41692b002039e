//! AES-GCM authenticated encryption.
//!
//! Output layout:
//! ```text
//! NONCE (12) | CIPHERTEXT | TAG (16)
//! ```

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};
use zeroize::Zeroizing;

use super::Ciphertext;
use crate::error::{Error, Result};
use crate::salt::secure_random;

/// Length of the nonce (12 bytes / 96 bits).
pub const NONCE_LEN: usize = 12;
/// Length of the authentication tag (16 bytes).
pub const TAG_LEN: usize = 16;

type Aes192Gcm = AesGcm<Aes192, U12>;

enum AeadCipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl AeadCipher {
    fn new(secret: &[u8]) -> Result<Self> {
        let invalid = |_| Error::InvalidCipherKeyLength(secret.len());

        match secret.len() {
            16 => Aes128Gcm::new_from_slice(secret).map(Self::Aes128).map_err(invalid),
            24 => Aes192Gcm::new_from_slice(secret).map(Self::Aes192).map_err(invalid),
            32 => Aes256Gcm::new_from_slice(secret).map(Self::Aes256).map_err(invalid),
            len => Err(Error::InvalidCipherKeyLength(len)),
        }
    }

    fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.encrypt(nonce, plaintext),
            Self::Aes192(c) => c.encrypt(nonce, plaintext),
            Self::Aes256(c) => c.encrypt(nonce, plaintext),
        }
    }

    fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::<U12>::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.decrypt(nonce, ciphertext),
            Self::Aes192(c) => c.decrypt(nonce, ciphertext),
            Self::Aes256(c) => c.decrypt(nonce, ciphertext),
        }
    }
}

pub struct Gcm {
    secret: Zeroizing<Vec<u8>>,
}

impl Gcm {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
        }
    }

    /// Encrypt `plaintext` under a fresh random nonce, prepended to the output.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Ciphertext> {
        let cipher = AeadCipher::new(&self.secret)?;

        let mut nonce = [0u8; NONCE_LEN];
        secure_random(&mut nonce).map_err(|e| Error::NonceGeneration(e.to_string()))?;

        let sealed = cipher
            .seal(&nonce, plaintext)
            .map_err(|_| Error::Encryption)?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(Ciphertext::new(out))
    }

    /// Split off the nonce, then decrypt and authenticate the rest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CiphertextTooShort`] if the input cannot hold a nonce and
    /// [`Error::AuthenticationFailed`] if the tag does not verify.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let cipher = AeadCipher::new(&self.secret)?;

        if ciphertext.len() < NONCE_LEN {
            return Err(Error::CiphertextTooShort {
                len: ciphertext.len(),
                min: NONCE_LEN,
            });
        }

        let (nonce, sealed) = ciphertext.split_at(NONCE_LEN);
        let plaintext = cipher
            .open(nonce, sealed)
            .map_err(|_| Error::AuthenticationFailed)?;

        Ok(Zeroizing::new(plaintext))
    }
}
