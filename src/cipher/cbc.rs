//! AES-CBC with PKCS#7 padding.
//!
//! The IV is supplied by the caller and used as given. Reusing an IV with the
//! same secret leaks whether two plaintexts share a prefix; choosing a fresh
//! IV per message is the caller's responsibility. The output carries no
//! metadata, so secret and IV must be tracked out of band.

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use zeroize::Zeroizing;

use super::{BLOCK_SIZE, Ciphertext};
use crate::error::{Error, Result};
use crate::padding::{pad, unpad};

/// AES variant selected by the secret length.
#[derive(Debug, Clone, Copy)]
enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    fn of(secret: &[u8]) -> Result<Self> {
        match secret.len() {
            16 => Ok(Self::Aes128),
            24 => Ok(Self::Aes192),
            32 => Ok(Self::Aes256),
            len => Err(Error::InvalidCipherKeyLength(len)),
        }
    }
}

// `buf` is already padded to whole blocks.
fn encrypt_blocks<C>(secret: &[u8], iv: &[u8; BLOCK_SIZE], buf: &mut [u8]) -> Result<()>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let len = buf.len();
    cbc::Encryptor::<C>::new_from_slices(secret, iv)
        .map_err(|_| Error::InvalidCipherKeyLength(secret.len()))?
        .encrypt_padded_mut::<NoPadding>(buf, len)
        .map_err(|_| Error::Encryption)?;
    Ok(())
}

fn decrypt_blocks<C>(secret: &[u8], iv: &[u8; BLOCK_SIZE], buf: &mut [u8]) -> Result<()>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let len = buf.len();
    cbc::Decryptor::<C>::new_from_slices(secret, iv)
        .map_err(|_| Error::InvalidCipherKeyLength(secret.len()))?
        .decrypt_padded_mut::<NoPadding>(buf)
        .map_err(|_| Error::InvalidCiphertextLength(len))?;
    Ok(())
}

pub struct Cbc {
    secret: Zeroizing<Vec<u8>>,
    iv: Zeroizing<Vec<u8>>,
}

impl Cbc {
    pub fn new(secret: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
            iv: Zeroizing::new(iv.as_ref().to_vec()),
        }
    }

    fn iv(&self) -> Result<[u8; BLOCK_SIZE]> {
        self.iv.as_slice().try_into().map_err(|_| Error::InvalidIvLength {
            expected: BLOCK_SIZE,
            found: self.iv.len(),
        })
    }

    /// Pad and encrypt `plaintext`.
    ///
    /// # Errors
    ///
    /// Fails if the secret is not 16, 24 or 32 bytes, or the IV is not one block.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Ciphertext> {
        let size = KeySize::of(&self.secret)?;
        let iv = self.iv()?;

        let mut data = pad(plaintext, BLOCK_SIZE);
        match size {
            KeySize::Aes128 => encrypt_blocks::<Aes128>(&self.secret, &iv, &mut data)?,
            KeySize::Aes192 => encrypt_blocks::<Aes192>(&self.secret, &iv, &mut data)?,
            KeySize::Aes256 => encrypt_blocks::<Aes256>(&self.secret, &iv, &mut data)?,
        }

        Ok(Ciphertext::new(data))
    }

    /// Decrypt and unpad `ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CiphertextTooShort`] for input shorter than one block,
    /// [`Error::InvalidCiphertextLength`] for a partial trailing block and
    /// [`Error::InvalidPadding`] when the decrypted padding is corrupt.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let size = KeySize::of(&self.secret)?;
        let iv = self.iv()?;

        if ciphertext.len() < BLOCK_SIZE {
            return Err(Error::CiphertextTooShort {
                len: ciphertext.len(),
                min: BLOCK_SIZE,
            });
        }
        if ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(Error::InvalidCiphertextLength(ciphertext.len()));
        }

        let mut data = Zeroizing::new(ciphertext.to_vec());
        match size {
            KeySize::Aes128 => decrypt_blocks::<Aes128>(&self.secret, &iv, &mut data)?,
            KeySize::Aes192 => decrypt_blocks::<Aes192>(&self.secret, &iv, &mut data)?,
            KeySize::Aes256 => decrypt_blocks::<Aes256>(&self.secret, &iv, &mut data)?,
        }

        let len = unpad(&data, BLOCK_SIZE)?.len();
        data.truncate(len);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "3t6w9z$C&F)J@NcR";
    const IV: &str = "KbPeShVmYq3t6w9z";

    #[test]
    fn encrypt_known_vector() {
        let cbc = Cbc::new(SECRET, IV);
        let ct = cbc.encrypt(b"test-123").unwrap();

        assert_eq!(
            ct.as_bytes(),
            b"\x1c\xefi\xbb5I\xdd\xe3\xd6w\x13=y\xd5\x05:"
        );
        assert_eq!(ct.to_hex(), "1cef69bb3549dde3d677133d79d5053a");
    }

    #[test]
    fn decrypt_known_vector() {
        let cbc = Cbc::new(SECRET, IV);
        let ct = Ciphertext::from_hex("1cef69bb3549dde3d677133d79d5053a").unwrap();

        assert_eq!(cbc.decrypt(ct.as_bytes()).unwrap().as_slice(), b"test-123");
    }

    #[test]
    fn chains_multiple_blocks() {
        // NIST SP 800-38A F.2.1, followed by a full block of padding
        let key = const_hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv = const_hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let plaintext = const_hex::decode(
            "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51",
        )
        .unwrap();

        let cbc = Cbc::new(&key, &iv);
        let ct = cbc.encrypt(&plaintext).unwrap();
        assert_eq!(
            ct.to_hex(),
            "7649abac8119b246cee98e9b12e9197d\
             5086cb9b507219ee95db113a917678b2\
             55e21d7100b988ffec32feeafaf23538"
        );
        assert_eq!(cbc.decrypt(ct.as_bytes()).unwrap().as_slice(), &plaintext[..]);
    }

    #[test]
    fn aes256_first_block() {
        // NIST SP 800-38A F.2.5
        let key = const_hex::decode(
            "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
        )
        .unwrap();
        let iv = const_hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let plaintext = const_hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let ct = Cbc::new(&key, &iv).encrypt(&plaintext).unwrap();
        assert_eq!(
            const_hex::encode(&ct.as_bytes()[..BLOCK_SIZE]),
            "f58c4c04d6e5f1ba779eabfb5f7bfbd6"
        );
    }

    #[test]
    fn roundtrip_all_key_sizes() {
        let plaintext = b"a message spanning more than a single aes block";
        for len in [16, 24, 32] {
            let cbc = Cbc::new(vec![7u8; len], [9u8; BLOCK_SIZE]);
            let ct = cbc.encrypt(plaintext).unwrap();
            assert_eq!(ct.as_bytes().len() % BLOCK_SIZE, 0);
            assert_eq!(cbc.decrypt(ct.as_bytes()).unwrap().as_slice(), plaintext);
        }
    }

    #[test]
    fn empty_plaintext_is_one_block() {
        let cbc = Cbc::new(SECRET, IV);
        let ct = cbc.encrypt(b"").unwrap();
        assert_eq!(ct.as_bytes().len(), BLOCK_SIZE);
        assert!(cbc.decrypt(ct.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn same_iv_is_deterministic() {
        let cbc = Cbc::new(SECRET, IV);
        assert_eq!(cbc.encrypt(b"x").unwrap(), cbc.encrypt(b"x").unwrap());
    }

    #[test]
    fn invalid_key_length_fails() {
        let cbc = Cbc::new("short", IV);
        assert!(matches!(
            cbc.encrypt(b"test-123"),
            Err(Error::InvalidCipherKeyLength(5))
        ));
        assert!(matches!(
            cbc.decrypt(&[0u8; 16]),
            Err(Error::InvalidCipherKeyLength(5))
        ));
    }

    #[test]
    fn invalid_iv_length_fails() {
        let cbc = Cbc::new(SECRET, "short-iv");
        assert!(matches!(
            cbc.encrypt(b"test-123"),
            Err(Error::InvalidIvLength {
                expected: 16,
                found: 8
            })
        ));
    }

    #[test]
    fn decrypt_too_short_fails() {
        let cbc = Cbc::new(SECRET, IV);
        assert!(matches!(
            cbc.decrypt(b"too short"),
            Err(Error::CiphertextTooShort { len: 9, min: 16 })
        ));
    }

    #[test]
    fn decrypt_partial_block_fails() {
        let cbc = Cbc::new(SECRET, IV);
        assert!(matches!(
            cbc.decrypt(&[0u8; 20]),
            Err(Error::InvalidCiphertextLength(20))
        ));
    }

    #[test]
    fn decrypt_with_wrong_iv_garbles_padding_or_text() {
        let ct = Cbc::new(SECRET, IV).encrypt(b"test-123").unwrap();
        let other = Cbc::new(SECRET, "0000000000000000");
        match other.decrypt(ct.as_bytes()) {
            Ok(plaintext) => assert_ne!(plaintext.as_slice(), b"test-123"),
            Err(e) => assert!(matches!(e, Error::InvalidPadding)),
        }
    }

    #[test]
    fn decrypt_corrupt_padding_fails() {
        let cbc = Cbc::new(SECRET, IV);
        let mut ct = cbc.encrypt(b"0123456789abcdef").unwrap().into_bytes();
        assert_eq!(ct.len(), 2 * BLOCK_SIZE);

        // last padding byte becomes 0x11
        ct[BLOCK_SIZE - 1] ^= 0x01;
        assert!(matches!(cbc.decrypt(&ct), Err(Error::InvalidPadding)));
    }
}
