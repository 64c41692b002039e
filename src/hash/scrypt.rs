//! scrypt password hashing.
//!
//! Token format:
//! ```text
//! N $ R $ P $ hex(SALT) $ hex(KEY)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use super::{PasswordHasher, token};
use crate::eq::ct_eq;
use crate::error::{Error, Result};
use crate::salt::{OsSaltGenerator, SaltGenerator};

const FIELDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScryptParams {
    n: u64,
    r: u32,
    p: u32,
    salt_len: usize,
    key_len: usize,
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self {
            // highest power of two that derives in roughly 100ms
            n: 32768,
            r: 8,
            p: 1,
            salt_len: 32,
            key_len: 32,
        }
    }
}

impl ScryptParams {
    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn r(&self) -> u32 {
        self.r
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn with_n(mut self, n: u64) -> Self {
        self.n = n;
        self
    }

    pub fn with_r(mut self, r: u32) -> Self {
        self.r = r;
        self
    }

    pub fn with_p(mut self, p: u32) -> Self {
        self.p = p;
        self
    }

    pub fn with_salt_len(mut self, salt_len: usize) -> Self {
        self.salt_len = salt_len;
        self
    }

    pub fn with_key_len(mut self, key_len: usize) -> Self {
        self.key_len = key_len;
        self
    }

    fn log_n(&self) -> Result<u8> {
        if self.n <= 1 || !self.n.is_power_of_two() {
            return Err(Error::KeyDerivation(
                "scrypt: N must be > 1 and a power of 2".to_string(),
            ));
        }
        Ok(self.n.trailing_zeros() as u8)
    }
}

/// Derive an scrypt key of `params.key_len()` bytes.
///
/// # Errors
///
/// Returns [`Error::KeyDerivation`] if `N` is not a power of two greater
/// than one, or if the engine rejects the parameters.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &ScryptParams,
) -> Result<Zeroizing<Vec<u8>>> {
    // the engine's `len` only sizes PHC output; the key length comes from the buffer
    let engine_params = ::scrypt::Params::new(
        params.log_n()?,
        params.r,
        params.p,
        ::scrypt::Params::RECOMMENDED_LEN,
    )
    .map_err(|e| Error::KeyDerivation(format!("scrypt: {e}")))?;

    let mut key = Zeroizing::new(vec![0u8; params.key_len]);
    ::scrypt::scrypt(password, salt, &engine_params, key.as_mut_slice())
        .map_err(|e| Error::KeyDerivation(format!("scrypt: {e}")))?;

    Ok(key)
}

/// A completed scrypt hash.
#[derive(Clone)]
pub struct ScryptHash {
    params: ScryptParams,
    salt: Vec<u8>,
    key: Zeroizing<Vec<u8>>,
}

impl ScryptHash {
    fn compute(password: &str, salt: Vec<u8>, params: ScryptParams) -> Result<Self> {
        let params = params.with_salt_len(salt.len());
        let key = derive_key(password.as_bytes(), &salt, &params)?;
        Ok(Self { params, salt, key })
    }

    pub fn params(&self) -> &ScryptParams {
        &self.params
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn verify(&self, password: &str) -> Result<()> {
        let candidate = derive_key(password.as_bytes(), &self.salt, &self.params)?;

        if ct_eq(&self.key, &candidate) {
            Ok(())
        } else {
            debug!("scrypt derived key mismatch");
            Err(Error::InvalidHash)
        }
    }
}

impl fmt::Debug for ScryptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScryptHash")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ScryptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}${}${}${}${}",
            self.params.n,
            self.params.r,
            self.params.p,
            const_hex::encode(&self.salt),
            const_hex::encode(self.key.as_slice()),
        )
    }
}

impl FromStr for ScryptHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [n, r, p, salt, key] = token::split::<FIELDS>(s)?;

        let n = token::parse_number("N", n)?;
        let r = token::parse_number("r", r)?;
        let p = token::parse_number("p", p)?;

        let salt = token::decode_hex("salt", salt)?;
        let key = Zeroizing::new(token::decode_hex("derived key", key)?);

        Ok(Self {
            params: ScryptParams {
                n,
                r,
                p,
                salt_len: salt.len(),
                key_len: key.len(),
            },
            salt,
            key,
        })
    }
}

/// scrypt hasher producing `$`-delimited tokens.
pub struct ScryptHasher<S = OsSaltGenerator> {
    params: ScryptParams,
    salt_gen: S,
}

impl ScryptHasher {
    pub fn new(params: ScryptParams) -> Self {
        Self {
            params,
            salt_gen: OsSaltGenerator,
        }
    }
}

impl Default for ScryptHasher {
    fn default() -> Self {
        Self::new(ScryptParams::default())
    }
}

impl<S: SaltGenerator> ScryptHasher<S> {
    pub fn with_salt_generator<T: SaltGenerator>(self, salt_gen: T) -> ScryptHasher<T> {
        ScryptHasher {
            params: self.params,
            salt_gen,
        }
    }

    pub fn params(&self) -> &ScryptParams {
        &self.params
    }

    pub fn derive(&self, password: &str) -> Result<ScryptHash> {
        let salt = self.salt_gen.generate(self.params.salt_len)?;
        ScryptHash::compute(password, salt, self.params)
    }
}

impl<S: SaltGenerator> PasswordHasher for ScryptHasher<S> {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(self.derive(password)?.to_string())
    }

    fn validate(&self, token: &str, password: &str) -> Result<()> {
        let stored = token
            .parse::<ScryptHash>()
            .inspect_err(|e| debug!(error = %e, "rejecting malformed scrypt token"))?;
        stored.verify(password)
    }
}
