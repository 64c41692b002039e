//! Argon2id password hashing.
//!
//! Token format:
//! ```text
//! VERSION $ MEMORY_COST $ TIME_COST $ PARALLELISM $ hex(SALT) $ hex(KEY)
//! ```

use std::fmt;
use std::str::FromStr;

use ::argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use super::{PasswordHasher, token};
use crate::eq::ct_eq;
use crate::error::{Error, Result};
use crate::salt::{OsSaltGenerator, SaltGenerator};

/// Argon2 version number written into every token (0x13).
pub const ARGON2_VERSION: u32 = Version::V0x13 as u32;

const FIELDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Argon2Params {
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
    salt_len: usize,
    key_len: usize,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            // memory cost in KiB
            memory_cost: 64 * 1024, // 64 MiB
            // number of passes
            time_cost: 3,
            // number of lanes
            parallelism: 2,
            salt_len: 32,
            key_len: 32,
        }
    }
}

impl Argon2Params {
    pub fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn with_memory_cost(mut self, memory_cost: u32) -> Self {
        self.memory_cost = memory_cost;
        self
    }

    pub fn with_time_cost(mut self, time_cost: u32) -> Self {
        self.time_cost = time_cost;
        self
    }

    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
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
}

/// Derive an Argon2id key of `params.key_len()` bytes.
///
/// # Errors
///
/// Returns [`Error::KeyDerivation`] with the engine's message if the
/// parameters or salt are rejected.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &Argon2Params,
) -> Result<Zeroizing<Vec<u8>>> {
    let engine_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(params.key_len),
    )
    .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, engine_params);

    let mut key = Zeroizing::new(vec![0u8; params.key_len]);
    argon2
        .hash_password_into(password, salt, key.as_mut_slice())
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    Ok(key)
}

/// A completed Argon2id hash: the parameters, salt and derived key of one token.
#[derive(Clone)]
pub struct Argon2Hash {
    params: Argon2Params,
    salt: Vec<u8>,
    key: Zeroizing<Vec<u8>>,
}

impl Argon2Hash {
    fn compute(password: &str, salt: Vec<u8>, params: Argon2Params) -> Result<Self> {
        let params = params.with_salt_len(salt.len());
        let key = derive_key(password.as_bytes(), &salt, &params)?;
        Ok(Self { params, salt, key })
    }

    /// Cost parameters; salt and key lengths reflect the stored bytes.
    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Re-derive from `password` with this hash's parameters and compare in constant time.
    pub fn verify(&self, password: &str) -> Result<()> {
        let candidate = derive_key(password.as_bytes(), &self.salt, &self.params)?;

        if ct_eq(&self.key, &candidate) {
            Ok(())
        } else {
            debug!("argon2 derived key mismatch");
            Err(Error::InvalidHash)
        }
    }
}

impl fmt::Debug for Argon2Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hash")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Argon2Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}${}${}${}${}${}",
            ARGON2_VERSION,
            self.params.memory_cost,
            self.params.time_cost,
            self.params.parallelism,
            const_hex::encode(&self.salt),
            const_hex::encode(self.key.as_slice()),
        )
    }
}

impl FromStr for Argon2Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let [version, memory_cost, time_cost, parallelism, salt, key] =
            token::split::<FIELDS>(s)?;

        // any integer is a version; only the current one is accepted
        let version: i64 = token::parse_number("version", version)?;
        let expected = i64::from(ARGON2_VERSION);
        if version != expected {
            return Err(Error::IncompatibleVersion {
                expected,
                found: version,
            });
        }

        let memory_cost = token::parse_number("memory cost", memory_cost)?;
        let time_cost = token::parse_number("time cost", time_cost)?;
        let parallelism = token::parse_number("parallelism", parallelism)?;

        let salt = token::decode_hex("salt", salt)?;
        let key = Zeroizing::new(token::decode_hex("derived key", key)?);

        Ok(Self {
            params: Argon2Params {
                memory_cost,
                time_cost,
                parallelism,
                salt_len: salt.len(),
                key_len: key.len(),
            },
            salt,
            key,
        })
    }
}

/// Argon2id hasher producing `$`-delimited tokens.
pub struct Argon2Hasher<S = OsSaltGenerator> {
    params: Argon2Params,
    salt_gen: S,
}

impl Argon2Hasher {
    pub fn new(params: Argon2Params) -> Self {
        Self {
            params,
            salt_gen: OsSaltGenerator,
        }
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new(Argon2Params::default())
    }
}

impl<S: SaltGenerator> Argon2Hasher<S> {
    /// Replace the salt source, e.g. with a fixed salt in tests.
    pub fn with_salt_generator<T: SaltGenerator>(self, salt_gen: T) -> Argon2Hasher<T> {
        Argon2Hasher {
            params: self.params,
            salt_gen,
        }
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    /// Hash `password` with a fresh salt and return the parsed form of the token.
    pub fn derive(&self, password: &str) -> Result<Argon2Hash> {
        let salt = self.salt_gen.generate(self.params.salt_len)?;
        Argon2Hash::compute(password, salt, self.params)
    }
}

impl<S: SaltGenerator> PasswordHasher for Argon2Hasher<S> {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(self.derive(password)?.to_string())
    }

    fn validate(&self, token: &str, password: &str) -> Result<()> {
        let stored = token
            .parse::<Argon2Hash>()
            .inspect_err(|e| debug!(error = %e, "rejecting malformed argon2 token"))?;
        stored.verify(password)
    }
}
