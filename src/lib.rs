//! Password hashing and AES encryption with self-describing outputs.
//!
//! Hashers produce a single storable token that carries every parameter
//! needed to validate a candidate password later:
//!
//! - [`Argon2Hasher`]: `version$memory$time$parallelism$hex(salt)$hex(key)`
//! - [`ScryptHasher`]: `N$r$p$hex(salt)$hex(key)`
//! - [`BcryptHasher`]: bcrypt's native `$2b$...` string
//!
//! Ciphers return a [`Ciphertext`] exposing raw bytes, lowercase hex and
//! URL-safe base64:
//!
//! - [`Cbc`]: AES-CBC with PKCS#7 padding and a caller-supplied IV
//! - [`Gcm`]: AES-GCM with a random nonce prepended to the output
//!
//! ```no_run
//! use hashcrypt::{Argon2Hasher, PasswordHasher};
//!
//! let hasher = Argon2Hasher::default();
//! let token = hasher.hash("correct horse")?;
//! hasher.validate(&token, "correct horse")?;
//! # Ok::<(), hashcrypt::Error>(())
//! ```

pub mod cipher;
mod eq;
mod error;
pub mod hash;
pub mod padding;
pub mod salt;

pub use crate::cipher::{Cbc, Ciphertext, Gcm};
pub use crate::eq::ct_eq;
pub use crate::error::{Error, Result};
pub use crate::hash::{
    Argon2Hash, Argon2Hasher, Argon2Params, BcryptHasher, BcryptParams, PasswordHasher,
    ScryptHash, ScryptHasher, ScryptParams,
};
pub use crate::salt::{OsSaltGenerator, SaltGenerator, generate_salt};
