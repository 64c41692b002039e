//! Password hashing.
//!
//! Provides Argon2id and scrypt hashers with a self-describing `$`-delimited
//! token, and a bcrypt wrapper using the native modular-crypt encoding.

pub mod argon2;
pub mod bcrypt;
pub mod scrypt;
pub(crate) mod token;

pub use self::argon2::{ARGON2_VERSION, Argon2Hash, Argon2Hasher, Argon2Params};
pub use self::bcrypt::{BcryptHasher, BcryptParams};
pub use self::scrypt::{ScryptHash, ScryptHasher, ScryptParams};

use crate::error::Result;

/// Common contract of every hasher in this crate.
pub trait PasswordHasher {
    /// Hash `password` with a fresh salt and return the storable token.
    fn hash(&self, password: &str) -> Result<String>;

    /// Check `password` against a token produced by [`PasswordHasher::hash`].
    ///
    /// Structural problems with the token surface as their own error kinds.
    /// A well-formed token that does not match returns [`crate::Error::InvalidHash`].
    fn validate(&self, token: &str, password: &str) -> Result<()>;
}
