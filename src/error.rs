use std::num::ParseIntError;

/// Errors returned by every hashing and encryption operation in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("salt generation failed: {0}")]
    SaltGeneration(String),

    #[error("nonce generation failed: {0}")]
    NonceGeneration(String),

    #[error("invalid hash length: expected {expected} fields, found {found}")]
    InvalidHashLength { expected: usize, found: usize },

    /// A numeric token field did not parse. `literal` is the field text as found.
    #[error("invalid {field} {literal:?}: {source}")]
    Parse {
        field: &'static str,
        literal: String,
        #[source]
        source: ParseIntError,
    },

    #[error("incompatible argon2 version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: i64, found: i64 },

    #[error("invalid {field} encoding: {source}")]
    HexDecode {
        field: &'static str,
        #[source]
        source: const_hex::FromHexError,
    },

    #[error("invalid base64 encoding: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// The recomputed key did not match the stored one.
    #[error("invalid hash")]
    InvalidHash,

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("bcrypt cost {0} is outside allowed range (4,31)")]
    InvalidCostFactor(u32),

    #[error("password is {0} bytes, bcrypt accepts at most 72")]
    PasswordTooLong(usize),

    #[error("invalid cipher key length: {0} bytes")]
    InvalidCipherKeyLength(usize),

    #[error("invalid iv length: expected {expected} bytes, found {found}")]
    InvalidIvLength { expected: usize, found: usize },

    #[error("ciphertext too short: {len} bytes, need at least {min}")]
    CiphertextTooShort { len: usize, min: usize },

    #[error("ciphertext length {0} is not a multiple of the block size")]
    InvalidCiphertextLength(usize),

    #[error("invalid padding")]
    InvalidPadding,

    #[error("encryption failed")]
    Encryption,

    #[error("authentication failed")]
    AuthenticationFailed,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
