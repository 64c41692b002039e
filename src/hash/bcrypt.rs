//! bcrypt wrapper.
//!
//! The token is bcrypt's own modular-crypt string (`$2b$10$...`) and is
//! treated as opaque. Hashing refuses passwords over 72 bytes instead of
//! truncating them; validation compares the first 72 bytes, as bcrypt always has.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PasswordHasher;
use crate::error::{Error, Result};

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;
pub const DEFAULT_COST: u32 = 10;
pub const MAX_PASSWORD_LEN: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BcryptParams {
    cost: u32,
}

impl Default for BcryptParams {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl BcryptParams {
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct BcryptHasher {
    params: BcryptParams,
}

impl BcryptHasher {
    pub fn new(params: BcryptParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BcryptParams {
        &self.params
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let cost = self.params.cost;
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(Error::InvalidCostFactor(cost));
        }

        // bcrypt reads at most 72 bytes; refuse rather than truncate
        if password.len() > MAX_PASSWORD_LEN {
            return Err(Error::PasswordTooLong(password.len()));
        }

        ::bcrypt::hash(password, cost).map_err(|e| Error::KeyDerivation(e.to_string()))
    }

    /// Mismatch and malformed tokens both return [`Error::InvalidHash`].
    fn validate(&self, token: &str, password: &str) -> Result<()> {
        match ::bcrypt::verify(password, token) {
            Ok(true) => Ok(()),
            Ok(false) => {
                debug!("bcrypt hash mismatch");
                Err(Error::InvalidHash)
            }
            Err(e) => {
                debug!(error = %e, "rejecting malformed bcrypt token");
                Err(Error::InvalidHash)
            }
        }
    }
}
