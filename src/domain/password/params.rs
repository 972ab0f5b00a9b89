//! Cost parameters for password derivation

use serde::{Deserialize, Serialize};

use crate::domain::PasswordHashError;

/// Shortest salt accepted, in bytes
pub const MIN_SALT_LENGTH: usize = 8;
/// Longest salt accepted, in bytes
pub const MAX_SALT_LENGTH: usize = 64;
/// Shortest digest accepted, in bytes
pub const MIN_KEY_LENGTH: usize = 4;
/// Longest digest accepted, in bytes
pub const MAX_KEY_LENGTH: usize = 1024;
/// Highest lane count the derivation supports
pub const MAX_PARALLELISM: u32 = 0x00FF_FFFF;

/// Work factor used to derive one digest.
///
/// The values are frozen into every token produced with them, so changing
/// the profile later never invalidates credentials already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParameters {
    /// Working memory in KiB
    pub memory_cost: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Number of lanes
    pub parallelism: u32,
    /// Bytes of random salt generated per hash
    pub salt_length: usize,
    /// Bytes of derived digest
    pub key_length: usize,
}

impl CostParameters {
    /// Recommended profile: 19 MiB, 2 passes, 1 lane, 16-byte salt, 32-byte digest
    pub const DEFAULT: CostParameters = CostParameters {
        memory_cost: 19_456,
        iterations: 2,
        parallelism: 1,
        salt_length: 16,
        key_length: 32,
    };

    pub const fn new(
        memory_cost: u32,
        iterations: u32,
        parallelism: u32,
        salt_length: usize,
        key_length: usize,
    ) -> Self {
        Self {
            memory_cost,
            iterations,
            parallelism,
            salt_length,
            key_length,
        }
    }

    pub fn with_memory_cost(mut self, memory_cost: u32) -> Self {
        self.memory_cost = memory_cost;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_salt_length(mut self, salt_length: usize) -> Self {
        self.salt_length = salt_length;
        self
    }

    pub fn with_key_length(mut self, key_length: usize) -> Self {
        self.key_length = key_length;
        self
    }

    /// Check the invariants every profile must satisfy
    ///
    /// Rules:
    /// - All fields greater than 0
    /// - Memory at least 8 KiB per lane
    /// - Parallelism at most 2^24 - 1
    /// - Salt between 8 and 64 bytes
    /// - Digest between 4 and 1024 bytes
    pub fn validate(&self) -> Result<(), PasswordHashError> {
        if self.memory_cost == 0 {
            return Err(PasswordHashError::invalid_parameters(
                "memory_cost must be greater than 0",
            ));
        }

        if self.iterations == 0 {
            return Err(PasswordHashError::invalid_parameters(
                "iterations must be greater than 0",
            ));
        }

        if self.parallelism == 0 {
            return Err(PasswordHashError::invalid_parameters(
                "parallelism must be greater than 0",
            ));
        }

        if self.salt_length == 0 {
            return Err(PasswordHashError::invalid_parameters(
                "salt_length must be greater than 0",
            ));
        }

        if self.key_length == 0 {
            return Err(PasswordHashError::invalid_parameters(
                "key_length must be greater than 0",
            ));
        }

        if self.parallelism > MAX_PARALLELISM {
            return Err(PasswordHashError::invalid_parameters(format!(
                "parallelism exceeds maximum of {}",
                MAX_PARALLELISM
            )));
        }

        if u64::from(self.memory_cost) < 8 * u64::from(self.parallelism) {
            return Err(PasswordHashError::invalid_parameters(format!(
                "memory_cost must be at least 8 KiB per lane ({} KiB for {} lanes)",
                8 * u64::from(self.parallelism),
                self.parallelism
            )));
        }

        if !(MIN_SALT_LENGTH..=MAX_SALT_LENGTH).contains(&self.salt_length) {
            return Err(PasswordHashError::invalid_parameters(format!(
                "salt_length must be between {} and {} bytes",
                MIN_SALT_LENGTH, MAX_SALT_LENGTH
            )));
        }

        if !(MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&self.key_length) {
            return Err(PasswordHashError::invalid_parameters(format!(
                "key_length must be between {} and {} bytes",
                MIN_KEY_LENGTH, MAX_KEY_LENGTH
            )));
        }

        Ok(())
    }
}

impl Default for CostParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The process-wide recommended cost profile
pub const fn default_parameters() -> CostParameters {
    CostParameters::DEFAULT
}
