//! Operating system entropy source

use rand::{rngs::OsRng, RngCore};

use crate::domain::{PasswordHashError, RandomSource};

/// Random source backed by the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), PasswordHashError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| PasswordHashError::random_source(e.to_string()))
    }
}
