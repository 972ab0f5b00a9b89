//! Source of salt bytes

use std::fmt::Debug;

use crate::domain::PasswordHashError;

/// Capability to fill a buffer with cryptographically secure random bytes.
///
/// Production code uses the operating system source; tests substitute a
/// deterministic or failing source.
pub trait RandomSource: Send + Sync + Debug {
    /// Fill `dest` completely or fail with `RandomSourceFailure`
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), PasswordHashError>;
}
