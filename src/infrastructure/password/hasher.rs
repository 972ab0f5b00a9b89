//! Argon2id password hashing

use std::fmt::Debug;

use argon2::{Algorithm, Argon2, Block, Params, Version};
use tracing::{debug, warn};

use super::compare::constant_time_eq;
use super::os_random::OsRandomSource;
use crate::domain::password::CURRENT_VERSION;
use crate::domain::{CostParameters, EncodedToken, PasswordHashError, RandomSource};

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password into a self-describing token
    fn hash(&self, password: &[u8], params: &CostParameters) -> Result<String, PasswordHashError>;

    /// Verify a password against a stored token.
    ///
    /// `Ok(false)` means the password is wrong; a token that cannot be read
    /// is an error, never a mismatch.
    fn verify(&self, password: &[u8], token: &str) -> Result<bool, PasswordHashError>;

    /// Whether a stored token was produced with something other than `params`
    /// at the current algorithm revision
    fn needs_rehash(
        &self,
        token: &str,
        params: &CostParameters,
    ) -> Result<bool, PasswordHashError> {
        params.validate()?;
        let parsed = EncodedToken::parse(token)?;

        Ok(parsed.version() != CURRENT_VERSION || parsed.params() != params)
    }
}

/// Argon2id hasher with an injectable salt source
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher<R: RandomSource = OsRandomSource> {
    random: R,
}

impl Argon2Hasher<OsRandomSource> {
    /// Create a hasher salting from the operating system CSPRNG
    pub fn new() -> Self {
        Self {
            random: OsRandomSource,
        }
    }
}

impl<R: RandomSource> Argon2Hasher<R> {
    /// Create a hasher drawing salt from `random`
    pub fn with_random_source(random: R) -> Self {
        Self { random }
    }
}

impl<R: RandomSource> PasswordHasher for Argon2Hasher<R> {
    fn hash(&self, password: &[u8], params: &CostParameters) -> Result<String, PasswordHashError> {
        params.validate()?;

        debug!(
            memory_cost = params.memory_cost,
            iterations = params.iterations,
            parallelism = params.parallelism,
            "Hashing password"
        );

        let mut salt = vec![0u8; params.salt_length];
        self.random.fill_bytes(&mut salt)?;

        let mut digest = vec![0u8; params.key_length];
        derive(password, &salt, params, Version::V0x13, &mut digest)?;

        Ok(EncodedToken::new(CURRENT_VERSION, *params, salt, digest).to_string())
    }

    fn verify(&self, password: &[u8], token: &str) -> Result<bool, PasswordHashError> {
        let parsed = EncodedToken::parse(token)
            .inspect_err(|e| warn!(error = %e, "Rejected stored password token"))?;

        let version = argon2_version(parsed.version())?;
        let params = parsed.params();

        debug!(
            memory_cost = params.memory_cost,
            iterations = params.iterations,
            parallelism = params.parallelism,
            version = parsed.version(),
            "Verifying password"
        );

        let mut candidate = vec![0u8; parsed.digest().len()];
        derive(password, parsed.salt(), params, version, &mut candidate)?;

        Ok(constant_time_eq(&candidate, parsed.digest()))
    }
}

fn argon2_version(version: u32) -> Result<Version, PasswordHashError> {
    match version {
        0x10 => Ok(Version::V0x10),
        0x13 => Ok(Version::V0x13),
        other => Err(PasswordHashError::unsupported_format(format!(
            "unknown algorithm version {}",
            other
        ))),
    }
}

/// Run Argon2id into `output`, whose length is the digest length.
///
/// Working memory is reserved up front so an unsatisfiable `memory_cost`
/// surfaces as an error instead of aborting the process.
fn derive(
    password: &[u8],
    salt: &[u8],
    params: &CostParameters,
    version: Version,
    output: &mut [u8],
) -> Result<(), PasswordHashError> {
    let argon2_params = Params::new(
        params.memory_cost,
        params.iterations,
        params.parallelism,
        Some(output.len()),
    )
    .map_err(|e| PasswordHashError::invalid_parameters(e.to_string()))?;

    let block_count = argon2_params.block_count();
    let mut memory: Vec<Block> = Vec::new();
    memory.try_reserve_exact(block_count).map_err(|_| {
        PasswordHashError::derivation(format!(
            "cannot allocate {} KiB of working memory",
            params.memory_cost
        ))
    })?;
    memory.resize(block_count, Block::default());

    Argon2::new(Algorithm::Argon2id, version, argon2_params)
        .hash_password_into_with_memory(password, salt, output, memory.as_mut_slice())
        .map_err(|e| PasswordHashError::derivation(e.to_string()))
}
