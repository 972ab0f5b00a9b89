//! ti-auth password credentials
//!
//! Turns a plaintext password into a salted Argon2id digest serialized as a
//! self-describing token, and verifies passwords against such tokens:
//!
//! ```text
//! $argon2id$v=19$m=19456,t=2,p=1$<base64 salt>$<base64 digest>
//! ```
//!
//! The token carries the algorithm, revision, cost parameters and salt, so
//! tokens stay verifiable after the default cost profile changes.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    default_parameters, CostParameters, EncodedToken, PasswordHashError, RandomSource,
};
pub use infrastructure::password::{
    constant_time_eq, Argon2Hasher, OsRandomSource, PasswordHasher,
};

/// Hash `password` with `params`, salting from the operating system CSPRNG
pub fn hash(
    password: impl AsRef<[u8]>,
    params: &CostParameters,
) -> Result<String, PasswordHashError> {
    Argon2Hasher::new().hash(password.as_ref(), params)
}

/// Verify `password` against a token produced by [`hash`]
pub fn verify(password: impl AsRef<[u8]>, token: &str) -> Result<bool, PasswordHashError> {
    Argon2Hasher::new().verify(password.as_ref(), token)
}

/// Whether `token` should be replaced by a fresh hash under `params`
pub fn needs_rehash(token: &str, params: &CostParameters) -> Result<bool, PasswordHashError> {
    Argon2Hasher::new().needs_rehash(token, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello123_scenario() {
        let token = hash("hello123", &default_parameters()).unwrap();

        assert_eq!(verify("hello123", &token), Ok(true));
        assert_eq!(verify("123hello", &token), Ok(false));
        assert!(matches!(
            verify("hello123", "trashhash"),
            Err(PasswordHashError::MalformedToken { .. })
        ));
        assert_eq!(needs_rehash(&token, &default_parameters()), Ok(false));
    }

    #[test]
    fn test_invalid_parameters_produce_no_token() {
        let params = default_parameters().with_memory_cost(0);

        assert!(matches!(
            hash("hello123", &params),
            Err(PasswordHashError::InvalidParameters { .. })
        ));
    }
}
