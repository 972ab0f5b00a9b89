//! Password credential domain
//!
//! Cost parameters, the self-describing token format and the randomness
//! capability used to salt new credentials.

mod params;
mod random;
mod token;

pub use params::{
    default_parameters, CostParameters, MAX_KEY_LENGTH, MAX_PARALLELISM, MAX_SALT_LENGTH,
    MIN_KEY_LENGTH, MIN_SALT_LENGTH,
};
pub use random::RandomSource;
pub use token::{EncodedToken, ALGORITHM_ID, CURRENT_VERSION, SUPPORTED_VERSIONS};

#[cfg(test)]
pub use random::mock;
