//! Domain layer - Credential types and rules

pub mod error;
pub mod password;

pub use error::PasswordHashError;
pub use password::{default_parameters, CostParameters, EncodedToken, RandomSource};
