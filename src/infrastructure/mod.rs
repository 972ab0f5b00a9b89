//! Infrastructure layer - Concrete hashing, randomness and logging

pub mod logging;
pub mod password;
