//! Password hashing infrastructure
//!
//! Argon2id derivation, operating system salt source and fixed-time digest
//! comparison behind the `PasswordHasher` trait.

mod compare;
mod hasher;
mod os_random;

pub use compare::constant_time_eq;
pub use hasher::{Argon2Hasher, PasswordHasher};
pub use os_random::OsRandomSource;
