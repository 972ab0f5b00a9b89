use thiserror::Error;

/// Errors produced by password hashing and verification
///
/// Messages never carry the plaintext password.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordHashError {
    #[error("Invalid cost parameters: {message}")]
    InvalidParameters { message: String },

    #[error("Random source failure: {message}")]
    RandomSourceFailure { message: String },

    #[error("Derivation failure: {message}")]
    DerivationFailure { message: String },

    #[error("Malformed token: {message}")]
    MalformedToken { message: String },

    #[error("Unsupported token format: {message}")]
    UnsupportedFormat { message: String },
}

impl PasswordHashError {
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    pub fn random_source(message: impl Into<String>) -> Self {
        Self::RandomSourceFailure {
            message: message.into(),
        }
    }

    pub fn derivation(message: impl Into<String>) -> Self {
        Self::DerivationFailure {
            message: message.into(),
        }
    }

    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::MalformedToken {
            message: message.into(),
        }
    }

    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /// Whether the caller may retry the same operation unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RandomSourceFailure { .. } | Self::DerivationFailure { .. }
        )
    }

    /// Whether the error describes a stored token rather than the password
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedToken { .. } | Self::UnsupportedFormat { .. }
        )
    }
}
