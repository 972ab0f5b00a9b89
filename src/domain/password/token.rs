//! Self-describing credential token
//!
//! Layout: `$argon2id$v=<version>$m=<memory>,t=<iterations>,p=<parallelism>$<salt>$<digest>`
//! with salt and digest in standard unpadded base64. The token is the only
//! artifact callers persist; everything needed to re-derive the digest is in it.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};

use super::params::CostParameters;
use crate::domain::PasswordHashError;

/// Algorithm identifier written into every token
pub const ALGORITHM_ID: &str = "argon2id";

/// Revision emitted for new tokens (0x13)
pub const CURRENT_VERSION: u32 = 0x13;

/// Revisions accepted when reading tokens
pub const SUPPORTED_VERSIONS: [u32; 2] = [0x10, 0x13];

const FIELD_COUNT: usize = 6;

/// Parsed form of a stored credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedToken {
    version: u32,
    params: CostParameters,
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl EncodedToken {
    /// Build a token; salt and key lengths in `params` follow the actual bytes
    pub fn new(version: u32, params: CostParameters, salt: Vec<u8>, digest: Vec<u8>) -> Self {
        let params = params
            .with_salt_length(salt.len())
            .with_key_length(digest.len());

        Self {
            version,
            params,
            salt,
            digest,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn params(&self) -> &CostParameters {
        &self.params
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Parse a stored token.
    ///
    /// Tokens naming another algorithm or an unknown revision yield
    /// `UnsupportedFormat`; any other defect yields `MalformedToken`.
    pub fn parse(token: &str) -> Result<Self, PasswordHashError> {
        let fields: Vec<&str> = token.split('$').collect();

        if fields.len() < 2 || !fields[0].is_empty() || fields[1].is_empty() {
            return Err(PasswordHashError::malformed_token(
                "token must start with '$' followed by an algorithm identifier",
            ));
        }

        if fields[1] != ALGORITHM_ID {
            return Err(PasswordHashError::unsupported_format(format!(
                "unknown algorithm identifier '{}'",
                fields[1]
            )));
        }

        if fields.len() != FIELD_COUNT {
            return Err(PasswordHashError::malformed_token(format!(
                "expected {} '$'-separated fields, found {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        let version = fields[2]
            .strip_prefix("v=")
            .ok_or_else(|| PasswordHashError::malformed_token("missing version field"))
            .and_then(|value| parse_decimal("version", value))?;

        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(PasswordHashError::unsupported_format(format!(
                "unknown algorithm version {}",
                version
            )));
        }

        let (memory_cost, iterations, parallelism) = parse_cost_field(fields[3])?;
        let salt = decode_base64("salt", fields[4])?;
        let digest = decode_base64("digest", fields[5])?;

        let params = CostParameters::new(
            memory_cost,
            iterations,
            parallelism,
            salt.len(),
            digest.len(),
        );
        params
            .validate()
            .map_err(|e| PasswordHashError::malformed_token(e.to_string()))?;

        Ok(Self {
            version,
            params,
            salt,
            digest,
        })
    }
}

impl fmt::Display for EncodedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            ALGORITHM_ID,
            self.version,
            self.params.memory_cost,
            self.params.iterations,
            self.params.parallelism,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.digest)
        )
    }
}

impl FromStr for EncodedToken {
    type Err = PasswordHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_cost_field(field: &str) -> Result<(u32, u32, u32), PasswordHashError> {
    let parts: Vec<&str> = field.split(',').collect();

    if parts.len() != 3 {
        return Err(PasswordHashError::malformed_token(
            "parameter field must be 'm=<memory>,t=<iterations>,p=<parallelism>'",
        ));
    }

    let memory_cost = parse_keyed(parts[0], "m")?;
    let iterations = parse_keyed(parts[1], "t")?;
    let parallelism = parse_keyed(parts[2], "p")?;

    Ok((memory_cost, iterations, parallelism))
}

fn parse_keyed(part: &str, key: &str) -> Result<u32, PasswordHashError> {
    let value = part
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| {
            PasswordHashError::malformed_token(format!("expected parameter '{}='", key))
        })?;

    parse_decimal(key, value)
}

// u32::from_str accepts a leading '+' and leading zeros, which the format does not
fn parse_decimal(name: &str, value: &str) -> Result<u32, PasswordHashError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PasswordHashError::malformed_token(format!(
            "{} must be a decimal integer",
            name
        )));
    }

    if value.len() > 1 && value.starts_with('0') {
        return Err(PasswordHashError::malformed_token(format!(
            "{} must not have leading zeros",
            name
        )));
    }

    value.parse::<u32>().map_err(|_| {
        PasswordHashError::malformed_token(format!("{} is out of range", name))
    })
}

fn decode_base64(name: &str, value: &str) -> Result<Vec<u8>, PasswordHashError> {
    STANDARD_NO_PAD.decode(value).map_err(|e| {
        PasswordHashError::malformed_token(format!("{} is not valid unpadded base64: {}", name, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "$argon2id$v=19$m=64,t=1,p=1$c29tZXNhbHQ$AAECAwQFBgcICQoLDA0ODw";

    fn sample_token() -> EncodedToken {
        EncodedToken::new(
            CURRENT_VERSION,
            CostParameters::new(64, 1, 1, 0, 0),
            b"somesalt".to_vec(),
            (0u8..16).collect(),
        )
    }

    #[test]
    fn test_format() {
        assert_eq!(sample_token().to_string(), SAMPLE);
    }

    #[test]
    fn test_parse() {
        let token = EncodedToken::parse(SAMPLE).unwrap();

        assert_eq!(token.version(), 19);
        assert_eq!(token.params().memory_cost, 64);
        assert_eq!(token.params().iterations, 1);
        assert_eq!(token.params().parallelism, 1);
        assert_eq!(token.params().salt_length, 8);
        assert_eq!(token.params().key_length, 16);
        assert_eq!(token.salt(), b"somesalt");
        assert_eq!(token.digest(), (0u8..16).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn test_parse_then_format_is_identity() {
        let token: EncodedToken = SAMPLE.parse().unwrap();
        assert_eq!(token.to_string(), SAMPLE);
        assert_eq!(token, sample_token());
    }

    #[test]
    fn test_new_tracks_byte_lengths() {
        let token = EncodedToken::new(
            CURRENT_VERSION,
            CostParameters::DEFAULT,
            vec![7u8; 24],
            vec![9u8; 48],
        );

        assert_eq!(token.params().salt_length, 24);
        assert_eq!(token.params().key_length, 48);
    }

    #[test]
    fn test_older_version_accepted() {
        let token = EncodedToken::parse(&SAMPLE.replace("v=19", "v=16")).unwrap();
        assert_eq!(token.version(), 16);
    }

    #[test]
    fn test_garbage_is_malformed() {
        for input in ["trashhash", "", "$", "argon2id$v=19", "not-a-valid-token"] {
            let err = EncodedToken::parse(input).unwrap_err();
            assert!(
                matches!(err, PasswordHashError::MalformedToken { .. }),
                "{:?} gave {:?}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_foreign_algorithm_is_unsupported() {
        let inputs = [
            SAMPLE.replace("argon2id", "argon2i"),
            SAMPLE.replace("argon2id", "ARGON2ID"),
            "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW".to_string(),
        ];

        for input in inputs {
            assert!(matches!(
                EncodedToken::parse(&input),
                Err(PasswordHashError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn test_unknown_version_is_unsupported() {
        assert!(matches!(
            EncodedToken::parse(&SAMPLE.replace("v=19", "v=20")),
            Err(PasswordHashError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_truncated_tokens_are_malformed() {
        // Cutting the digest on a base64 boundary past its 4-byte minimum
        // leaves a well-formed token with a shorter digest.
        for end in 10..SAMPLE.len() - 16 {
            let truncated = &SAMPLE[..end];
            let err = EncodedToken::parse(truncated).unwrap_err();
            assert!(err.is_token_error(), "{:?}", truncated);
        }
    }

    #[test]
    fn test_bad_parameter_field() {
        let inputs = [
            SAMPLE.replace("m=64,t=1,p=1", "m=64,t=1"),
            SAMPLE.replace("m=64,t=1,p=1", "t=1,m=64,p=1"),
            SAMPLE.replace("m=64,t=1,p=1", "m=+64,t=1,p=1"),
            SAMPLE.replace("m=64,t=1,p=1", "m= 64,t=1,p=1"),
            SAMPLE.replace("m=64,t=1,p=1", "m=64,t=1,p=1,x=2"),
            SAMPLE.replace("m=64,t=1,p=1", "m=99999999999,t=1,p=1"),
            SAMPLE.replace("m=64,t=1,p=1", "m=0,t=1,p=1"),
            SAMPLE.replace("m=64,t=1,p=1", "m=64,t=0,p=1"),
            SAMPLE.replace("v=19", "v=abc"),
            SAMPLE.replace("v=19", "19"),
        ];

        for input in inputs {
            assert!(
                matches!(
                    EncodedToken::parse(&input),
                    Err(PasswordHashError::MalformedToken { .. })
                ),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_leading_zeros_rejected() {
        let inputs = [
            SAMPLE.replace("v=19", "v=019"),
            SAMPLE.replace("m=64,t=1,p=1", "m=0064,t=1,p=1"),
            SAMPLE.replace("m=64,t=1,p=1", "m=64,t=01,p=1"),
            SAMPLE.replace("m=64,t=1,p=1", "m=64,t=1,p=00"),
            SAMPLE
                .replace("v=19", "v=019")
                .replace("m=64,t=1,p=1", "m=0064,t=01,p=1"),
        ];

        for input in inputs {
            assert!(
                matches!(
                    EncodedToken::parse(&input),
                    Err(PasswordHashError::MalformedToken { .. })
                ),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_bad_base64() {
        let inputs = [
            SAMPLE.replace("c29tZXNhbHQ", "c29tZXNhbHQ="),
            SAMPLE.replace("c29tZXNhbHQ", "c29t*XNhbHQ"),
            SAMPLE.replace("c29tZXNhbHQ", ""),
            SAMPLE.replace("c29tZXNhbHQ", "c29tZQ"),
        ];

        for input in inputs {
            assert!(
                matches!(
                    EncodedToken::parse(&input),
                    Err(PasswordHashError::MalformedToken { .. })
                ),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_no_trimming() {
        assert!(EncodedToken::parse(&format!(" {}", SAMPLE)).is_err());
        assert!(EncodedToken::parse(&format!("{}\n", SAMPLE)).is_err());
    }
}
