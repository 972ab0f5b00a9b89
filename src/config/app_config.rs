use serde::Deserialize;

use crate::domain::{CostParameters, PasswordHashError};

const ENV_PREFIX: &str = "TI_AUTH";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Cost profile applied to newly hashed passwords
    #[serde(default)]
    pub hashing: CostParameters,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load from `config/default`, `config/local` and `TI_AUTH__*` variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// The configured hashing profile, checked against its invariants
    pub fn hashing_parameters(&self) -> Result<CostParameters, PasswordHashError> {
        self.hashing.validate()?;
        Ok(self.hashing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_toml("");

        assert_eq!(config.hashing, CostParameters::DEFAULT);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_hashing_section() {
        let config = from_toml(
            r#"
            [hashing]
            memory_cost = 65536
            iterations = 3
            "#,
        );

        assert_eq!(config.hashing.memory_cost, 65_536);
        assert_eq!(config.hashing.iterations, 3);
        assert_eq!(config.hashing.parallelism, CostParameters::DEFAULT.parallelism);
        assert_eq!(config.hashing.salt_length, 16);
        assert!(config.hashing_parameters().is_ok());
    }

    #[test]
    fn test_logging_section() {
        let config = from_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"
            "#,
        );

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_hashing_parameters_returns_configured_profile() {
        let config = from_toml(
            r#"
            [hashing]
            memory_cost = 65536
            key_length = 64
            "#,
        );

        let params = config.hashing_parameters().unwrap();
        assert_eq!(params, CostParameters::DEFAULT.with_memory_cost(65_536).with_key_length(64));
    }

    #[test]
    fn test_invalid_hashing_profile_rejected() {
        let config = from_toml(
            r#"
            [hashing]
            iterations = 0
            "#,
        );

        assert!(matches!(
            config.hashing_parameters(),
            Err(PasswordHashError::InvalidParameters { .. })
        ));
    }
}
