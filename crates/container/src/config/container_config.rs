use crate::config::{ConfigError, ConfigSource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

/// Environment variable toggling build-stack cycle detection
pub const DETECT_CYCLES_ENV: &str = "ELIF_CONTAINER_DETECT_CYCLES";

/// Environment variable overriding the maximum nested resolution depth
pub const MAX_DEPTH_ENV: &str = "ELIF_CONTAINER_MAX_DEPTH";

const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 128;

/// Tunables for the resolution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Fail fast when a concrete type is already being built further up the stack
    pub detect_circular_dependencies: bool,
    /// Upper bound on nested `resolve` calls for a single top-level request
    pub max_resolution_depth: usize,
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self {
            detect_circular_dependencies: true,
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Some(value) = env_value(DETECT_CYCLES_ENV, "true or false")? {
            config.detect_circular_dependencies = value;
        }
        if let Some(value) = env_value(MAX_DEPTH_ENV, "a positive integer")? {
            config.max_resolution_depth = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML document
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_resolution_depth == 0 {
            return Err(ConfigError::invalid_value(
                "max_resolution_depth",
                "0",
                "a positive integer",
            ));
        }
        Ok(())
    }

    /// Report where each field was loaded from
    pub fn config_sources(&self) -> HashMap<String, ConfigSource> {
        let source = |variable: &'static str, default: String| match env::var(variable) {
            Ok(raw) => ConfigSource::EnvVar { variable, raw },
            Err(_) => ConfigSource::Default(default),
        };

        HashMap::from([
            (
                "detect_circular_dependencies".to_string(),
                source(DETECT_CYCLES_ENV, "true".to_string()),
            ),
            (
                "max_resolution_depth".to_string(),
                source(MAX_DEPTH_ENV, DEFAULT_MAX_RESOLUTION_DEPTH.to_string()),
            ),
        ])
    }
}

fn env_value<T: FromStr>(
    variable: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Ok(value) = env::var(variable) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => Err(ConfigError::InvalidEnvVar {
            variable,
            value,
            expected,
        }),
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_are_valid() {
        let config = ContainerConfig::default();
        assert!(config.detect_circular_dependencies);
        assert_eq!(config.max_resolution_depth, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let config = ContainerConfig {
            max_resolution_depth: 0,
            ..ContainerConfig::new()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "max_resolution_depth"
        ));
    }

    #[test]
    fn test_yaml_fills_missing_fields_with_defaults() {
        let config = ContainerConfig::from_yaml_str("max_resolution_depth: 16\n").unwrap();
        assert_eq!(config.max_resolution_depth, 16);
        assert!(config.detect_circular_dependencies);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        env::set_var(DETECT_CYCLES_ENV, "false");
        env::set_var(MAX_DEPTH_ENV, "32");

        let config = ContainerConfig::from_env().unwrap();
        assert!(!config.detect_circular_dependencies);
        assert_eq!(config.max_resolution_depth, 32);
        assert_eq!(
            config.config_sources()["max_resolution_depth"],
            ConfigSource::EnvVar {
                variable: MAX_DEPTH_ENV,
                raw: "32".to_string()
            }
        );

        env::remove_var(DETECT_CYCLES_ENV);
        env::remove_var(MAX_DEPTH_ENV);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_garbage() {
        env::set_var(MAX_DEPTH_ENV, "deep");
        let error = ContainerConfig::from_env().unwrap_err();
        assert_eq!(error.variable(), Some(MAX_DEPTH_ENV));
        env::remove_var(MAX_DEPTH_ENV);

        let sources = ContainerConfig::new().config_sources();
        assert!(sources["max_resolution_depth"].is_default());
    }
}
