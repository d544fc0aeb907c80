use thiserror::Error;

/// Errors raised while loading or validating a [`ContainerConfig`](super::ContainerConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Environment variable {variable}='{value}' could not be parsed. Expected: {expected}")]
    InvalidEnvVar {
        variable: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Which environment variable was malformed, if any
    pub fn variable(&self) -> Option<&'static str> {
        match self {
            Self::InvalidEnvVar { variable, .. } => Some(variable),
            _ => None,
        }
    }
}
