use std::fmt;

/// Where a [`ContainerConfig`](super::ContainerConfig) field got its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from `variable`, whose raw text was `raw`
    EnvVar { variable: &'static str, raw: String },
    /// Built-in default
    Default(String),
}

impl ConfigSource {
    pub fn is_env_var(&self) -> bool {
        matches!(self, ConfigSource::EnvVar { .. })
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ConfigSource::Default(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::EnvVar { variable, raw } => write!(f, "{}={}", variable, raw),
            ConfigSource::Default(value) => write!(f, "default ({})", value),
        }
    }
}
