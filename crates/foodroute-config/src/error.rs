//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("`{0}` is required for this command")]
    MissingField(String),

    #[error("{field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("config references ${{{0}}} but it is not set")]
    EnvVarNotSet(String),

    #[error("env substitution pattern: {0}")]
    EnvPattern(#[from] regex::Error),

    #[error("reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("config is not valid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}
