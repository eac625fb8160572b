// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Failed to read env file {path}: {message}")]
    EnvFile { path: PathBuf, message: String },

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
