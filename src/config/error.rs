//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("no config file `{0}` found in this directory or any parent")]
    NoConfig(PathBuf),

    #[error("unknown job `{name}` (available: {available})")]
    UnknownJob { name: String, available: String },
}
