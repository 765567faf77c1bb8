//! Error types for PathaNav

use thiserror::Error;

/// PathaNav error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Map provider error: {0}")]
    MapProvider(String),

    #[error("Transform unavailable: {0}")]
    Transform(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
