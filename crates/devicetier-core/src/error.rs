//! Error types for devicetier.
//!
//! The classifier itself never fails; these cover the layers around it
//! (configuration, snapshot loading, label parsing).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid capability hint: {0}")]
    InvalidHint(String),

    #[error("Unknown optimization level: {0}")]
    UnknownLevel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
