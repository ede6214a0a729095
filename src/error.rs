//! Error types for chainprobe.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid simulation: {0}")]
    InvalidSimulation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chart rendering failed: {0}")]
    Plot(String),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
