//! Error types for NutriScan
//!
//! The classifier itself never fails; these cover the I/O around it
//! (profile store, config files, product resolution).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Capture contained no image data")]
    EmptyCapture,
}

pub type Result<T> = std::result::Result<T, Error>;
