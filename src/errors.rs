// src/errors.rs

//! Crate-wide error types.
//!
//! Two boundaries matter here:
//! - startup (config loading, the initial sequential build): any error is
//!   fatal and bubbles up to `main` via `anyhow`.
//! - the watch loop: a failed compile is logged and the coordinator keeps
//!   accepting events.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildwatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{pipeline} compile failed: {message}")]
    Compile { pipeline: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BuildwatchError {
    /// Shorthand for a compile failure attributed to a named pipeline.
    pub fn compile(pipeline: impl Into<String>, message: impl Into<String>) -> Self {
        BuildwatchError::Compile {
            pipeline: pipeline.into(),
            message: message.into(),
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BuildwatchError>;
