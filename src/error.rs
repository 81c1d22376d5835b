//! Startup and configuration error types.
//!
//! The frame loop itself never fails — degenerate inputs are clamped or
//! guarded locally — so these types only cover the two startup paths that
//! can go wrong: loading the UI font (fatal) and reading the optional
//! tuning file (degrades to compiled defaults).

use std::fmt;

/// Top-level error enum for startup resource loading.
#[derive(Debug)]
pub enum GameError {
    /// The UI font could not be read or parsed. This aborts the game before
    /// the frame loop starts.
    FontLoad {
        /// Path that was attempted.
        path: String,
        /// Human-readable cause from the filesystem or the font parser.
        reason: String,
    },

    /// The tuning override file exists but could not be read.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Human-readable cause from the filesystem.
        reason: String,
    },

    /// The tuning override file was read but is not valid TOML for
    /// [`crate::config::TuningConfig`].
    ConfigParse {
        /// Path that was attempted.
        path: String,
        /// Deserializer message.
        reason: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::FontLoad { path, reason } => {
                write!(f, "failed to load font '{}': {}", path, reason)
            }
            GameError::ConfigRead { path, reason } => {
                write!(f, "failed to read tuning file '{}': {}", path, reason)
            }
            GameError::ConfigParse { path, reason } => {
                write!(f, "failed to parse tuning file '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
