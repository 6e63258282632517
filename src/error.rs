//! Error types.
//!
//! Nothing in the simulation itself can fail; errors only arise at the edges
//! (configuration files, the background asset, terminal I/O).

use std::path::PathBuf;

/// Top-level error for the game.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// IO error from filesystem or terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value is outside its valid range
    #[error("config value '{name}' = {value} is invalid: {reason}")]
    InvalidConfig {
        name: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Failure while loading the optional background image.  These never reach
/// the caller of the game loop: the loader logs them and keeps the solid fill.
#[derive(thiserror::Error, Debug)]
pub enum BackgroundError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported image format (magic {0:?}, expected \"P6\")")]
    UnsupportedFormat(String),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("pixel data truncated: got {got} bytes, need {need}")]
    Truncated { got: usize, need: usize },

    /// The loader thread went away before delivering a result.
    #[error("loader thread disconnected")]
    Disconnected,
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
