//! Error type shared across the crate.
//!
//! The widget computations never fail; errors only come from argument
//! parsing, settings and writing scene files.

/// Top-level error type
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("Settings error: {message}")]
    Settings { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Scene writing error: {message}")]
    Scene { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using GeoError
pub type GeoResult<T> = Result<T, GeoError>;

impl GeoError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings {
            message: msg.into(),
        }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene {
            message: msg.into(),
        }
    }
}
