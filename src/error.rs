//! Error types for the scene and configuration surface
//!
//! The physics core itself never fails; these errors cover rejected bodies
//! and invalid or unparsable settings.

use std::fmt;

/// Errors raised outside the per-tick physics pass
#[derive(Debug)]
pub enum Error {
    /// A body was rejected before entering the scene
    InvalidBody(String),
    /// The scene already holds the maximum number of bodies
    SceneFull { capacity: usize },
    /// A settings field is outside its valid range
    Settings { field: &'static str, reason: String },
    /// Settings JSON could not be parsed or written
    Json(serde_json::Error),
}

impl Error {
    pub(crate) fn settings(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Settings {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBody(msg) => write!(f, "Invalid body: {}", msg),
            Error::SceneFull { capacity } => {
                write!(f, "Scene is full ({} bodies)", capacity)
            }
            Error::Settings { field, reason } => {
                write!(f, "Invalid setting `{}`: {}", field, reason)
            }
            Error::Json(e) => write!(f, "Settings JSON error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
