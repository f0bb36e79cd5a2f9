//! Error types and handling infrastructure for field discovery
//!
//! Discovery itself never fails: malformed or empty input simply yields an
//! empty catalog. Errors come from reading input, validating configuration
//! and writing output.

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

/// Core error types for the discovery pipeline
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryErrorKind {
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        location: Option<(usize, usize)>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Output error: {message}")]
    Output { message: String },
}

impl DiscoveryErrorKind {
    pub fn json_parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::JsonParse { message, location }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    pub fn output(message: String) -> Self {
        Self::Output { message }
    }
}

/// Main error type for discovery operations
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{kind}")]
    Discovery {
        kind: DiscoveryErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl DiscoveryError {
    pub fn parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::Parse(ParseError::new(message, location))
    }

    pub fn discovery(kind: DiscoveryErrorKind) -> Self {
        Self::Discovery { kind, source: None }
    }

    pub fn discovery_with_source(kind: DiscoveryErrorKind, source: anyhow::Error) -> Self {
        Self::Discovery {
            kind,
            source: Some(source),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::discovery(DiscoveryErrorKind::configuration(message.into()))
    }

    pub fn io(error: std::io::Error, path: Option<PathBuf>) -> Self {
        let message = error.to_string();
        Self::discovery_with_source(DiscoveryErrorKind::io(message, path), error.into())
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "JSON parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("JSON parse error: {}", err.message)
                }
            }
            Self::Discovery { kind, .. } => match kind {
                DiscoveryErrorKind::InputTooLarge { size, limit } => {
                    format!("JSON input too large: {} bytes (limit: {} bytes)", size, limit)
                }
                DiscoveryErrorKind::Io {
                    message,
                    path: Some(path),
                } => {
                    format!("Cannot read {}: {}", path.display(), message)
                }
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }

    /// Short hint printed under the error by the CLI
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Parse(_) => Some("Check the input is a single well-formed JSON document"),
            Self::Discovery { kind, .. } => match kind {
                DiscoveryErrorKind::InputTooLarge { .. } => {
                    Some("Use --max-input-size to raise the input limit")
                }
                DiscoveryErrorKind::Configuration { .. } => {
                    Some("Check --sample-limit, --max-depth and --root values")
                }
                _ => None,
            },
            Self::Other(_) => None,
        }
    }
}

/// JSON parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            message,
            location,
            input_preview: None,
        }
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for discovery operations
pub type ScoutResult<T> = Result<T, DiscoveryError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
