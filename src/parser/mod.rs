//! JSON input sources and parsing

pub mod directory;
pub mod filter;

use crate::error::{DiscoveryError, DiscoveryErrorKind, ParseError, ParseResult, ScoutResult};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Default cap on a single JSON document
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 100 * 1024 * 1024; // 100MB

/// Options applied when reading and parsing a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum document size in bytes
    pub max_input_size: u64,
    /// Parse with simd-json when the `simd` feature is compiled in
    pub simd: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            simd: false,
        }
    }
}

/// Source for parsing operations
#[derive(Debug, Clone, PartialEq)]
pub enum JsonSource {
    String(String),
    File(PathBuf),
    Directory(PathBuf),
    Stdin,
}

impl JsonSource {
    /// Classify a CLI input: inline JSON, a file, or a directory
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if (trimmed.starts_with('{') && trimmed.ends_with('}'))
            || (trimmed.starts_with('[') && trimmed.ends_with(']'))
        {
            return JsonSource::String(input.to_string());
        }

        let path = PathBuf::from(input);
        if path.is_dir() {
            JsonSource::Directory(path)
        } else {
            JsonSource::File(path)
        }
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            JsonSource::String(_) => "string input".to_string(),
            JsonSource::File(path) => format!("file: {}", path.display()),
            JsonSource::Directory(path) => format!("directory: {}", path.display()),
            JsonSource::Stdin => "standard input".to_string(),
        }
    }

    /// Parse JSON from this source with default options
    pub fn parse(&self) -> ScoutResult<Value> {
        self.parse_with(&ParseOptions::default())
    }

    /// Parse JSON from this source, enforcing the size limit
    pub fn parse_with(&self, options: &ParseOptions) -> ScoutResult<Value> {
        match self {
            JsonSource::Directory(path) => Err(DiscoveryError::discovery(DiscoveryErrorKind::io(
                "Cannot parse directory as single JSON value".to_string(),
                Some(path.clone()),
            ))),
            JsonSource::File(path) => {
                check_file_size(path, options.max_input_size)?;
                let content = self.read_content()?;
                Ok(parse_document(&content, options.simd)?)
            }
            _ => {
                let content = self.read_content()?;
                check_size(content.len() as u64, options.max_input_size)?;
                Ok(parse_document(&content, options.simd)?)
            }
        }
    }

    /// Read content as string (if possible)
    pub fn read_content(&self) -> ScoutResult<String> {
        match self {
            JsonSource::String(content) => Ok(content.clone()),
            JsonSource::File(path) => {
                std::fs::read_to_string(path).map_err(|e| DiscoveryError::io(e, Some(path.clone())))
            }
            JsonSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| DiscoveryError::io(e, None))?;
                Ok(buffer)
            }
            JsonSource::Directory(path) => Err(DiscoveryError::discovery(DiscoveryErrorKind::io(
                "Cannot read directory as content".to_string(),
                Some(path.clone()),
            ))),
        }
    }
}

fn check_file_size(path: &Path, limit: u64) -> ScoutResult<()> {
    let metadata = std::fs::metadata(path).map_err(|e| DiscoveryError::io(e, Some(path.to_path_buf())))?;
    check_size(metadata.len(), limit)
}

fn check_size(size: u64, limit: u64) -> ScoutResult<()> {
    if size > limit {
        return Err(DiscoveryError::discovery(DiscoveryErrorKind::InputTooLarge {
            size,
            limit,
        }));
    }
    Ok(())
}

/// Parse one JSON document from a string
pub fn parse_json_str(content: &str) -> ParseResult<Value> {
    parse_document(content, false)
}

fn parse_document(content: &str, simd: bool) -> ParseResult<Value> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new("Empty JSON input".to_string(), None));
    }

    // on simd failure fall through so the error carries serde_json's line/column
    if simd {
        if let Some(value) = parse_simd(trimmed) {
            return Ok(value);
        }
    }

    serde_json::from_str(trimmed).map_err(|e| {
        let location = (e.line() > 0).then(|| (e.line(), e.column()));
        let mut error = ParseError::new(format!("Invalid JSON: {}", e), location);
        if let Some(preview) = error_preview(trimmed, location) {
            error = error.with_preview(preview);
        }
        error
    })
}

#[cfg(feature = "simd")]
fn parse_simd(content: &str) -> Option<Value> {
    let mut bytes = content.as_bytes().to_vec();
    simd_json::serde::from_slice::<Value>(&mut bytes).ok()
}

#[cfg(not(feature = "simd"))]
fn parse_simd(_content: &str) -> Option<Value> {
    None
}

/// The offending line with a caret under the reported column
fn error_preview(content: &str, location: Option<(usize, usize)>) -> Option<String> {
    let (line, col) = location?;
    let text = content.lines().nth(line.checked_sub(1)?)?;
    let caret = " ".repeat(col.saturating_sub(1).min(text.chars().count()));
    Some(format!("{}\n{}^", text, caret))
}

/// Parse a size string such as `100MB`, `512KB`, `1GB` or `2048`
pub fn parse_size_limit(limit: &str) -> Result<u64, String> {
    let limit_str = limit.trim().to_uppercase();
    let invalid = || format!("Invalid size limit: {}", limit);

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        (size, 1.0)
    } else {
        (limit_str.as_str(), 1.0)
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as u64)
}
