//! Field discovery for arbitrary JSON
//!
//! A Rust CLI tool and library that walks JSON documents (API responses,
//! database sample rows) and produces a flat catalog of typed field paths
//! such as `root[].user.address.city`, ready to populate field pickers.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod sniffer;

// Re-export commonly used types
pub use discovery::{
    discover_with_config, field_finder, DiscoveryConfig, DiscoveryEngine, DiscoveryResult,
    FieldCatalog, FieldDescriptor,
};
pub use error::{DiscoveryError, DiscoveryErrorKind, ParseError};
pub use formatter::{CatalogFormatter, FieldOption, OutputFormat};
pub use parser::JsonSource;
pub use sniffer::{determine_type, determine_type_with_policy, DatePolicy, TypeTag};

/// Parse a JSON string and discover its fields with default configuration
pub fn discover_json_str(json: &str, check_objects: bool) -> Result<Vec<FieldDescriptor>, DiscoveryError> {
    let value = parser::parse_json_str(json)?;
    Ok(field_finder(&value, check_objects))
}
