//! Field discovery over arbitrary JSON documents
//!
//! Produces a flat catalog of field paths with inferred types, used to fill
//! field pickers (filters, pagination cursors, join keys) without a schema.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod path;
pub mod walker;

pub use catalog::{DiscoveryStats, FieldCatalog, FieldDescriptor};
pub use config::DiscoveryConfig;
pub use engine::{DiscoveryEngine, DiscoveryMetadata, DiscoveryMode, DiscoveryResult};
pub use path::{FieldPath, PathSegment};

use serde_json::Value;

/// Discover the fields of `collection` with default settings.
///
/// With `check_objects` the root is walked as one object; otherwise it is
/// treated as a collection of records (or an object holding such collections).
pub fn field_finder(collection: &Value, check_objects: bool) -> Vec<FieldDescriptor> {
    let config = DiscoveryConfig::default().with_check_objects(check_objects);
    discover_with_config(collection, &config)
}

/// Discover fields with an explicit configuration.
///
/// An invalid configuration falls back to an empty result, matching the
/// "never fail" contract of discovery; use [`DiscoveryEngine::new`] to see
/// the validation error.
pub fn discover_with_config(collection: &Value, config: &DiscoveryConfig) -> Vec<FieldDescriptor> {
    match DiscoveryEngine::new(config.clone()) {
        Ok(engine) => engine.discover(collection).into_fields(),
        Err(e) => {
            tracing::warn!(error = %e, "invalid discovery configuration");
            Vec::new()
        }
    }
}
