//! Depth-first field walk
//!
//! Every walk returns a fresh [`Walk`] that the caller merges; nothing is
//! accumulated across calls.

use crate::discovery::catalog::{DiscoveryStats, FieldDescriptor};
use crate::discovery::config::DiscoveryConfig;
use crate::discovery::path::FieldPath;
use serde_json::{Map, Value};
use tracing::debug;

/// Fields found by one walk, in pre-order, plus the counters it gathered
#[derive(Debug, Clone, Default)]
pub struct Walk {
    pub fields: Vec<FieldDescriptor>,
    pub stats: DiscoveryStats,
}

impl Walk {
    fn append(&mut self, other: Walk) {
        self.fields.extend(other.fields);
        self.stats.absorb(&other.stats);
    }
}

/// Walks objects and sampled array elements according to a configuration
pub struct FieldWalker<'a> {
    config: &'a DiscoveryConfig,
}

impl<'a> FieldWalker<'a> {
    pub fn new(config: &'a DiscoveryConfig) -> Self {
        Self { config }
    }

    /// Record every property of `object` below `prefix`, recursing into
    /// nested objects.
    pub fn walk_object(&self, object: &Map<String, Value>, prefix: &FieldPath) -> Walk {
        let mut walk = Walk::default();

        for (key, value) in object {
            let path = prefix.child(key);
            walk.fields.push(FieldDescriptor::new(
                path.clone(),
                value.clone(),
                self.config.date_policy,
            ));

            match value {
                Value::Object(nested) if !nested.is_empty() => {
                    if self.config.allows_depth(path.depth() + 1) {
                        walk.append(self.walk_object(nested, &path));
                    } else {
                        debug!(field = %path, "depth limit reached, not descending");
                        walk.stats.depth_limited += 1;
                    }
                }
                Value::Array(items) if self.config.descend_arrays && !items.is_empty() => {
                    if self.config.allows_depth(path.depth() + 1) {
                        walk.append(self.walk_elements(items, &path));
                    } else {
                        debug!(field = %path, "depth limit reached, not descending");
                        walk.stats.depth_limited += 1;
                    }
                }
                _ => {}
            }
        }

        walk
    }

    /// Walk the first `sample_limit` elements of the array at `array_path`.
    ///
    /// Elements that are not objects are skipped.
    pub fn walk_elements(&self, items: &[Value], array_path: &FieldPath) -> Walk {
        let mut walk = Walk::default();
        let element_path = array_path.elements();

        if items.len() > self.config.sample_limit {
            debug!(
                field = %array_path,
                length = items.len(),
                sampled = self.config.sample_limit,
                "sampling array"
            );
            walk.stats.arrays_truncated += 1;
        }

        for item in items.iter().take(self.config.sample_limit) {
            walk.stats.elements_sampled += 1;
            match item {
                Value::Object(object) => walk.append(self.walk_object(object, &element_path)),
                _ => walk.stats.elements_skipped += 1,
            }
        }

        walk
    }
}
