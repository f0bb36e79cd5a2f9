//! Core discovery engine: picks the walk mode for a root value and merges the
//! walks into a catalog

use crate::discovery::catalog::{DiscoveryStats, FieldCatalog, FieldDescriptor};
use crate::discovery::config::DiscoveryConfig;
use crate::discovery::path::FieldPath;
use crate::discovery::walker::{FieldWalker, Walk};
use crate::error::{DiscoveryError, ScoutResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, info};

/// How the root value was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    /// Root walked as one object
    Object,
    /// Array-valued properties of an object root explored as collections
    ExplorationSets,
    /// Root array sampled directly
    Collection,
    /// Nothing to walk
    Empty,
}

/// Metadata about a discovery run
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryMetadata {
    pub mode: DiscoveryMode,
    pub field_count: usize,
    pub processing_time_ms: u64,
    pub stats: DiscoveryStats,
}

/// Discovery output: the catalog plus how it was produced
#[derive(Debug, Clone)]
pub struct DiscoveryResult {
    pub catalog: FieldCatalog,
    pub metadata: DiscoveryMetadata,
}

impl DiscoveryResult {
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.catalog.iter()
    }

    pub fn into_fields(self) -> Vec<FieldDescriptor> {
        self.catalog.into_vec()
    }
}

/// Main discovery engine
pub struct DiscoveryEngine {
    config: DiscoveryConfig,
}

impl DiscoveryEngine {
    /// Create an engine, rejecting invalid configuration
    pub fn new(config: DiscoveryConfig) -> ScoutResult<Self> {
        config.validate().map_err(DiscoveryError::configuration)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Discover every reachable field path in `root`
    pub fn discover(&self, root: &Value) -> DiscoveryResult {
        let start_time = Instant::now();
        let walker = FieldWalker::new(&self.config);
        let root_path = FieldPath::root(self.config.root_label.as_str());

        let (mode, walks) = match root {
            Value::Object(object) if object.is_empty() => (DiscoveryMode::Empty, Vec::new()),
            Value::Array(items) if items.is_empty() => (DiscoveryMode::Empty, Vec::new()),
            Value::Object(object) if self.config.check_objects => (
                DiscoveryMode::Object,
                vec![walker.walk_object(object, &root_path)],
            ),
            Value::Object(object) => self.explore_object(&walker, root, object, &root_path),
            Value::Array(items) => (
                DiscoveryMode::Collection,
                vec![walker.walk_elements(items, &root_path)],
            ),
            _ => {
                debug!("root is not an object or array, nothing to discover");
                (DiscoveryMode::Empty, Vec::new())
            }
        };

        let mut catalog = FieldCatalog::new();
        let mut stats = DiscoveryStats::default();
        for walk in walks {
            stats.absorb(&walk.stats);
            stats.duplicates_dropped += catalog.merge(walk.fields);
        }

        let processing_time = start_time.elapsed();
        info!(
            ?mode,
            fields = catalog.len(),
            sampled = stats.elements_sampled,
            "discovery complete"
        );

        DiscoveryResult {
            metadata: DiscoveryMetadata {
                mode,
                field_count: catalog.len(),
                processing_time_ms: processing_time.as_millis() as u64,
                stats,
            },
            catalog,
        }
    }

    /// Catalog mode for an object root: explore each array-valued property,
    /// or sample the root itself when it has none
    fn explore_object(
        &self,
        walker: &FieldWalker<'_>,
        root: &Value,
        object: &Map<String, Value>,
        root_path: &FieldPath,
    ) -> (DiscoveryMode, Vec<Walk>) {
        let walks: Vec<Walk> = object
            .iter()
            .filter_map(|(key, value)| match value {
                Value::Array(items) => {
                    let set_path = if self.config.qualify_sets {
                        root_path.child(key)
                    } else {
                        root_path.clone()
                    };
                    debug!(set = %key, length = items.len(), "exploring array property");
                    let mut walk = walker.walk_elements(items, &set_path);
                    walk.stats.exploration_sets += 1;
                    Some(walk)
                }
                _ => None,
            })
            .collect();

        if walks.is_empty() {
            debug!("object root has no array-valued properties, sampling the root");
            return (
                DiscoveryMode::Collection,
                vec![walker.walk_elements(std::slice::from_ref(root), root_path)],
            );
        }

        (DiscoveryMode::ExplorationSets, walks)
    }
}
