//! Configuration options for field discovery

use crate::sniffer::DatePolicy;

/// Elements sampled from any array unless configured otherwise
pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

/// Default first segment of every field path
pub const DEFAULT_ROOT_LABEL: &str = "root";

/// Discovery configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryConfig {
    /// Walk the root as a single object instead of a collection
    pub check_objects: bool,
    /// Maximum elements sampled from each array
    pub sample_limit: usize,
    /// Which strings and numbers count as dates
    pub date_policy: DatePolicy,
    /// Walk object elements of arrays nested inside sampled records
    pub descend_arrays: bool,
    /// Maximum nesting depth
    pub max_depth: Option<usize>,
    /// First segment of every field path
    pub root_label: String,
    /// Name each exploration set in its paths (`root.data[].id` instead of `root[].id`)
    pub qualify_sets: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            check_objects: false,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            date_policy: DatePolicy::Strict,
            descend_arrays: false,
            max_depth: Some(1000), // Reasonable limit to prevent stack overflow
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            qualify_sets: false,
        }
    }
}

impl DiscoveryConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the root as one object (`root.a.b` paths)
    pub fn objects() -> Self {
        Self {
            check_objects: true,
            ..Default::default()
        }
    }

    /// Sample more elements and follow nested arrays of records
    pub fn deep() -> Self {
        Self {
            sample_limit: 25,
            descend_arrays: true,
            ..Default::default()
        }
    }

    /// Permissive date detection matching browser date parsing
    pub fn legacy_dates() -> Self {
        Self {
            date_policy: DatePolicy::Lenient,
            ..Default::default()
        }
    }

    pub fn with_check_objects(mut self, enabled: bool) -> Self {
        self.check_objects = enabled;
        self
    }

    /// Set the per-array sample limit
    pub fn with_sample_limit(mut self, limit: usize) -> Result<Self, String> {
        if limit == 0 {
            return Err("Sample limit must be at least 1".to_string());
        }
        self.sample_limit = limit;
        Ok(self)
    }

    pub fn with_date_policy(mut self, policy: DatePolicy) -> Self {
        self.date_policy = policy;
        self
    }

    pub fn with_descend_arrays(mut self, enabled: bool) -> Self {
        self.descend_arrays = enabled;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_qualified_sets(mut self, enabled: bool) -> Self {
        self.qualify_sets = enabled;
        self
    }

    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_limit == 0 {
            return Err("Sample limit must be at least 1".to_string());
        }

        if self.max_depth == Some(0) {
            return Err("Max depth must be at least 1".to_string());
        }

        if self.root_label.is_empty() {
            return Err("Root label cannot be empty".to_string());
        }

        if self.root_label.contains(['.', '[', ']']) {
            return Err(format!(
                "Root label '{}' cannot contain '.', '[' or ']'",
                self.root_label
            ));
        }

        Ok(())
    }

    /// Whether descending to `depth` is still allowed
    pub fn allows_depth(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |limit| depth <= limit)
    }
}
