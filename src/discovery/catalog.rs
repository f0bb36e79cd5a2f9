//! Field descriptors and the de-duplicating catalog they are collected into

use crate::discovery::path::FieldPath;
use crate::sniffer::{DatePolicy, TypeTag};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// One discovered field: its path, the value first seen there, and its type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub field: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub field_type: TypeTag,
    #[serde(skip)]
    path: FieldPath,
}

impl FieldDescriptor {
    pub fn new(path: FieldPath, value: Value, policy: DatePolicy) -> Self {
        let field_type = TypeTag::of(&value, policy);
        Self {
            field: path.to_string(),
            value,
            field_type,
            path,
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Path without its root, for display in pickers
    pub fn label(&self) -> String {
        self.path.label()
    }
}

/// Counters collected while walking a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryStats {
    /// Array elements handed to the walker
    pub elements_sampled: usize,
    /// Sampled elements that were not objects
    pub elements_skipped: usize,
    /// Top-level array properties explored in catalog mode
    pub exploration_sets: usize,
    /// Arrays longer than the sample limit
    pub arrays_truncated: usize,
    /// Objects not entered because of the depth limit
    pub depth_limited: usize,
    /// Field occurrences dropped because the path was already recorded
    pub duplicates_dropped: usize,
}

impl DiscoveryStats {
    pub fn absorb(&mut self, other: &DiscoveryStats) {
        self.elements_sampled += other.elements_sampled;
        self.elements_skipped += other.elements_skipped;
        self.exploration_sets += other.exploration_sets;
        self.arrays_truncated += other.arrays_truncated;
        self.depth_limited += other.depth_limited;
        self.duplicates_dropped += other.duplicates_dropped;
    }
}

/// Ordered, de-duplicated list of field descriptors
///
/// The first descriptor recorded for a path wins; later ones are dropped.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    entries: Vec<FieldDescriptor>,
    seen: HashSet<String>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a descriptor unless its path is already present
    pub fn insert(&mut self, descriptor: FieldDescriptor) -> bool {
        if self.seen.contains(&descriptor.field) {
            return false;
        }
        self.seen.insert(descriptor.field.clone());
        self.entries.push(descriptor);
        true
    }

    /// Merge descriptors in order, returning how many were duplicates
    pub fn merge<I>(&mut self, descriptors: I) -> usize
    where
        I: IntoIterator<Item = FieldDescriptor>,
    {
        let mut dropped = 0;
        for descriptor in descriptors {
            if !self.insert(descriptor) {
                dropped += 1;
            }
        }
        dropped
    }

    pub fn contains(&self, field: &str) -> bool {
        self.seen.contains(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        if !self.contains(field) {
            return None;
        }
        self.entries.iter().find(|d| d.field == field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.entries.iter()
    }

    /// Keep only descriptors whose type is in `types`
    pub fn retain_types(&mut self, types: &[TypeTag]) {
        if types.is_empty() {
            return;
        }
        self.entries.retain(|d| types.contains(&d.field_type));
        self.seen = self.entries.iter().map(|d| d.field.clone()).collect();
    }

    pub fn into_vec(self) -> Vec<FieldDescriptor> {
        self.entries
    }
}

impl IntoIterator for FieldCatalog {
    type Item = FieldDescriptor;
    type IntoIter = std::vec::IntoIter<FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
