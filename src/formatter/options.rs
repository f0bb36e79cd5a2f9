//! Picker options: what a dropdown needs to offer a discovered field

use crate::discovery::{FieldCatalog, FieldDescriptor};
use crate::sniffer::TypeTag;
use serde::Serialize;

/// One selectable entry in a field picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    /// Full field path submitted back to the backend
    pub value: String,
    /// Path without its root, shown to the user
    pub label: String,
    /// Type badge rendered next to the label
    pub badge: TypeTag,
}

impl From<&FieldDescriptor> for FieldOption {
    fn from(descriptor: &FieldDescriptor) -> Self {
        Self {
            value: descriptor.field.clone(),
            label: descriptor.label(),
            badge: descriptor.field_type,
        }
    }
}

/// Build picker options for every field in the catalog
pub fn options_for(catalog: &FieldCatalog) -> Vec<FieldOption> {
    catalog.iter().map(FieldOption::from).collect()
}
