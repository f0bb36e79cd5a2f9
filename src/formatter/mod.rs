//! Catalog rendering: aligned text, JSON descriptors, or picker options

pub mod options;
pub mod preview;

pub use options::{options_for, FieldOption};

use crate::discovery::FieldCatalog;
use crate::error::{DiscoveryError, DiscoveryErrorKind, ScoutResult};
use crate::sniffer::TypeTag;
use console::Style;
use std::fmt;
use std::str::FromStr;

/// Width of the type column ("undefined" is the longest tag)
const TYPE_COLUMN_WIDTH: usize = 9;

/// Narrowest value preview before it is dropped entirely
const MIN_PREVIEW_WIDTH: usize = 8;

/// Output format for a rendered catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One aligned row per field
    #[default]
    Text,
    /// JSON array of `{field, value, type}`
    Json,
    /// JSON array of `{value, label, badge}`
    Options,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Options => "options",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "options" => Ok(OutputFormat::Options),
            other => Err(format!(
                "Invalid format '{}'. Use 'text', 'json', or 'options'",
                other
            )),
        }
    }
}

/// Renders a [`FieldCatalog`] in one of the [`OutputFormat`]s
#[derive(Debug, Clone)]
pub struct CatalogFormatter {
    format: OutputFormat,
    color: bool,
    width: usize,
}

impl CatalogFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: false,
            width: 80,
        }
    }

    /// Color type badges in text output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Terminal width used to size value previews
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn format(&self, catalog: &FieldCatalog) -> ScoutResult<String> {
        match self.format {
            OutputFormat::Text => Ok(self.format_text(catalog)),
            OutputFormat::Json => {
                let fields: Vec<_> = catalog.iter().collect();
                to_pretty_json(&fields)
            }
            OutputFormat::Options => to_pretty_json(&options_for(catalog)),
        }
    }

    fn format_text(&self, catalog: &FieldCatalog) -> String {
        if catalog.is_empty() {
            return "No fields found".to_string();
        }

        let path_width = catalog
            .iter()
            .map(|d| d.field.chars().count())
            .max()
            .unwrap_or(0);
        let preview_width = self
            .width
            .saturating_sub(path_width + TYPE_COLUMN_WIDTH + 4);

        let mut lines = Vec::with_capacity(catalog.len());
        for descriptor in catalog {
            let badge = format!("{:<width$}", descriptor.field_type, width = TYPE_COLUMN_WIDTH);
            let badge = if self.color {
                badge_style(descriptor.field_type).apply_to(badge).to_string()
            } else {
                badge
            };

            let mut line = format!(
                "{:<width$}  {}",
                descriptor.field,
                badge,
                width = path_width
            );
            if preview_width >= MIN_PREVIEW_WIDTH {
                line.push_str("  ");
                line.push_str(&preview::preview_value(&descriptor.value, preview_width));
            }
            lines.push(line.trim_end().to_string());
        }

        lines.join("\n")
    }
}

fn badge_style(tag: TypeTag) -> Style {
    let style = Style::new().force_styling(true);
    match tag {
        TypeTag::Array | TypeTag::Object => style.cyan(),
        TypeTag::Boolean => style.magenta(),
        TypeTag::Number => style.yellow(),
        TypeTag::String => style.green(),
        TypeTag::Date => style.blue().bold(),
        TypeTag::Undefined => style.dim(),
    }
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> ScoutResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        DiscoveryError::discovery_with_source(
            DiscoveryErrorKind::output(format!("Failed to serialize catalog: {}", e)),
            e.into(),
        )
    })
}
