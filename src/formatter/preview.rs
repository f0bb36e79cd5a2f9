//! Compact single-line previews of field values

use serde_json::Value;

const ELLIPSIS: char = '…';

/// Render `value` as compact JSON, truncated to `max_chars` characters
pub fn preview_value(value: &Value, max_chars: usize) -> String {
    let rendered = match value {
        Value::Array(items) => format!("[…] ({} items)", items.len()),
        Value::Object(map) => format!("{{…}} ({} keys)", map.len()),
        // to_string on scalars cannot fail
        other => serde_json::to_string(other).unwrap_or_default(),
    };
    truncate(&rendered, max_chars)
}

/// Truncate to at most `max_chars` characters, marking the cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push(ELLIPSIS);
    out
}
