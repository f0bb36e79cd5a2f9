//! Field path expressions such as `root.data[].user.name`

use std::fmt;

/// One step in a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Property access, rendered as `.key`
    Key(String),
    /// Entry into the elements of an array, rendered as `[]`
    Elements,
}

/// A dot/bracket path from the root label to a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    root: String,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root(label: impl Into<String>) -> Self {
        Self {
            root: label.into(),
            segments: Vec::new(),
        }
    }

    /// Path to property `key` below this one
    pub fn child(&self, key: &str) -> Self {
        self.extended(PathSegment::Key(key.to_string()))
    }

    /// Path to the elements of the array at this path
    pub fn elements(&self) -> Self {
        self.extended(PathSegment::Elements)
    }

    fn extended(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self {
            root: self.root.clone(),
            segments,
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn root_label(&self) -> &str {
        &self.root
    }

    /// Number of property keys in the path
    pub fn depth(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::Key(_)))
            .count()
    }

    /// Human-readable suffix: the path without its root
    ///
    /// `root[].user.name` becomes `user.name`, `root.data[].id` becomes `data[].id`.
    pub fn label(&self) -> String {
        let mut segments = self.segments.as_slice();
        if let Some(PathSegment::Elements) = segments.first() {
            segments = &segments[1..];
        }

        let mut out = String::new();
        for segment in segments {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Elements => out.push_str("[]"),
            }
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Elements => f.write_str("[]")?,
            }
        }
        Ok(())
    }
}
