//! Unit tests for field discovery
//!
//! Tests cover:
//! - Object mode and catalog mode path shapes
//! - First-occurrence-wins de-duplication
//! - Empty and scalar inputs
//! - Configuration knobs (root label, nested arrays, depth)

use fieldscout::discovery::{discover_with_config, DiscoveryConfig, DiscoveryEngine, DiscoveryMode};
use fieldscout::{discover_json_str, field_finder, FieldDescriptor, TypeTag};
use serde_json::{json, Value};
use std::collections::HashSet;

fn paths(fields: &[FieldDescriptor]) -> Vec<&str> {
    fields.iter().map(|d| d.field.as_str()).collect()
}

fn find<'a>(fields: &'a [FieldDescriptor], path: &str) -> &'a FieldDescriptor {
    fields
        .iter()
        .find(|d| d.field == path)
        .unwrap_or_else(|| panic!("missing field {}", path))
}

#[cfg(test)]
mod object_mode {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_object_paths() {
        let fields = field_finder(&json!({"a": {"b": 1}}), true);

        assert_eq!(paths(&fields), vec!["root.a", "root.a.b"]);
        assert_eq!(find(&fields, "root.a").field_type, TypeTag::Object);
        assert_eq!(find(&fields, "root.a.b").field_type, TypeTag::Number);
        assert_eq!(find(&fields, "root.a.b").value, json!(1));
    }

    #[test]
    fn test_arrays_are_leaves() {
        let fields = field_finder(&json!({"user": {"tags": [{"id": 1}], "name": "x"}}), true);
        assert_eq!(
            paths(&fields),
            vec!["root.user", "root.user.tags", "root.user.name"]
        );
        assert_eq!(find(&fields, "root.user.tags").field_type, TypeTag::Array);
    }

    #[test]
    fn test_null_values_are_undefined() {
        let fields = field_finder(&json!({"deleted_at": null}), true);
        assert_eq!(fields[0].field_type, TypeTag::Undefined);
        assert_eq!(fields[0].value, Value::Null);
    }
}

#[cfg(test)]
mod catalog_mode {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_occurrence_wins() {
        let fields = field_finder(&json!([{"x": 1}, {"x": 2}]), false);
        assert_eq!(paths(&fields), vec!["root[].x"]);
        assert_eq!(fields[0].value, json!(1));
    }

    #[test]
    fn test_fields_merge_across_elements() {
        let fields = field_finder(
            &json!([
                {"id": 1, "profile": {"city": "Oslo"}},
                {"id": 2, "email": "b@example.com", "profile": {"zip": "0150"}}
            ]),
            false,
        );
        assert_eq!(
            paths(&fields),
            vec![
                "root[].id",
                "root[].profile",
                "root[].profile.city",
                "root[].email",
                "root[].profile.zip"
            ]
        );
    }

    #[test]
    fn test_first_type_wins_even_if_later_differs() {
        let fields = field_finder(&json!([{"v": null}, {"v": "2024-01-01"}]), false);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, TypeTag::Undefined);
    }

    #[test]
    fn test_object_root_explores_array_properties() {
        let fields = field_finder(
            &json!({
                "count": 2,
                "results": [{"name": "a", "created": "2024-02-03T04:05:06Z"}],
                "next": null
            }),
            false,
        );
        assert_eq!(
            paths(&fields),
            vec!["root[].name", "root[].created"]
        );
        assert_eq!(find(&fields, "root[].created").field_type, TypeTag::Date);
    }

    #[test]
    fn test_exploration_sets_merge_into_one_catalog() {
        let fields = field_finder(
            &json!({
                "users": [{"id": 1, "name": "Ada"}],
                "groups": [{"id": "g1", "size": 3}]
            }),
            false,
        );
        assert_eq!(paths(&fields), vec!["root[].id", "root[].name", "root[].size"]);
        assert_eq!(find(&fields, "root[].id").value, json!(1));
    }

    #[test]
    fn test_object_root_without_arrays_is_sampled() {
        let fields = field_finder(&json!({"a": {"b": 1}, "c": "x"}), false);
        assert_eq!(paths(&fields), vec!["root[].a", "root[].a.b", "root[].c"]);
        assert_eq!(find(&fields, "root[].a").field_type, TypeTag::Object);
        assert_eq!(find(&fields, "root[].a.b").label(), "a.b");
    }

    #[test]
    fn test_non_object_elements_are_skipped() {
        let fields = field_finder(&json!([1, "two", null, [3], {"ok": true}]), false);
        assert_eq!(paths(&fields), vec!["root[].ok"]);
    }

    #[test]
    fn test_no_duplicate_paths() {
        let records: Vec<Value> = (0..10)
            .map(|i| json!({"id": i, "meta": {"rev": i, "tags": ["a"]}, "kind": "row"}))
            .collect();
        let fields = field_finder(&json!({"a": records.clone(), "b": records}), false);

        let unique: HashSet<&str> = fields.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(unique.len(), fields.len());
    }
}

#[cfg(test)]
mod empty_inputs {
    use super::*;

    #[test]
    fn test_empty_and_null_roots() {
        assert!(field_finder(&json!({}), false).is_empty());
        assert!(field_finder(&json!(null), false).is_empty());
        assert!(field_finder(&json!([]), false).is_empty());
        assert!(field_finder(&json!({}), true).is_empty());
        assert!(field_finder(&json!(null), true).is_empty());
    }

    #[test]
    fn test_scalar_roots() {
        for value in [json!(0), json!(false), json!(""), json!("text"), json!(3.5)] {
            assert!(field_finder(&value, false).is_empty());
            assert!(field_finder(&value, true).is_empty());
        }
    }
}

#[cfg(test)]
mod configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_custom_root_label() {
        let config = DiscoveryConfig::default().with_root_label("response");
        let fields = discover_with_config(&json!([{"id": 1}]), &config);
        assert_eq!(paths(&fields), vec!["response[].id"]);
        assert_eq!(fields[0].label(), "id");
    }

    #[test]
    fn test_descend_arrays() {
        let config = DiscoveryConfig::default().with_descend_arrays(true);
        let fields = discover_with_config(
            &json!([{"lines": [{"sku": "A1", "qty": 2}]}]),
            &config,
        );
        assert_eq!(
            paths(&fields),
            vec!["root[].lines", "root[].lines[].sku", "root[].lines[].qty"]
        );
        assert_eq!(find(&fields, "root[].lines[].qty").label(), "lines[].qty");
    }

    #[test]
    fn test_invalid_config_yields_nothing() {
        let config = DiscoveryConfig {
            sample_limit: 0,
            ..Default::default()
        };
        assert!(discover_with_config(&json!([{"id": 1}]), &config).is_empty());
    }

    #[test]
    fn test_engine_reports_mode_and_stats() {
        let engine = DiscoveryEngine::new(DiscoveryConfig::default()).unwrap();
        let result = engine.discover(&json!({"items": [{"a": 1}, 5, {"a": 2}]}));

        assert_eq!(result.metadata.mode, DiscoveryMode::ExplorationSets);
        assert_eq!(result.metadata.field_count, 1);
        assert_eq!(result.metadata.stats.exploration_sets, 1);
        assert_eq!(result.metadata.stats.elements_sampled, 3);
        assert_eq!(result.metadata.stats.elements_skipped, 1);
        assert_eq!(result.metadata.stats.duplicates_dropped, 1);
    }

    #[test]
    fn test_discover_from_json_string() {
        let fields = discover_json_str(r#"[{"when": "2023-12-31"}]"#, false).unwrap();
        assert_eq!(fields[0].field_type, TypeTag::Date);
        assert!(discover_json_str("[{", false).is_err());
    }
}
