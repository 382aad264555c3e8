//! Field path discovery

use std::collections::BTreeSet;

use serde_json::Value;

use crate::record::FieldPath;

/// Collect every field path exposed by `value`, below `prefix`
///
/// Object keys emit a path and are walked further. Non-empty arrays are walked
/// through element 0 only; the array step itself emits nothing. Nodes at
/// `max_depth` or deeper are treated as leaves.
pub fn extract_paths(value: &Value, prefix: &FieldPath, max_depth: usize) -> BTreeSet<FieldPath> {
    let mut paths = BTreeSet::new();
    collect_paths(value, prefix, 0, max_depth, &mut paths);
    paths
}

fn collect_paths(
    value: &Value,
    prefix: &FieldPath,
    depth: usize,
    max_depth: usize,
    paths: &mut BTreeSet<FieldPath>,
) {
    if depth >= max_depth {
        return;
    }

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = prefix.child(key);
                collect_paths(child, &path, depth + 1, max_depth, paths);
                paths.insert(path);
            }
        }
        Value::Array(items) => {
            if let Some(first) = items.first() {
                collect_paths(first, &prefix.first_element(), depth + 1, max_depth, paths);
            }
        }
        _ => {}
    }
}

/// Discover field paths from the first `sample_size` records
///
/// Fields that only appear later in the record set are not discovered.
/// Every discovered path resolves the way its rendered form parses: a literal
/// key `a.b` and the nested keys `a` -> `b` both yield the nested path, no
/// matter which one the sample shows first.
pub fn discover_paths(records: &[Value], sample_size: usize, max_depth: usize) -> BTreeSet<FieldPath> {
    let root = FieldPath::root();
    let mut paths = BTreeSet::new();
    for record in records.iter().take(sample_size) {
        paths.extend(
            extract_paths(record, &root, max_depth)
                .into_iter()
                .map(reparsed),
        );
    }
    paths
}

/// Rebuild a path from its rendered form
///
/// Renderings that do not parse (keys holding brackets or empty keys) keep
/// their literal steps.
fn reparsed(path: FieldPath) -> FieldPath {
    FieldPath::parse(path.as_str()).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_field;
    use crate::record::PathStep;
    use serde_json::json;

    fn rendered(paths: &BTreeSet<FieldPath>) -> Vec<&str> {
        paths.iter().map(FieldPath::as_str).collect()
    }

    #[test]
    fn test_extract_nested_objects() {
        let record = json!({"Header": {"AssetClass": "Rates", "UseCase": "Swap"}, "id": 1});
        let paths = extract_paths(&record, &FieldPath::root(), 64);
        assert_eq!(
            rendered(&paths),
            vec!["Header", "Header.AssetClass", "Header.UseCase", "id"]
        );
    }

    #[test]
    fn test_extract_first_array_element_only() {
        let record = json!({"Legs": [{"Tenor": "5Y"}, {"Tenor": "10Y", "Notional": 5}]});
        let paths = extract_paths(&record, &FieldPath::root(), 64);
        assert_eq!(rendered(&paths), vec!["Legs", "Legs[0].Tenor"]);
    }

    #[test]
    fn test_extract_scalars_and_empty_arrays() {
        assert!(extract_paths(&json!(42), &FieldPath::root(), 64).is_empty());
        assert!(extract_paths(&json!(null), &FieldPath::root(), 64).is_empty());

        let paths = extract_paths(&json!({"tags": []}), &FieldPath::root(), 64);
        assert_eq!(rendered(&paths), vec!["tags"]);
    }

    #[test]
    fn test_extract_root_array_and_nested_arrays() {
        let paths = extract_paths(&json!([{"id": 1}]), &FieldPath::root(), 64);
        assert_eq!(rendered(&paths), vec!["[0].id"]);

        let paths = extract_paths(&json!({"grid": [[{"v": 1}]]}), &FieldPath::root(), 64);
        assert_eq!(rendered(&paths), vec!["grid", "grid[0][0].v"]);
    }

    #[test]
    fn test_extract_with_prefix() {
        let prefix = FieldPath::parse("outer").unwrap();
        let paths = extract_paths(&json!({"inner": true}), &prefix, 64);
        assert_eq!(rendered(&paths), vec!["outer.inner"]);
    }

    #[test]
    fn test_depth_guard_treats_deep_nodes_as_leaves() {
        let record = json!({"a": {"b": {"c": {"d": 1}}}});
        let paths = extract_paths(&record, &FieldPath::root(), 2);
        assert_eq!(rendered(&paths), vec!["a", "a.b"]);

        assert!(extract_paths(&record, &FieldPath::root(), 0).is_empty());
    }

    #[test]
    fn test_depth_guard_on_deeply_nested_input() {
        let mut value = json!("leaf");
        for _ in 0..500 {
            value = json!({ "n": value });
        }
        let paths = extract_paths(&value, &FieldPath::root(), 64);
        assert_eq!(paths.len(), 64);
    }

    #[test]
    fn test_dotted_key_resolves_as_nested_path() {
        let nested = vec![PathStep::Key("a".into()), PathStep::Key("b".into())];
        let literal_first = vec![
            json!({"a.b": 1, "a": {"b": 1}}),
            json!({"a.b": 2, "a": {"b": 1}}),
        ];
        let nested_first = vec![
            json!({"a": {"b": 1}, "a.b": 1}),
            json!({"a": {"b": 1}, "a.b": 2}),
        ];

        for records in [literal_first, nested_first] {
            let paths = discover_paths(&records, 10, 64);
            let dotted = paths.iter().find(|p| p.as_str() == "a.b").unwrap();
            assert_eq!(dotted.steps(), nested.as_slice());

            let stats = analyze_field(&records, dotted);
            assert_eq!(stats.total_count, 2);
            assert_eq!(stats.unique_count, 1);
        }
    }

    #[test]
    fn test_unparseable_keys_keep_literal_steps() {
        let record = json!({"w[1]": "x"});
        let paths = discover_paths(&[record.clone()], 10, 64);
        let path = paths.iter().next().unwrap();
        assert_eq!(path.as_str(), "w[1]");
        assert_eq!(path.resolve(&record), Some(&json!("x")));
    }

    #[test]
    fn test_discover_uses_leading_sample_only() {
        let mut records: Vec<Value> = (0..10).map(|i| json!({"id": i})).collect();
        records.push(json!({"id": 10, "late": true}));

        let paths = discover_paths(&records, 10, 64);
        assert_eq!(rendered(&paths), vec!["id"]);

        let paths = discover_paths(&records, 11, 64);
        assert_eq!(rendered(&paths), vec!["id", "late"]);
    }
}
