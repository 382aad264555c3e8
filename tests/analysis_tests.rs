//! Primary key analysis tests

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use keyscan::analysis::{
    AnalysisConfig, CandidateThresholds, PrimaryKeyDetector, analyze_field, extract_paths,
    rank_candidates,
};
use keyscan::discover_files;
use keyscan::export::{
    CANDIDATES_FILE, STRUCTURE_FILE, write_candidates_file, write_structure_summary_file,
};
use keyscan::record::FieldPath;
use proptest::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn path(expr: &str) -> FieldPath {
    FieldPath::parse(expr).unwrap()
}

fn trade(i: usize) -> Value {
    json!({
        "Header": {
            "AssetClass": (["Rates", "Credit", "Equity"][i % 3]),
            "InstrumentType": "Swap"
        },
        "Identifier": {"UPI": format!("QZ{i:08}")},
        "Attributes": {"Legs": [{"Tenor": "5Y"}, {"Tenor": "10Y"}]}
    })
}

fn write_records(dir: &TempDir, name: &str, records: &[Value]) -> PathBuf {
    let content: String = records.iter().map(|r| format!("{r}\n")).collect();
    let file = dir.path().join(name);
    fs::write(&file, content).unwrap();
    file
}

fn candidate_paths(records: &[Value]) -> Vec<String> {
    PrimaryKeyDetector::new()
        .analyze(records)
        .candidates
        .iter()
        .map(|c| c.path().to_string())
        .collect()
}

mod discovery_tests {
    use super::*;

    #[test]
    fn test_first_array_element_only() {
        let record = json!({"Legs": [{"Tenor": "5Y"}, {"Tenor": "10Y"}]});
        let paths = extract_paths(&record, &FieldPath::root(), 64);
        let rendered: Vec<&str> = paths.iter().map(FieldPath::as_str).collect();

        assert_eq!(rendered, vec!["Legs", "Legs[0].Tenor"]);
        assert_eq!(
            path("Legs[0].Tenor").resolve(&record),
            Some(&json!("5Y"))
        );
    }

    #[test]
    fn test_fields_after_the_sample_are_not_discovered() {
        let mut records: Vec<Value> = (0..12).map(|i| json!({"id": i})).collect();
        records[11] = json!({"id": 11, "late": "x"});

        let report = PrimaryKeyDetector::new().analyze(&records);
        assert!(report.field_statistics.contains_key(&path("id")));
        assert!(!report.field_statistics.contains_key(&path("late")));
    }

    #[test]
    fn test_sample_size_is_configurable() {
        let mut records: Vec<Value> = (0..12).map(|i| json!({"id": i})).collect();
        records[11] = json!({"id": 11, "late": "x"});

        let config = AnalysisConfig::builder().discovery_sample_size(12).build();
        let report = PrimaryKeyDetector::with_config(config).analyze(&records);
        assert_eq!(report.field_statistics[&path("late")].total_count, 1);
    }
}

mod detection_tests {
    use super::*;

    #[test]
    fn test_repeated_values_are_not_candidates() {
        let records = vec![
            json!({"id": "a", "amt": 1}),
            json!({"id": "b", "amt": 1}),
            json!({"id": "a", "amt": 2}),
        ];
        let report = PrimaryKeyDetector::new().analyze(&records);

        assert!(report.candidates.is_empty());
        for field in ["id", "amt"] {
            let stats = &report.field_statistics[&path(field)];
            assert_eq!(stats.total_count, 3);
            assert_eq!(stats.unique_count, 2);
        }
    }

    #[test]
    fn test_trade_identifier_is_found() {
        let records: Vec<Value> = (0..20).map(trade).collect();
        assert_eq!(
            candidate_paths(&records),
            vec!["Identifier".to_string(), "Identifier.UPI".to_string()]
        );
    }

    #[test]
    fn test_ordering_by_uniqueness_then_coverage() {
        let records: Vec<Value> = (0..100)
            .map(|i| {
                let mut record = json!({"a": i, "c": i.min(96)});
                if i < 95 {
                    record["b"] = json!(format!("b{i}"));
                }
                record
            })
            .collect();

        // a: 1.0 / 1.0, b: 1.0 / 0.95, c: 0.97 / 1.0
        assert_eq!(candidate_paths(&records), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_undecodable_lines_change_nothing() {
        let dir = TempDir::new().unwrap();
        let records: Vec<Value> = (0..6).map(trade).collect();
        let clean = write_records(&dir, "clean.json", &records);

        let mut noisy = String::new();
        for record in &records {
            noisy.push_str(&format!("{record}\n{{\"broken\": \n\n"));
        }
        let noisy_path = dir.path().join("noisy.json");
        fs::write(&noisy_path, noisy).unwrap();

        let detector = PrimaryKeyDetector::new();
        let clean_report = detector.analyze_file(&clean).unwrap();
        let noisy_report = detector.analyze_file(&noisy_path).unwrap();

        assert_eq!(noisy_report.skipped_lines, 6);
        assert_eq!(noisy_report.record_count, clean_report.record_count);
        assert_eq!(noisy_report.field_statistics, clean_report.field_statistics);
        assert_eq!(noisy_report.candidates, clean_report.candidates);
    }

    #[test]
    fn test_record_cap() {
        let dir = TempDir::new().unwrap();
        let records: Vec<Value> = (0..10).map(trade).collect();
        let file = write_records(&dir, "trades.json", &records);

        let config = AnalysisConfig::builder().max_records(4).build();
        let report = PrimaryKeyDetector::with_config(config).analyze_file(&file).unwrap();
        assert_eq!(report.record_count, 4);
        assert_eq!(report.field_statistics[&path("Identifier.UPI")].total_count, 4);
    }

    #[test]
    fn test_structure_facets() {
        let records: Vec<Value> = (0..6).map(trade).collect();
        let report = PrimaryKeyDetector::new().analyze(&records);

        let asset_classes = report.structure.facet("asset_classes").unwrap();
        assert_eq!(asset_classes.value_names(), vec!["Rates", "Credit", "Equity"]);
        assert_eq!(
            report.structure.top_level_names(),
            vec!["Header", "Identifier", "Attributes"]
        );
    }
}

mod batch_tests {
    use super::*;

    #[test]
    fn test_unreadable_file_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        let first = write_records(&dir, "a.json", &(0..5).map(trade).collect::<Vec<_>>());
        let missing = dir.path().join("missing.json");
        let last = write_records(&dir, "b.json", &(5..10).map(trade).collect::<Vec<_>>());

        let batch = PrimaryKeyDetector::new().analyze_files(&[first, missing.clone(), last]);

        let sources: Vec<_> = batch
            .reports
            .iter()
            .map(|r| r.source.clone().unwrap())
            .collect();
        assert_eq!(sources, vec!["a.json", "b.json"]);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].path, missing);
    }

    #[test]
    fn test_file_without_records_is_left_out_of_exports() {
        let dir = TempDir::new().unwrap();
        write_records(&dir, "a.json", &(0..5).map(trade).collect::<Vec<_>>());
        fs::write(dir.path().join("b.json"), "\n{\"broken\": \n").unwrap();

        let files = discover_files(dir.path(), "*.json").unwrap();
        let batch = PrimaryKeyDetector::new().analyze_files(&files);
        assert_eq!(batch.reports.len(), 1);
        assert_eq!(batch.failures.len(), 1);
        assert!(batch.failures[0].path.ends_with("b.json"));

        let structure = dir.path().join(STRUCTURE_FILE);
        write_structure_summary_file(&structure, &batch.reports).unwrap();
        let text = fs::read_to_string(&structure).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("b.json"));

        let candidates = dir.path().join(CANDIDATES_FILE);
        write_candidates_file(&candidates, &batch.reports).unwrap();
        assert!(!fs::read_to_string(&candidates).unwrap().contains("b.json"));
    }

    #[test]
    fn test_no_input_files() {
        let dir = TempDir::new().unwrap();
        let files = discover_files(dir.path(), "*.json").unwrap();
        let batch = PrimaryKeyDetector::new().analyze_files(&files);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_discover_analyze_and_export() {
        let dir = TempDir::new().unwrap();
        write_records(&dir, "one.json", &(0..10).map(trade).collect::<Vec<_>>());
        write_records(&dir, "two.json", &(10..20).map(trade).collect::<Vec<_>>());
        fs::write(dir.path().join("readme.txt"), "not input").unwrap();

        let files = discover_files(dir.path(), "*.json").unwrap();
        let batch = PrimaryKeyDetector::new().analyze_files(&files);
        assert_eq!(batch.reports.len(), 2);

        let candidates = dir.path().join(CANDIDATES_FILE);
        let rows = write_candidates_file(&candidates, &batch.reports).unwrap();
        assert_eq!(rows, 4);
        let text = fs::read_to_string(&candidates).unwrap();
        assert!(text.contains("one.json,Identifier.UPI,1.0,1.0,10,10"));
        assert!(text.contains("two.json,Identifier.UPI,1.0,1.0,10,10"));

        let structure = dir.path().join(STRUCTURE_FILE);
        write_structure_summary_file(&structure, &batch.reports).unwrap();
        let text = fs::read_to_string(&structure).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("\"Rates, Credit, Equity\""));
    }
}

mod property_tests {
    use super::*;

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,4}".prop_map(Value::from),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    fn keyed_records(values: &[Option<u8>]) -> Vec<Value> {
        values
            .iter()
            .map(|value| match value {
                Some(v) => json!({"k": v}),
                None => json!({"other": true}),
            })
            .collect()
    }

    proptest! {
        #[test]
        fn ratios_stay_in_bounds(values in prop::collection::vec(prop::option::of(0u8..6), 0..40)) {
            let records = keyed_records(&values);
            let stats = analyze_field(&records, &path("k"));

            prop_assert!((0.0..=1.0).contains(&stats.uniqueness_ratio));
            prop_assert!((0.0..=1.0).contains(&stats.coverage));
            prop_assert!(stats.total_count <= records.len());
            prop_assert_eq!(stats.uniqueness_ratio == 0.0, stats.total_count == 0);
        }

        #[test]
        fn candidate_iff_predicate(values in prop::collection::vec(prop::option::of(0u8..60), 1..40)) {
            let records = keyed_records(&values);
            let stats = analyze_field(&records, &path("k"));

            let expected = stats.uniqueness_ratio >= 0.95
                && stats.total_count as f64 >= 0.9 * records.len() as f64
                && stats.unique_count > 1;
            let statistics = BTreeMap::from([(stats.path.clone(), stats.clone())]);
            let ranked = rank_candidates(
                &statistics,
                records.len(),
                &CandidateThresholds::default(),
            );
            prop_assert_eq!(ranked.iter().any(|c| c.path() == &stats.path), expected);
        }

        #[test]
        fn extracted_paths_resolve(record in arb_json()) {
            for extracted in extract_paths(&record, &FieldPath::root(), 64) {
                prop_assert!(extracted.resolve(&record).is_some(), "{} did not resolve", extracted);
            }
        }
    }
}
