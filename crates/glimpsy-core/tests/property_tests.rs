//! Property-based tests for the data model.
//!
//! - Numeric cells survive display and re-parse
//! - Derived column lists are duplicate-free and cover every row key
//! - Dataset records round-trip through JSON

use approx::assert_relative_eq;
use glimpsy_core::{parse_number, Dataset, DatasetRecord, Row, Value};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn column_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["id", "status", "amount", "rate", "open_date", "region"])
        .prop_map(str::to_string)
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e6..1.0e6f64).prop_map(Value::Number),
        "[a-zA-Z ]{0,12}".prop_map(Value::Text),
    ]
}

fn row() -> impl Strategy<Value = Row> {
    prop::collection::vec((column_name(), cell()), 0..6).prop_map(|pairs| pairs.into_iter().collect())
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_number_display_reparses(n in -1.0e9..1.0e9f64) {
        let shown = Value::Number(n).display_string();
        let parsed = parse_number(&shown);
        prop_assert!(parsed.is_some());
        assert_relative_eq!(parsed.unwrap(), n, max_relative = 1e-12);
    }

    #[test]
    fn prop_from_cell_numeric_iff_parseable(raw in "[ 0-9a-z.\\-]{0,10}") {
        let value = Value::from_cell(&raw);
        match parse_number(&raw) {
            Some(n) => prop_assert_eq!(value, Value::Number(n)),
            None => prop_assert_eq!(value, Value::Text(raw.trim().to_string())),
        }
    }

    #[test]
    fn prop_from_rows_columns_cover_keys(rows in prop::collection::vec(row(), 0..20)) {
        let dataset = Dataset::from_rows(rows.clone());
        let columns = dataset.columns();

        let mut unique = columns.to_vec();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), columns.len());

        for row in &rows {
            for key in row.columns() {
                prop_assert!(dataset.has_column(key));
            }
        }
        prop_assert_eq!(dataset.row_count(), rows.len());
    }

    #[test]
    fn prop_record_json_round_trip(rows in prop::collection::vec(row(), 0..10)) {
        let dataset = Dataset::from_rows(rows);
        let record = DatasetRecord::from_dataset(7, "sample", &dataset);
        let json = serde_json::to_string(&record).unwrap();

        let decoded = DatasetRecord::from_json(&json).unwrap();
        prop_assert_eq!(decoded.row_count, dataset.row_count());
        let rebuilt = decoded.into_dataset().unwrap();
        prop_assert_eq!(rebuilt.columns(), dataset.columns());
        prop_assert_eq!(rebuilt.row_count(), dataset.row_count());
    }
}
