//! Property-based tests for binding and check predicates.
//!
//! Each property computes the expected outcome with a direct scan over the
//! generated data and compares it with what the library reports.

use arrow::array::{ArrayRef, Int64Array};
use arrow::record_batch::RecordBatch;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use table_guard::checks::{none_missing, within_range};
use table_guard::core::{bind, ParamValue};

const DECLARED: [&str; 3] = ["items", "increasing", "strict"];

fn column_batch(values: &[Option<i64>]) -> RecordBatch {
    RecordBatch::try_from_iter(vec![(
        "x",
        Arc::new(Int64Array::from(values.to_vec())) as ArrayRef,
    )])
    .unwrap()
}

proptest! {
    #[test]
    fn prop_positional_wins_then_named_fills(
        positional in 0usize..=3,
        named in prop::collection::btree_set(0usize..5, 0..5),
    ) {
        let extra = ["cheese", "colour"];
        let names: Vec<&str> = named
            .iter()
            .map(|&i| if i < 3 { DECLARED[i] } else { extra[i - 3] })
            .collect();

        let binding = bind(
            "is_monotonic",
            &DECLARED,
            (0..positional).map(|i| ParamValue::from(json!(format!("pos{i}")))).collect(),
            names.iter().map(|n| (n.to_string(), ParamValue::from(json!(format!("named_{n}"))))).collect(),
        )
        .unwrap();

        for (i, name) in DECLARED.iter().enumerate() {
            let bound = binding.get(name).and_then(ParamValue::as_json).cloned();
            let expected = if i < positional {
                Some(json!(format!("pos{i}")))
            } else if names.contains(name) {
                Some(json!(format!("named_{name}")))
            } else {
                None
            };
            prop_assert_eq!(bound, expected);
        }

        for name in &names {
            let declared_at = DECLARED.iter().position(|d| d == name);
            let should_ignore = declared_at.is_none_or(|i| i < positional);
            prop_assert_eq!(binding.ignored().iter().any(|n| n == name), should_ignore);
        }
    }

    #[test]
    fn prop_excess_positional_always_rejected(extra in 1usize..4) {
        let values: Vec<ParamValue> = (0..DECLARED.len() + extra).map(|_| Value::Null.into()).collect();
        prop_assert!(bind("is_monotonic", &DECLARED, values, vec![]).is_err());
    }

    #[test]
    fn prop_none_missing_matches_scan(values in prop::collection::vec(prop::option::of(-50i64..50), 0..40)) {
        let data = column_batch(&values);
        let expected: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| i)
            .collect();

        match none_missing(&data, None) {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(e) => prop_assert_eq!(&e.violation().unwrap().rows, &expected),
        }
    }

    #[test]
    fn prop_within_range_matches_scan(
        values in prop::collection::vec(prop::option::of(-100i64..100), 0..40),
        lower in -100i64..0,
        width in 0i64..150,
    ) {
        let upper = lower + width;
        let data = column_batch(&values);
        let expected: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_some_and(|v| v < lower || v > upper))
            .map(|(i, _)| i)
            .collect();

        let items = vec![("x".to_string(), (lower as f64, upper as f64))];
        match within_range(&data, &items) {
            Ok(()) => prop_assert!(expected.is_empty()),
            Err(e) => prop_assert_eq!(&e.violation().unwrap().rows, &expected),
        }
    }
}
