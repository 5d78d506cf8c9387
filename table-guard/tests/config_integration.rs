//! Integration tests for JSON guard descriptions.

mod common;

use common::{collecting_sink, orders_batch};
use table_guard::core::GuardConfigFile;
use table_guard::prelude::*;

#[test]
fn test_description_round_trips_through_serde() {
    let json = r#"{
        "check": "within_range",
        "warn": true,
        "params": {"items": {"amount": [0, 11]}}
    }"#;
    let config: GuardConfigFile = serde_json::from_str(json).unwrap();
    assert_eq!(config.check, CheckKind::WithinRange);

    let again: GuardConfigFile =
        serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(again, config);
}

#[test]
fn test_description_builds_working_guard() {
    let config: GuardConfigFile = serde_json::from_str(
        r#"{"check": "within_range", "warn": true, "params": {"items": {"amount": [0, 11]}}}"#,
    )
    .unwrap();
    let (sink, shared) = collecting_sink();
    let guard = config.to_builder().unwrap().sink(shared).build().unwrap();

    assert!(guard.check(&orders_batch()).is_ok());
    let violations = sink.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rows, vec![1]);
    assert_eq!(violations[0].values, vec!["12.5"]);
}

#[test]
fn test_bad_descriptions() {
    assert!(Guard::from_json("not json").is_err());
    assert!(Guard::from_json(r#"{"check": "unique", "args": ["a", "b"]}"#).is_err());
    assert!(Guard::from_json(r#"{"check": "unique", "params": {"warn": "yes"}}"#).is_err());
    assert!(Guard::from_json(
        r#"{"check": "multi_check", "params": {"checks": [{"check": "nope"}]}}"#
    )
    .is_err());
}

#[test]
fn test_disabled_description() {
    let guard = Guard::from_json(r#"{"check": "is_shape", "enabled": false, "args": [[1, 1]]}"#)
        .unwrap();
    assert!(!guard.is_enabled());
    assert!(guard.check(&orders_batch()).is_ok());
}
