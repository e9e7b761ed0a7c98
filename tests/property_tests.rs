//! Property-based tests for rust_logger_adapter using proptest

use parking_lot::Mutex;
use proptest::prelude::*;
use rust_logger_adapter::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

/// Arbitrary JSON trees a few levels deep
fn any_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering matches its discriminant
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        assert_eq!(level1 <= level2, val1 <= val2);
        assert_eq!(level1 < level2, val1 < val2);
        assert_eq!(level1.bunyan_code() < level2.bunyan_code(), val1 < val2);
    }

    /// Test that the serialized form is accepted by FromStr
    #[test]
    fn test_log_level_serde_matches_parse(level in any_level()) {
        let serialized = serde_json::to_value(level).unwrap();
        let parsed: LogLevel = serialized.as_str().unwrap().parse().unwrap();
        assert_eq!(level, parsed);
    }
}

// ============================================================================
// Deep Merge Tests
// ============================================================================

proptest! {
    /// Merging never mutates its inputs
    #[test]
    fn test_merge_leaves_inputs_untouched(base in any_json(), overrides in any_json()) {
        let base_before = base.clone();
        let overrides_before = overrides.clone();

        let _ = deep_merge(&base, &overrides);

        assert_eq!(base, base_before);
        assert_eq!(overrides, overrides_before);
    }

    /// Merging a value with itself yields the same value
    #[test]
    fn test_merge_with_self_is_identity(value in any_json()) {
        assert_eq!(deep_merge(&value, &value), value);
    }

    /// A nested path present only in the override appears in the result
    #[test]
    fn test_merge_adds_new_nested_path(
        key in "[a-z]{1,6}",
        leaf in "[a-z]{1,6}",
        base_level in any_level(),
    ) {
        let base = json!({"log": {"level": base_level}});
        let overrides = json!({"app": {(key.clone()): leaf.clone()}});

        let merged = deep_merge(&base, &overrides);

        assert_eq!(&merged["app"][key.as_str()], &Value::String(leaf));
        assert_eq!(&merged["log"], &base["log"]);
        assert!(base.get("app").is_none());
    }

    /// Non-null override leaves always win
    #[test]
    fn test_merge_override_wins(base_level in any_level(), override_level in any_level()) {
        let base = json!({"log": {"level": base_level, "logLevelManagement": "adapter"}});
        let overrides = json!({"log": {"level": override_level}});

        let merged = deep_merge(&base, &overrides);

        assert_eq!(&merged["log"]["level"], &json!(override_level));
        assert_eq!(merged["log"]["logLevelManagement"], "adapter");
    }
}

// ============================================================================
// LogRecord Sanitization Tests
// ============================================================================

proptest! {
    /// Records never contain raw line breaks
    #[test]
    fn test_record_message_single_line(message in ".*") {
        let record = LogRecord::new(LogLevel::Info, message);
        assert!(!record.message.contains('\n'));
        assert!(!record.message.contains('\r'));
        assert!(!record.message.contains('\t'));
    }
}

// ============================================================================
// Adapter Routing Tests
// ============================================================================

#[derive(Default)]
struct Capture(Mutex<Vec<(LogLevel, String)>>);

impl NativeLogger for Capture {
    fn log(&self, record: &LogRecord) -> Result<()> {
        self.0.lock().push((record.level, record.message.clone()));
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

proptest! {
    /// Instance-mode delivers exactly the calls at or above the level, in order
    #[test]
    fn test_instance_mode_routing(
        threshold in any_level(),
        calls in prop::collection::vec((any_level(), "[a-z0-9 ]{0,12}"), 0..32),
    ) {
        let capture = Arc::new(Capture::default());
        let ctx = LogExecutionContext::default()
            .with_instance(capture.clone())
            .with_level(threshold);
        let log = LoggerAdapter::new(&ctx, "r", "s", "m").unwrap();

        for (level, message) in &calls {
            log.log(*level, Value::Null, message.clone());
        }

        let expected: Vec<(LogLevel, String)> = calls
            .iter()
            .filter(|(level, _)| *level >= threshold)
            .cloned()
            .collect();
        assert_eq!(*capture.0.lock(), expected);
        assert_eq!(
            log.metrics().filtered() as usize,
            calls.len() - expected.len()
        );
    }
}
