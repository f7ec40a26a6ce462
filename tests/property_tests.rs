//! Property-based tests for rust_valuer_logger using proptest

use proptest::prelude::*;
use rust_valuer_logger::core::sweeten::{append_sweetened, sprint};
use rust_valuer_logger::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
        Just(Level::DPanic),
        Just(Level::Panic),
        Just(Level::Fatal),
    ]
}

/// Levels that never unwind or exit when enabled
fn quiet_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
        Just(Level::DPanic),
    ]
}

fn capture(min: Level) -> (Logger, MemoryAppender) {
    let memory = MemoryAppender::new();
    let logger = Logger::builder()
        .min_level(min)
        .appender(memory.clone())
        .field_pool(Arc::new(FieldPool::new(2)))
        .build();
    (logger, memory)
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level string conversions roundtrip
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: Level = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        let lower: Level = level.to_str().to_lowercase().parse().unwrap();
        prop_assert_eq!(level, lower);
    }

    /// Ordering agrees with the numeric representation
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, a.as_i8() <= b.as_i8());
        prop_assert_eq!(a < b, a.as_i8() < b.as_i8());
        prop_assert_eq!(Level::from_i8(a.as_i8()), a);
    }

    /// Unknown level text is rejected
    #[test]
    fn test_level_parse_rejects_garbage(text in "[a-z]{6,12}") {
        prop_assume!(!["warning", "dpanic"].contains(&text.as_str()));
        prop_assert!(text.parse::<Level>().is_err());
    }

    /// The gate enables exactly the levels at or above the minimum
    #[test]
    fn test_gate_enabled_matches_ordering(min in any_level(), level in any_level()) {
        let gate = AtomicLevel::new_at(min);
        prop_assert_eq!(gate.enabled(level), level >= min);
    }
}

// ============================================================================
// Dispatch Tests
// ============================================================================

proptest! {
    /// Entries are written iff the level is enabled, with valuer fields first
    #[test]
    fn test_written_iff_enabled(
        min in any_level(),
        level in quiet_level(),
        valuer_keys in prop::collection::vec("[a-z]{1,8}", 0..6),
        call_keys in prop::collection::vec("[A-Z]{1,8}", 0..6),
    ) {
        let (logger, memory) = capture(min);
        let logger = logger.with_valuer(
            valuer_keys.iter().map(|k| Valuer::immut_bool(k.clone(), true)),
        );
        let fields: Vec<Field> = call_keys.iter().map(|k| Field::int(k.clone(), 1)).collect();

        logger.logx(logger.context(), level, "m", &fields);

        if level >= min {
            let written: Vec<String> = memory.last_fields().into_iter().map(|f| f.key).collect();
            let expected: Vec<String> = valuer_keys.iter().chain(call_keys.iter()).cloned().collect();
            prop_assert_eq!(written, expected);
        } else {
            prop_assert!(memory.is_empty());
        }
    }

    /// Well-formed string-keyed pairs produce one field per pair, in order
    #[test]
    fn test_string_pairs_roundtrip(pairs in prop::collection::vec(("[a-z]{1,8}", any::<i64>()), 0..10)) {
        let args: Vec<Arg<'_>> = pairs
            .iter()
            .flat_map(|(k, v)| [Arg::from(k.as_str()), Arg::from(*v)])
            .collect();
        let mut out = Vec::new();
        let mut reports = 0;
        append_sweetened(&mut out, &args, |_, _| reports += 1);

        let expected: Vec<Field> = pairs.iter().map(|(k, v)| Field::any(k.clone(), *v)).collect();
        prop_assert_eq!(out, expected);
        prop_assert_eq!(reports, 0);
    }

    /// Reconciliation never panics and reports at most one invalid-key event
    #[test]
    fn test_reconciliation_total(values in prop::collection::vec(prop_oneof![
        "[a-z]{1,4}".prop_map(FieldValue::from),
        any::<i32>().prop_map(FieldValue::from),
        any::<bool>().prop_map(FieldValue::from),
    ], 0..16)) {
        let args: Vec<Arg<'_>> = values.into_iter().map(Arg::from).collect();
        let mut out = Vec::new();
        let mut reports = Vec::new();
        append_sweetened(&mut out, &args, |msg, _| reports.push(msg));

        prop_assert!(out.len() <= args.len() / 2);
        prop_assert!(reports.len() <= 2);
        if args.len() % 2 == 1 {
            prop_assert!(reports.contains(&rust_valuer_logger::core::sweeten::IGNORED_KEY_MSG));
        }
    }

    /// A single string operand passes through unchanged
    #[test]
    fn test_sprint_single_string(s in ".*") {
        prop_assert_eq!(sprint(&[FieldValue::from(s.as_str())]), s);
    }

    /// Adjacent numbers are separated by one space
    #[test]
    fn test_sprint_numbers(nums in prop::collection::vec(any::<i64>(), 1..8)) {
        let args: Vec<FieldValue> = nums.iter().map(|n| FieldValue::from(*n)).collect();
        let expected = nums.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        prop_assert_eq!(sprint(&args), expected);
    }
}

// ============================================================================
// Context Tests
// ============================================================================

proptest! {
    /// The nearest value wins and parents are unaffected
    #[test]
    fn test_context_shadowing(values in prop::collection::vec(any::<u32>(), 1..10)) {
        let mut contexts = vec![Context::background()];
        for v in &values {
            let next = contexts.last().unwrap().with_value(*v);
            contexts.push(next);
        }
        for (i, ctx) in contexts.iter().enumerate().skip(1) {
            prop_assert_eq!(ctx.value::<u32>(), Some(&values[i - 1]));
        }
        prop_assert!(contexts[0].value::<u32>().is_none());
    }
}
