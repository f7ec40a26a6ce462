//! Loosely-typed call arguments and their reconciliation into fields
//!
//! The `w` call family takes a flat list of [`Arg`]s mixing ready-made
//! fields, bare errors and alternating key/value pairs. [`append_sweetened`]
//! turns that list into fields in one left-to-right pass. Malformed input
//! never fails the call; it is reported as a diagnostic event instead.

use super::field::{Field, FieldValue};
use std::error::Error;
use std::fmt::{self, Write as _};

pub const IGNORED_KEY_MSG: &str = "Ignored key without a value.";
pub const NON_STRING_KEYS_MSG: &str = "Ignored key-value pairs with non-string keys.";
pub const MULTIPLE_ERRORS_MSG: &str = "Multiple errors without a key.";

/// One element of a loosely-typed argument list.
#[derive(Clone)]
pub enum Arg<'a> {
    /// Pre-built field, kept verbatim.
    Field(Field),
    /// Bare error; the first one becomes the `"error"` field.
    Error(&'a (dyn Error + 'a)),
    /// Key or value of a pair. Only string values are valid keys.
    Value(FieldValue),
}

impl<'a> Arg<'a> {
    pub fn error(err: &'a (dyn Error + 'a)) -> Self {
        Arg::Error(err)
    }

    /// The value this element contributes when it sits in value position.
    fn to_value(&self) -> FieldValue {
        match self {
            Arg::Field(f) => FieldValue::Object(vec![f.clone()]),
            Arg::Error(e) => FieldValue::Error(e.to_string()),
            Arg::Value(v) => v.clone(),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Arg::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
            Arg::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

impl From<Field> for Arg<'_> {
    fn from(field: Field) -> Self {
        Arg::Field(field)
    }
}

impl From<FieldValue> for Arg<'_> {
    fn from(value: FieldValue) -> Self {
        Arg::Value(value)
    }
}

macro_rules! arg_from_value {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for Arg<'_> {
            fn from(v: $t) -> Self {
                Arg::Value(FieldValue::from(v))
            }
        })*
    };
}

arg_from_value!(
    String,
    &str,
    &String,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    std::time::Duration,
    chrono::DateTime<chrono::Utc>,
    serde_json::Value,
);

/// Reconcile `args` into fields appended to `out`.
///
/// `report` is called with a message and a field for every diagnostic
/// event: a second or later bare error, a dangling key (processing stops
/// there), and once at the end if any pair had a non-string key.
pub fn append_sweetened<F>(out: &mut Vec<Field>, args: &[Arg<'_>], mut report: F)
where
    F: FnMut(&'static str, Field),
{
    let mut invalid: Vec<FieldValue> = Vec::new();
    let mut seen_error = false;

    let mut i = 0;
    while i < args.len() {
        match &args[i] {
            Arg::Field(f) => {
                out.push(f.clone());
                i += 1;
                continue;
            }
            Arg::Error(e) => {
                if seen_error {
                    report(MULTIPLE_ERRORS_MSG, Field::error(*e));
                } else {
                    seen_error = true;
                    out.push(Field::error(*e));
                }
                i += 1;
                continue;
            }
            Arg::Value(_) => {}
        }

        if i == args.len() - 1 {
            report(IGNORED_KEY_MSG, Field::new("ignored", args[i].to_value()));
            break;
        }

        let (key, val) = (&args[i], &args[i + 1]);
        match key {
            Arg::Value(FieldValue::String(k)) => out.push(Field::new(k.clone(), val.to_value())),
            _ => {
                if invalid.capacity() == 0 {
                    invalid.reserve(args.len() / 2);
                }
                invalid.push(FieldValue::Object(vec![
                    Field::int("position", i as i64),
                    Field::new("key", key.to_value()),
                    Field::new("value", val.to_value()),
                ]));
            }
        }
        i += 2;
    }

    if !invalid.is_empty() {
        report(NON_STRING_KEYS_MSG, Field::array("invalid", invalid));
    }
}

/// Build a print-style message from loose operands.
///
/// A space separates two adjacent operands when neither is a string, so
/// a single string passes through unchanged.
pub fn sprint(args: &[FieldValue]) -> String {
    if let [FieldValue::String(s)] = args {
        return s.clone();
    }
    let mut msg = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 && !arg.is_string() && !args[i - 1].is_string() {
            msg.push(' ');
        }
        let _ = write!(msg, "{}", arg);
    }
    msg
}
