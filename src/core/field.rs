//! Structured key/value attributes attached to log entries

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Key used by [`Field::error`] and by the first bare error in a key/value call.
pub const ERROR_KEY: &str = "error";

/// Value carried by a [`Field`]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Time(DateTime<Utc>),
    /// Rendered error message
    Error(String),
    Object(Vec<Field>),
    Array(Vec<FieldValue>),
    Json(serde_json::Value),
    Null,
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => Value::String(s.clone()),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::Uint(u) => Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Duration(d) => Value::String(format!("{:?}", d)),
            FieldValue::Time(t) => {
                Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            FieldValue::Object(fields) => {
                let mut map = serde_json::Map::with_capacity(fields.len());
                for field in fields {
                    map.insert(field.key.clone(), field.value.to_json_value());
                }
                Value::Object(map)
            }
            FieldValue::Array(items) => {
                Value::Array(items.iter().map(FieldValue::to_json_value).collect())
            }
            FieldValue::Json(v) => v.clone(),
            FieldValue::Null => Value::Null,
        }
    }

    /// Whether the value is textual, as opposed to numeric or composite.
    pub fn is_string(&self) -> bool {
        matches!(self, FieldValue::String(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Duration(d) => write!(f, "{:?}", d),
            FieldValue::Time(t) => write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            FieldValue::Object(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, "}}")
            }
            FieldValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            FieldValue::Json(v) => write!(f, "{}", v),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(v: $t) -> Self {
                FieldValue::Int(v as i64)
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(v: $t) -> Self {
                FieldValue::Uint(v as u64)
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        FieldValue::Duration(d)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Time(t)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Json(v)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::Array(items)
    }
}

impl From<Field> for FieldValue {
    fn from(field: Field) -> Self {
        FieldValue::Object(vec![field])
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A keyed, typed attribute of a log entry.
///
/// Fields are immutable once built. Duplicate keys are allowed in a field
/// list; encoders keep the last one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, FieldValue::Uint(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldValue::Float(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, FieldValue::Time(value))
    }

    /// Error under the reserved `"error"` key.
    pub fn error(err: &(dyn std::error::Error + '_)) -> Self {
        Self::named_error(ERROR_KEY, err)
    }

    pub fn named_error(key: impl Into<String>, err: &(dyn std::error::Error + '_)) -> Self {
        Self::new(key, FieldValue::Error(err.to_string()))
    }

    /// Nested group of fields.
    pub fn object(key: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(key, FieldValue::Object(fields))
    }

    pub fn array(key: impl Into<String>, items: Vec<FieldValue>) -> Self {
        Self::new(key, FieldValue::Array(items))
    }

    /// Generic constructor, picks the variant from the value's type.
    pub fn any(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(key, value)
    }

    /// Encode any serializable value as JSON.
    ///
    /// If serialization fails the field becomes `<key>Error` carrying the
    /// serializer's message.
    pub fn reflect<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(v) => Self::new(key, FieldValue::Json(v)),
            Err(e) => Self::new(format!("{}Error", key), FieldValue::Error(e.to_string())),
        }
    }

    pub fn null(key: impl Into<String>) -> Self {
        Self::new(key, FieldValue::Null)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_typed_constructors() {
        assert_eq!(Field::int("port", 8080).value, FieldValue::Int(8080));
        assert_eq!(Field::uint("n", 3).value, FieldValue::Uint(3));
        assert_eq!(Field::bool("ok", true).to_string(), "ok=true");
        assert_eq!(
            Field::duration("took", Duration::from_millis(1500)).to_string(),
            "took=1.5s"
        );
    }

    #[test]
    fn test_any_picks_variant() {
        assert_eq!(Field::any("age", 18).value, FieldValue::Int(18));
        assert_eq!(Field::any("size", 18usize).value, FieldValue::Uint(18));
        assert_eq!(Field::any("name", "jack").value, FieldValue::String("jack".into()));
        assert_eq!(Field::any("missing", None::<i32>).value, FieldValue::Null);
    }

    #[test]
    fn test_error_uses_reserved_key() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let field = Field::error(&err);
        assert_eq!(field.key, ERROR_KEY);
        assert_eq!(field.value, FieldValue::Error("no such file".into()));
    }

    #[test]
    fn test_reflect_serializable() {
        let mut map = BTreeMap::new();
        map.insert("region", "eu");
        let field = Field::reflect("meta", &map);
        assert_eq!(field.value.to_json_value(), serde_json::json!({"region": "eu"}));
    }

    #[test]
    fn test_object_to_json() {
        let field = Field::object(
            "peer",
            vec![Field::string("host", "db1"), Field::int("port", 5432)],
        );
        assert_eq!(
            field.value.to_json_value(),
            serde_json::json!({"host": "db1", "port": 5432})
        );
        assert_eq!(field.to_string(), "peer={host=db1 port=5432}");
    }

    #[test]
    fn test_non_finite_float_is_null_in_json() {
        assert_eq!(
            FieldValue::Float(f64::NAN).to_json_value(),
            serde_json::Value::Null
        );
    }
}
