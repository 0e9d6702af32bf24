//! Import of generic JSON-like values into [`Value`].
//!
//! Any dynamic type can be imported by implementing [`DynamicValue`]; an
//! implementation for `serde_json::Value` ships behind the `json` feature.
//! Object keys are sorted so the same logical object always renders to the same
//! SQL text, whatever order its source stored the keys in.
//!
//! # Example
//! ```
//! # #[cfg(feature = "json")] {
//! use safesql::from_dynamic;
//!
//! let json = serde_json::json!({ "b": null, "a": [1, 2.5, "x"] });
//! let value = from_dynamic(&json).unwrap();
//! let keys: Vec<&str> = value.as_pairs().unwrap().iter().map(|(k, _)| k.as_str()).collect();
//! assert_eq!(keys, ["a", "b"]);
//! # }
//! ```

use std::borrow::Cow;

use crate::error::{SqlError, SqlResult};
use crate::value::Value;

/// One level of a dynamic value, as seen by the importer.
pub enum DynamicKind<'a, D: ?Sized> {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(&'a str),
    Array(Vec<&'a D>),
    Object(Vec<(Cow<'a, str>, &'a D)>),
    /// Anything else; the description ends up in the error.
    Unsupported(String),
}

/// Type discrimination and child access for an external dynamic value.
pub trait DynamicValue {
    fn classify(&self) -> DynamicKind<'_, Self>;
}

/// Convert a dynamic value into an argument.
///
/// Objects become pair lists sorted by key, arrays become lists, scalars map to
/// the matching variant.
pub fn from_dynamic<D: DynamicValue + ?Sized>(value: &D) -> SqlResult<Value> {
    Ok(match value.classify() {
        DynamicKind::Null => Value::Null,
        DynamicKind::Bool(b) => Value::Bool(b),
        DynamicKind::Int(i) => Value::Int(i),
        DynamicKind::Double(d) => Value::Double(d),
        DynamicKind::Str(s) => Value::Str(s.to_string()),
        DynamicKind::Array(items) => Value::List(
            items
                .into_iter()
                .map(from_dynamic)
                .collect::<SqlResult<Vec<_>>>()?,
        ),
        DynamicKind::Object(mut entries) => {
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let mut pairs = Vec::with_capacity(entries.len());
            for (key, child) in entries {
                pairs.push((key.into_owned(), from_dynamic(child)?));
            }
            Value::PairList(pairs)
        }
        DynamicKind::Unsupported(what) => return Err(SqlError::UnsupportedDynamicType(what)),
    })
}

#[cfg(feature = "json")]
mod json {
    use std::borrow::Cow;

    use super::{DynamicKind, DynamicValue, from_dynamic};
    use crate::error::SqlError;
    use crate::value::Value;

    impl DynamicValue for serde_json::Value {
        fn classify(&self) -> DynamicKind<'_, Self> {
            match self {
                serde_json::Value::Null => DynamicKind::Null,
                serde_json::Value::Bool(b) => DynamicKind::Bool(*b),
                serde_json::Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        DynamicKind::Int(i)
                    } else if n.is_u64() {
                        DynamicKind::Unsupported(format!("integer {n} does not fit in i64"))
                    } else {
                        match n.as_f64() {
                            Some(d) => DynamicKind::Double(d),
                            None => DynamicKind::Unsupported(format!("number {n}")),
                        }
                    }
                }
                serde_json::Value::String(s) => DynamicKind::Str(s),
                serde_json::Value::Array(items) => DynamicKind::Array(items.iter().collect()),
                serde_json::Value::Object(map) => DynamicKind::Object(
                    map.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v)).collect(),
                ),
            }
        }
    }

    impl TryFrom<&serde_json::Value> for Value {
        type Error = SqlError;

        fn try_from(json: &serde_json::Value) -> Result<Self, Self::Error> {
            from_dynamic(json)
        }
    }

    impl TryFrom<serde_json::Value> for Value {
        type Error = SqlError;

        fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
            from_dynamic(&json)
        }
    }
}
