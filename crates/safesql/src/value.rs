//! Argument values bound to `%` codes in a statement template.
//!
//! [`Value`] is a closed sum type: every accessor matches exactly one variant and
//! reports [`SqlError::TypeMismatch`] otherwise.
//!
//! # Example
//! ```
//! use safesql::{PairList, Value};
//!
//! let filter = PairList::new().pair("status", "active").pair("deleted_at", Value::Null);
//! let ids = Value::from(vec![1_i64, 2, 3]);
//! assert!(Value::from(filter).is_pair_list());
//! assert_eq!(ids.as_list().unwrap().len(), 3);
//! ```

use crate::error::{SqlError, SqlResult};
use crate::statement::Statement;

/// One argument of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    /// A trusted sub-statement, rendered in place by `%Q`.
    RawStatement(Statement),
    List(Vec<Value>),
    /// Ordered `(key, value)` bindings for `%U`, `%W`, `%LO` and `%LA`.
    PairList(Vec<(String, Value)>),
}

impl Value {
    /// Short name of the active variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::RawStatement(_) => "statement",
            Value::List(_) => "list",
            Value::PairList(_) => "pair list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_raw_statement(&self) -> bool {
        matches!(self, Value::RawStatement(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_pair_list(&self) -> bool {
        matches!(self, Value::PairList(_))
    }

    /// Null, bool, int or double.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Double(_)
        )
    }

    fn mismatch(&self, expected: &'static str) -> SqlError {
        SqlError::TypeMismatch {
            expected,
            actual: self.type_name(),
        }
    }

    pub fn as_bool(&self) -> SqlResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn as_int(&self) -> SqlResult<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(other.mismatch("int")),
        }
    }

    pub fn as_double(&self) -> SqlResult<f64> {
        match self {
            Value::Double(d) => Ok(*d),
            other => Err(other.mismatch("double")),
        }
    }

    pub fn as_str(&self) -> SqlResult<&str> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn as_statement(&self) -> SqlResult<&Statement> {
        match self {
            Value::RawStatement(stmt) => Ok(stmt),
            other => Err(other.mismatch("statement")),
        }
    }

    pub fn as_list(&self) -> SqlResult<&[Value]> {
        match self {
            Value::List(list) => Ok(list),
            other => Err(other.mismatch("list")),
        }
    }

    pub fn as_pairs(&self) -> SqlResult<&[(String, Value)]> {
        match self {
            Value::PairList(pairs) => Ok(pairs),
            other => Err(other.mismatch("pair list")),
        }
    }

    /// Textual form of a bool, int, double or string.
    ///
    /// Bools become `1`/`0`. The result is not quoted or escaped; callers that
    /// embed strings into SQL go through the renderer instead.
    pub fn to_display_string(&self) -> SqlResult<String> {
        match self {
            Value::Bool(b) => Ok(if *b { "1" } else { "0" }.to_string()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Double(d) if d.is_finite() => Ok(d.to_string()),
            Value::Double(_) => Err(SqlError::UnsupportedConversion {
                kind: "non-finite double",
            }),
            Value::Str(s) => Ok(s.clone()),
            other => Err(SqlError::UnsupportedConversion {
                kind: other.type_name(),
            }),
        }
    }

    /// A pair list holding one binding.
    pub fn pair(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Value::PairList(vec![(key.into(), value.into())])
    }

    /// Append one binding to a pair list.
    ///
    /// Repeated calls accumulate, so a WHERE/SET clause can be built up
    /// incrementally.
    pub fn push_pair(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> SqlResult<&mut Self> {
        let Value::PairList(pairs) = self else {
            return Err(self.mismatch("pair list"));
        };
        pairs.push((key.into(), value.into()));
        Ok(self)
    }

    /// Append a sequence of bindings to a pair list, keeping existing ones.
    pub fn extend_pairs<K, V>(
        &mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> SqlResult<&mut Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let Value::PairList(existing) = self else {
            return Err(self.mismatch("pair list"));
        };
        existing.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        Ok(self)
    }
}

/// Builder for [`Value::PairList`], preserving insertion order.
///
/// ```
/// use safesql::{PairList, Value};
///
/// let set = PairList::new().pair("name", "alice").pair("age", 30);
/// assert_eq!(set.len(), 2);
/// let value: Value = set.into();
/// assert_eq!(value.as_pairs().unwrap()[0].0, "name");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct PairList {
    pairs: Vec<(String, Value)>,
}

impl PairList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding (consuming version, for chaining).
    pub fn pair(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a binding.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.pairs.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PairList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for PairList {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl From<PairList> for Value {
    fn from(pairs: PairList) -> Self {
        Value::PairList(pairs.pairs)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(d: f32) -> Self {
        Value::Double(f64::from(d))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<Statement> for Value {
    fn from(stmt: Statement) -> Self {
        Value::RawStatement(stmt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(list: Vec<T>) -> Self {
        Value::List(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "chrono")]
mod chrono_impls {
    use super::Value;

    impl From<chrono::NaiveDate> for Value {
        fn from(d: chrono::NaiveDate) -> Self {
            Value::Str(d.format("%Y-%m-%d").to_string())
        }
    }

    impl From<chrono::NaiveDateTime> for Value {
        fn from(dt: chrono::NaiveDateTime) -> Self {
            Value::Str(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string())
        }
    }

    /// Converted to UTC before formatting.
    impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for Value {
        fn from(dt: chrono::DateTime<Tz>) -> Self {
            Value::from(dt.naive_utc())
        }
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Value {
    fn from(id: uuid::Uuid) -> Self {
        Value::Str(id.hyphenated().to_string())
    }
}
