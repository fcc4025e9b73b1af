//! The values a template is rendered with.
//!
//! A value is either a scalar, which replaces a `{@name}` token, or a list of
//! rows, which expands an `{@each:name}...{@endeach:name}` block once per row.

use std::fmt;

use serde_json::value::Value as Json;

use crate::errors::{Error, Result};

/// The ordered rows driving the expansion of one block
pub type RowList = Vec<Row>;

/// A single value given to the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Replaces every `{@name}` token with its text
    Scalar(String),
    /// Expands the `{@each:name}` block once per row
    Rows(RowList),
}

impl Value {
    /// Converts a JSON value.
    ///
    /// Strings are taken verbatim, numbers and booleans use their JSON text,
    /// `null` becomes an empty string and an array of objects becomes a row list.
    /// Anything else (a bare object, nested arrays...) is rejected.
    pub fn from_json(value: Json) -> Result<Value> {
        match value {
            Json::Array(items) => {
                let mut rows = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    match item {
                        Json::Object(map) => rows.push(Row::from_json_map(map)?),
                        other => {
                            return Err(Error::invalid_value(format!(
                                "row {} must be an object, got `{}`",
                                i, other
                            )));
                        }
                    }
                }
                Ok(Value::Rows(rows))
            }
            Json::Object(_) => Err(Error::invalid_value(
                "an object can't be used as a value, turn it into rows with `try_map_to_rows`",
            )),
            other => Ok(Value::Scalar(scalar_to_string(other)?)),
        }
    }

    /// Returns the text of a scalar, `None` for rows
    pub fn as_scalar(&self) -> Option<&str> {
        match *self {
            Value::Scalar(ref s) => Some(s),
            Value::Rows(_) => None,
        }
    }

    /// Returns the rows, `None` for a scalar
    pub fn as_rows(&self) -> Option<&[Row]> {
        match *self {
            Value::Rows(ref rows) => Some(rows),
            Value::Scalar(_) => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self {
        Value::Scalar(s.to_owned())
    }
}

impl From<RowList> for Value {
    fn from(rows: RowList) -> Self {
        Value::Rows(rows)
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(v.to_string())
                }
            }
        )*
    };
}

impl_scalar_from!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// One record of name -> text used to render one copy of a block.
///
/// Keys keep the order they were inserted in, which is the order their
/// tokens get substituted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, String)>,
}

impl Row {
    /// Creates an empty row
    pub fn new() -> Self {
        Row::default()
    }

    /// Sets `key` to `value`.
    /// An existing key keeps its position and gets the new value.
    pub fn insert<K: Into<String>, V: ToString>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Iterates over the entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn from_json_map(map: serde_json::Map<String, Json>) -> Result<Row> {
        let mut row = Row::new();
        for (key, value) in map {
            let text = scalar_to_string(value)
                .map_err(|e| Error::chain(format!("Failed to convert row entry `{}`", key), e))?;
            row.entries.push((key, text));
        }
        Ok(row)
    }
}

impl<K: Into<String>, V: ToString> std::iter::FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", k, v)?;
        }
        write!(f, "}}")
    }
}

/// Builds a row from `key => value` pairs.
///
/// ```rust
/// let row = ltpl::row! { "n" => 1, "label" => "first" };
/// assert_eq!(row.get("n"), Some("1"));
/// ```
#[macro_export]
macro_rules! row {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut row = $crate::Row::new();
        $(row.insert($key, $value);)*
        row
    }};
}

/// Text of a JSON scalar, as it is inserted in a template
pub(crate) fn scalar_to_string(value: Json) -> Result<String> {
    match value {
        Json::String(s) => Ok(s),
        Json::Number(n) => Ok(n.to_string()),
        Json::Bool(b) => Ok(b.to_string()),
        Json::Null => Ok(String::new()),
        other => Err(Error::invalid_value(format!("expected a scalar, got `{}`", other))),
    }
}
