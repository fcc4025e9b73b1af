use std::fmt::Display;

use serde::ser::Serialize;
use serde_json::value::{to_value, Value as Json};

use crate::errors::{Error, Result};
use crate::value::{scalar_to_string, Row, RowList};

/// Turns key-value pairs into rows of two entries: `key_name` holds the key
/// and `value_name` the value.
///
/// The rows keep the iteration order of `source`, so use an ordered map (or a `Vec`)
/// when the order matters.
///
/// ```rust
/// use ltpl::{map_to_rows, render_str, Values};
///
/// let mut values = Values::new();
/// values.insert("env", map_to_rows("key", "value", vec![("HOME", "/root"), ("SHELL", "sh")]));
/// let rendered = render_str("{@each:env}{@key}={@value}{@endeach:env}", &values).unwrap();
/// assert_eq!(rendered, "HOME=/root\nSHELL=sh");
/// ```
pub fn map_to_rows<I, K, V>(key_name: &str, value_name: &str, source: I) -> RowList
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    source
        .into_iter()
        .map(|(k, v)| {
            let mut row = Row::new();
            row.insert(key_name, k);
            row.insert(value_name, v);
            row
        })
        .collect()
}

/// Same as [`map_to_rows`] for anything that serializes to a map whose
/// values are scalars (string, number, boolean or null).
pub fn try_map_to_rows<T: Serialize + ?Sized>(
    key_name: &str,
    value_name: &str,
    source: &T,
) -> Result<RowList> {
    let map = match to_value(source)? {
        Json::Object(map) => map,
        other => {
            return Err(Error::invalid_value(format!(
                "only maps can be turned into rows, got `{}`",
                other
            )));
        }
    };

    let mut rows = Vec::with_capacity(map.len());
    for (k, v) in map {
        let text = scalar_to_string(v)
            .map_err(|e| Error::chain(format!("Failed to convert the value of key `{}`", k), e))?;
        let mut row = Row::new();
        row.insert(key_name, k);
        row.insert(value_name, text);
        rows.push(row);
    }
    Ok(rows)
}
