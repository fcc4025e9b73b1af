use std::iter::FromIterator;

use serde::ser::Serialize;
use serde_json::value::{to_value, Value as Json};

use crate::errors::{Error, Result};
use crate::value::Value;

/// The values a template is rendered with.
///
/// Values are applied in insertion order: a scalar inserted first can
/// introduce a token that a later value replaces.
///
/// ```rust
/// let mut values = ltpl::Values::new();
/// values.insert("greeting", "Hello {@name}");
/// values.insert("name", "world");
/// assert_eq!(ltpl::render_str("{@greeting}!", &values).unwrap(), "Hello world!");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    data: Vec<(String, Value)>,
}

impl Values {
    /// Initializes an empty set of values
    pub fn new() -> Self {
        Values::default()
    }

    /// Converts the `val` parameter to a `Value` and adds it under `key`.
    /// Inserting a key that already exists replaces its value but keeps its place
    /// in the rendering order.
    ///
    /// ```rust
    /// # use ltpl::{Values, row};
    /// let mut values = Values::new();
    /// values.insert("title", "Songs");
    /// values.insert("songs", vec![row! { "name" => "Sing Sing" }]);
    /// ```
    pub fn insert<T: Into<String>, V: Into<Value>>(&mut self, key: T, val: V) {
        let key = key.into();
        let val = val.into();
        match self.data.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = val,
            None => self.data.push((key, val)),
        }
    }

    /// Serializes `val` and adds it under `key`.
    ///
    /// Strings, numbers, booleans and `null` become scalars, sequences of
    /// structs or maps become rows. Anything else returns an error.
    ///
    /// ```rust
    /// # use ltpl::Values;
    /// # use std::collections::BTreeMap;
    /// let mut song = BTreeMap::new();
    /// song.insert("name", "Sing Sing");
    /// let mut values = Values::new();
    /// values.try_insert("year", &1971).unwrap();
    /// values.try_insert("songs", &vec![song]).unwrap();
    /// assert!(values.try_insert("bad", &song_map()).is_err());
    /// # fn song_map() -> BTreeMap<&'static str, i32> { BTreeMap::new() }
    /// ```
    pub fn try_insert<T: Serialize + ?Sized, S: Into<String>>(
        &mut self,
        key: S,
        val: &T,
    ) -> Result<()> {
        let key = key.into();
        let json = to_value(val)?;
        let value = Value::from_json(json)
            .map_err(|e| Error::chain(format!("Failed to convert value for `{}`", key), e))?;
        self.insert(key, value);
        Ok(())
    }

    /// Takes a serde-json `Value` and convert it into `Values` with no overhead/cloning.
    /// The value needs to be a JSON object, its keys are used in document order.
    pub fn from_value(obj: Json) -> Result<Self> {
        match obj {
            Json::Object(m) => {
                let mut values = Values::new();
                for (key, value) in m {
                    let converted = Value::from_json(value).map_err(|e| {
                        Error::chain(format!("Failed to convert value for `{}`", key), e)
                    })?;
                    values.data.push((key, converted));
                }
                Ok(values)
            }
            _ => Err(Error::msg(
                "Creating `Values` from JSON requires it being a JSON object",
            )),
        }
    }

    /// Takes something that impl Serialize and create `Values` out of it.
    /// The data needs to serialize to a map: a struct, a `HashMap`, a `BTreeMap`...
    pub fn from_serialize(value: impl Serialize) -> Result<Self> {
        let obj = to_value(value).map_err(Error::json)?;
        Values::from_value(obj)
    }

    /// Returns the value at a given key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes a key from the values, returning the value at the key if the key was present
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.data.iter().position(|(k, _)| k == key)?;
        Some(self.data.remove(pos).1)
    }

    /// Checks if a value exists at a specific key
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over the values in the order they are applied when rendering
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there are no values
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends the values of `source`, replacing the existing keys
    pub fn extend(&mut self, source: Values) {
        for (k, v) in source.data {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}
