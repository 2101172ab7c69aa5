use std::fmt::Display;

/// Ordered query parameters for a Subsonic request.
///
/// Values can be anything that implements `Display` (strings, integers,
/// booleans). Unset values are never stored: `None` and empty strings are
/// dropped on insertion, so they are never serialized as `None` or `key=`.
///
/// # Example
///
/// ```
/// use sonicrs::Query;
///
/// let query = Query::new()
///     .with("id", "al-42")
///     .with_opt("musicFolderId", None::<u32>)
///     .with_all("songId", ["1", "2"]);
///
/// assert_eq!(query.get("id"), Some("al-42"));
/// assert_eq!(query.get("musicFolderId"), None);
/// assert_eq!(query.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Empty values are skipped.
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter only if it is set.
    pub fn with_opt<V: Display>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append the same key once per value, e.g. several `songId` entries.
    pub fn with_all<V: Display>(mut self, key: &str, values: impl IntoIterator<Item = V>) -> Self {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// Append a parameter. Empty values are skipped.
    pub fn push(&mut self, key: &str, value: impl Display) {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
    }

    /// Replace the first parameter named `key`, or append it if absent.
    pub fn insert(&mut self, key: &str, value: impl Display) {
        let value = value.to_string();
        if value.is_empty() {
            return;
        }
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Lay `extra` over `self`.
    ///
    /// Keys of `extra` already present in `self` overwrite the existing value
    /// in place; every other pair of `extra` is appended in order, repeats included.
    pub(crate) fn merge(mut self, extra: &Query) -> Self {
        let base_len = self.pairs.len();
        for (key, value) in &extra.pairs {
            match self.pairs[..base_len].iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = value.clone(),
                None => self.pairs.push((key.clone(), value.clone())),
            }
        }
        self
    }
}

impl<K: AsRef<str>, V: Display> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.push(key.as_ref(), value);
        }
        query
    }
}
