use indexmap::IndexMap;

use crate::http::value::HeaderValue;

/// Case-insensitive header map that remembers insertion order.
///
/// Names are keyed by their lower-cased form, so `Host` and `host` address the
/// same entry. The spelling used on first insertion is kept for serialization.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    entries: IndexMap<String, (String, HeaderValue)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a header, returning the previous value.
    ///
    /// Replacing keeps the entry's original position and spelling.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<HeaderValue>,
    ) -> Option<HeaderValue> {
        let name = name.into();
        let key = name.to_ascii_lowercase();
        let value = value.into();

        match self.entries.get_mut(&key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.insert(key, (name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderMap
where
    N: Into<String>,
    V: Into<HeaderValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_keeps_first_spelling() {
        let mut headers = HeaderMap::new();
        headers.insert("Connection", "keep-alive");
        headers.insert("X-Trace", "1");
        headers.insert("connection", "close");

        assert_eq!(headers.get("CONNECTION").unwrap(), "close");
        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Connection", "X-Trace"]);
    }
}
