//! Order-preserving query parameter multimap.

use url::form_urlencoded;

/// Parsed query string pairs, with insertion order preserved.
///
/// Keys and values are stored percent-decoded. Duplicate keys are kept as
/// parsed; lookups return the first occurrence and [`QueryParams::set`]
/// collapses duplicates, matching common browser behavior.
///
/// # Example
///
/// ```
/// use tablestate_lib::query::QueryParams;
///
/// let mut params = QueryParams::parse("?tab=users&page-index=2");
/// assert_eq!(params.get("page-index"), Some("2"));
///
/// params.set("page-index", "3");
/// assert_eq!(params.to_query_string(), "tab=users&page-index=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string into decoded pairs.
    ///
    /// A leading `?` is ignored. A key with no `=` parses with an empty
    /// value. Parsing never fails; unreadable byte sequences decode
    /// lossily.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { pairs }
    }

    /// Returns the first value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if any pair has the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Sets a key to a value.
    ///
    /// If the key is present, the first occurrence is updated in place and
    /// any later duplicates are dropped. Otherwise the pair is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut kept_first = false;
                self.pairs.retain(|(k, _)| {
                    if *k == key {
                        if kept_first {
                            return false;
                        }
                        kept_first = true;
                    }
                    true
                });
            }
            None => self.pairs.push((key, value)),
        }
    }

    /// Removes all pairs with the given key.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Iterates over the decoded pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Serializes the pairs back into a percent-encoded query string,
    /// without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
