//! Attribute parsing for grid tags
//!
//! The attribute substring of a tag is a loose, space separated list of
//! `key`, `key:value`, `key=value` or `key="quoted value"` tokens. Parsing never
//! fails: anything that doesn't look like a key is skipped and scanning resumes
//! at the next identifier.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Lazy-compiled regex for one `key[:=]value` token
static ATTRIBUTE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z0-9_]+)(?:[:=]([^"\s]+|"[^"]*"))?"#).unwrap());

/// Ordered key/value pairs parsed from a tag
///
/// Keys keep the position of their first occurrence; a repeated key overwrites
/// the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an attribute substring such as `col:6 sm=12 class:"wide left"`
    pub fn parse(source: &str) -> Self {
        let mut attributes = Self::new();
        for captures in ATTRIBUTE_REGEX.captures_iter(source) {
            let key = &captures[1];
            let value = captures
                .get(2)
                .map(|value| value.as_str().trim_matches('"'))
                .unwrap_or("");
            attributes.insert(key, value);
        }
        attributes
    }

    /// Insert a pair, overwriting the value of an existing key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(attributes: &Attributes) -> Vec<(&str, &str)> {
        attributes.iter().collect()
    }

    #[test]
    fn test_empty_source() {
        assert!(Attributes::parse("").is_empty());
        assert!(Attributes::parse("   ").is_empty());
    }

    #[test]
    fn test_colon_and_equals_separators() {
        let attributes = Attributes::parse("gap:20 class=wide");
        assert_eq!(pairs(&attributes), vec![("gap", "20"), ("class", "wide")]);
    }

    #[test]
    fn test_quoted_value() {
        let attributes = Attributes::parse(r#"class:"left wide" gap:4"#);
        assert_eq!(attributes.get("class"), Some("left wide"));
        assert_eq!(attributes.get("gap"), Some("4"));
    }

    #[test]
    fn test_bare_key_maps_to_empty_string() {
        let attributes = Attributes::parse("hidden col:6");
        assert_eq!(attributes.get("hidden"), Some(""));
        assert_eq!(attributes.get("col"), Some("6"));
    }

    #[test]
    fn test_later_duplicate_overwrites_in_place() {
        let attributes = Attributes::parse("col:4 sm:6 col:8");
        assert_eq!(pairs(&attributes), vec![("col", "8"), ("sm", "6")]);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let attributes = Attributes::parse("Col:3 col:4");
        assert_eq!(attributes.get("Col"), Some("3"));
        assert_eq!(attributes.get("col"), Some("4"));
    }

    #[test]
    fn test_stray_colon_is_skipped() {
        let attributes = Attributes::parse(": gap:10 :: class:x");
        assert_eq!(pairs(&attributes), vec![("gap", "10"), ("class", "x")]);
    }

    #[test]
    fn test_unmatched_quote_does_not_swallow_following_attributes() {
        let attributes = Attributes::parse(r#"class:"broken gap:12"#);
        assert_eq!(attributes.get("class"), Some(""));
        assert_eq!(attributes.get("broken"), Some(""));
        assert_eq!(attributes.get("gap"), Some("12"));
    }

    #[test]
    fn test_separator_followed_by_space_leaves_value_empty() {
        let attributes = Attributes::parse("gap: 40");
        assert_eq!(attributes.get("gap"), Some(""));
        assert_eq!(attributes.get("40"), Some(""));
    }

    #[test]
    fn test_bare_value_stops_at_whitespace() {
        let attributes = Attributes::parse("class:a-b_c\tgap:2");
        assert_eq!(attributes.get("class"), Some("a-b_c"));
        assert_eq!(attributes.get("gap"), Some("2"));
    }

    #[test]
    fn test_from_iterator() {
        let attributes: Attributes = vec![("col", "6"), ("col", "7")].into_iter().collect();
        assert_eq!(pairs(&attributes), vec![("col", "7")]);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let attributes = Attributes::parse("sm:6 col:12");
        let json = serde_json::to_string(&attributes).unwrap();
        assert_eq!(json, r#"{"sm":"6","col":"12"}"#);
    }
}
