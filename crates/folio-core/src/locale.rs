//! Locale-keyed field collections.
//!
//! Journal metadata is localized: a title, abstract, or author name may be
//! supplied in several locales, and vocabulary fields may carry several
//! values per locale. `LocalizedValues` is the multi-value form produced by
//! XML extraction; `LocalizedString` is the single-value form stored on
//! model fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Locale code → single value (e.g. a title per locale).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString(BTreeMap<String, String>);

impl LocalizedString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(locale: &str, value: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.set(locale, value);
        map
    }

    pub fn set(&mut self, locale: &str, value: impl Into<String>) {
        self.0.insert(locale.to_string(), value.into());
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.is_empty())
    }

    /// First non-empty entry in locale order.
    pub fn first(&self) -> Option<(&str, &str)> {
        self.0
            .iter()
            .find(|(_, v)| !v.is_empty())
            .map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// Value for `locale`, or the first available value.
    pub fn localized(&self, locale: &str) -> Option<&str> {
        self.get(locale)
            .filter(|v| !v.is_empty())
            .or_else(|| self.first().map(|(_, v)| v))
    }

    /// Copies the first available value into `locale` if that locale has no
    /// non-empty entry. Returns true when a copy was made.
    pub fn ensure_locale(&mut self, locale: &str) -> bool {
        if self.get(locale).is_some_and(|v| !v.is_empty()) {
            return false;
        }
        match self.first().map(|(_, v)| v.to_string()) {
            Some(value) => {
                self.set(locale, value);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }
}

/// Locale code → ordered values (e.g. keywords per locale).
///
/// Encounter order within a locale is preserved; locales iterate in sorted
/// order so behavior is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedValues(BTreeMap<String, Vec<String>>);

impl LocalizedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, locale: &str, value: impl Into<String>) {
        self.0.entry(locale.to_string()).or_default().push(value.into());
    }

    pub fn get(&self, locale: &str) -> &[String] {
        self.0.get(locale).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|v| v.iter().all(|s| s.is_empty()))
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(l, v)| (l.as_str(), v.as_slice()))
    }

    /// Collapses to one value per locale (the first non-empty one).
    pub fn into_single(self) -> LocalizedString {
        let mut out = LocalizedString::new();
        for (locale, values) in self.0 {
            if let Some(value) = values.into_iter().find(|v| !v.is_empty()) {
                out.set(&locale, value);
            }
        }
        out
    }

    /// Splits every value on `separator`, trimming entries and dropping
    /// empties. Vocabulary elements often pack a whole list into one
    /// element (`"A; B;C"`).
    pub fn split_terms(&self, separator: char) -> LocalizedValues {
        let mut out = LocalizedValues::new();
        for (locale, values) in self.iter() {
            for value in values {
                for term in value.split(separator) {
                    let term = term.trim();
                    if !term.is_empty() {
                        out.push(locale, term);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_locale_copies_first_available() {
        let mut title = LocalizedString::with("es_ES", "Hola");
        assert!(title.ensure_locale("en_US"));
        assert_eq!(title.get("en_US"), Some("Hola"));
        // Already present: no copy.
        assert!(!title.ensure_locale("en_US"));
    }

    #[test]
    fn ensure_locale_on_empty_map_is_noop() {
        let mut title = LocalizedString::new();
        assert!(!title.ensure_locale("en_US"));
        assert!(title.is_empty());
    }

    #[test]
    fn split_terms_trims_and_drops_empties() {
        let mut values = LocalizedValues::new();
        values.push("en_US", "A; B;C");
        values.push("en_US", " ;D");
        let terms = values.split_terms(';');
        assert_eq!(terms.get("en_US"), ["A", "B", "C", "D"]);
    }

    #[test]
    fn into_single_takes_first_per_locale() {
        let mut values = LocalizedValues::new();
        values.push("en_US", "first");
        values.push("en_US", "second");
        values.push("fr_CA", "premier");
        let single = values.into_single();
        assert_eq!(single.get("en_US"), Some("first"));
        assert_eq!(single.get("fr_CA"), Some("premier"));
    }
}
