//! # Canonical Keys
//!
//! Every intrinsic state is reduced to a [`FlyweightKey`] before it touches
//! the pool. Key derivation is a pure function of the state:
//!
//! - **Deterministic** - the same state always produces the same key
//! - **Order independent** - unordered fields are sorted before joining,
//!   so `{A, B, C}` and `{C, B, A}` key identically
//! - **Collision free** - separators inside field values are escaped, so
//!   `["a_b", "c"]` and `["a", "b_c"]` never share a key
//!
//! ## Format
//!
//! Unordered fields join with `_`: `{"red", "BMW", "M5"}` becomes
//! `BMW_M5_red`. Named fields become `name=value` segments sorted by
//! name: `color=green_name=oak_texture=rough`.
//!
//! Inside a segment `\` is written as `\\`, `_` as `\_` and (for named
//! segments) `=` as `\=`.

use std::fmt;

/// Field separator between segments.
const SEPARATOR: char = '_';

/// Name/value separator inside a named segment.
const ASSIGN: char = '=';

/// Escape character.
const ESCAPE: char = '\\';

/// Canonical, hashable identity of an intrinsic state.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlyweightKey(String);

impl FlyweightKey {
    /// Derives a key from fields that carry no semantic order.
    ///
    /// Fields are escaped, sorted and joined, so any permutation of the
    /// same fields yields the same key. Repeated fields are kept: `["a", "a"]`
    /// and `["a"]` are different states.
    ///
    /// # Arguments
    ///
    /// * `fields` - The field values, in any order
    #[must_use]
    pub fn from_unordered<I, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut segments: Vec<String> = fields
            .into_iter()
            .map(|field| escape(field.as_ref(), false))
            .collect();
        segments.sort_unstable();
        Self::join(&segments)
    }

    /// Derives a key from named fields.
    ///
    /// Segments are sorted by field name, so the order in which a record
    /// lists its fields does not matter.
    ///
    /// # Arguments
    ///
    /// * `fields` - `(name, value)` pairs, names unique within one state
    #[must_use]
    pub fn from_named<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut pairs: Vec<(&str, &str)> = fields.into_iter().collect();
        pairs.sort_unstable();

        let segments: Vec<String> = pairs
            .into_iter()
            .map(|(name, value)| {
                let mut segment = escape(name, true);
                segment.push(ASSIGN);
                segment.push_str(&escape(value, true));
                segment
            })
            .collect();
        Self::join(&segments)
    }

    /// Returns the key text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn join(segments: &[String]) -> Self {
        let mut key = String::with_capacity(segments.iter().map(|s| s.len() + 1).sum());
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                key.push(SEPARATOR);
            }
            key.push_str(segment);
        }
        Self(key)
    }
}

impl fmt::Display for FlyweightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FlyweightKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn escape(raw: &str, named: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == ESCAPE || c == SEPARATOR || (named && c == ASSIGN) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_sorts_fields() {
        let key = FlyweightKey::from_unordered(["red", "BMW", "M5"]);
        assert_eq!(key.as_str(), "BMW_M5_red");
        assert_eq!(key, FlyweightKey::from_unordered(["M5", "red", "BMW"]));
    }

    #[test]
    fn test_unordered_escapes_separator() {
        let left = FlyweightKey::from_unordered(["a_b", "c"]);
        let right = FlyweightKey::from_unordered(["a", "b_c"]);
        assert_ne!(left, right);
        assert_eq!(left.as_str(), "a\\_b_c");
    }

    #[test]
    fn test_unordered_escapes_escape() {
        // "a\" + "b" must not look like the single field "a_b"
        let left = FlyweightKey::from_unordered(["a\\", "b"]);
        let right = FlyweightKey::from_unordered(["a_b"]);
        assert_ne!(left, right);
    }

    #[test]
    fn test_unordered_keeps_duplicates() {
        assert_ne!(
            FlyweightKey::from_unordered(["black", "black"]),
            FlyweightKey::from_unordered(["black"])
        );
    }

    #[test]
    fn test_named_sorted_by_name() {
        let key = FlyweightKey::from_named([("name", "oak"), ("color", "green"), ("texture", "rough")]);
        assert_eq!(key.as_str(), "color=green_name=oak_texture=rough");

        let shuffled =
            FlyweightKey::from_named([("texture", "rough"), ("name", "oak"), ("color", "green")]);
        assert_eq!(key, shuffled);
    }

    #[test]
    fn test_named_escapes_assign() {
        let left = FlyweightKey::from_named([("a", "b=c")]);
        let right = FlyweightKey::from_named([("a=b", "c")]);
        assert_ne!(left, right);
    }

    #[test]
    fn test_named_values_not_interchangeable() {
        let oak = FlyweightKey::from_named([("name", "oak"), ("color", "green")]);
        let green = FlyweightKey::from_named([("name", "green"), ("color", "oak")]);
        assert_ne!(oak, green);
    }

    #[test]
    fn test_display_matches_as_str() {
        let key = FlyweightKey::from_unordered(["pine"]);
        assert_eq!(key.to_string(), key.as_str());
    }
}
