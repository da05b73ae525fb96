//! Enumerated string fields.
//!
//! Layout files store enumerations as bare keywords (`Transport Hint: raw`).
//! A [`Choice`] keeps the keyword exactly as written so that an unknown
//! value still parses and round-trips; validation reports it instead.

use std::fmt;
use std::marker::PhantomData;

/// A closed set of keywords accepted by an enumerated field.
pub trait Keyword: Copy + PartialEq + fmt::Debug + 'static {
    /// Every accepted keyword paired with its variant.
    const KEYWORDS: &'static [(&'static str, Self)];

    /// Returns the keyword for this variant.
    fn keyword(self) -> &'static str {
        Self::KEYWORDS
            .iter()
            .find(|(_, v)| *v == self)
            .map_or("", |(k, _)| k)
    }

    /// Looks up a variant by its exact keyword.
    fn from_keyword(keyword: &str) -> Option<Self> {
        Self::KEYWORDS
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, v)| *v)
    }

    /// Returns the list of accepted keywords.
    fn allowed() -> Vec<&'static str> {
        Self::KEYWORDS.iter().map(|(k, _)| *k).collect()
    }
}

/// The raw keyword of an enumerated field.
#[derive(Clone, PartialEq, Eq)]
pub struct Choice<T> {
    raw: String,
    _kind: PhantomData<T>,
}

impl<T: Keyword> Choice<T> {
    /// Creates a choice holding a known variant.
    pub fn new(value: T) -> Self {
        Self::from_raw(value.keyword())
    }

    /// Creates a choice from a keyword, known or not.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            _kind: PhantomData,
        }
    }

    /// Returns the keyword as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the variant, or `None` if the keyword is not recognized.
    pub fn get(&self) -> Option<T> {
        T::from_keyword(&self.raw)
    }

    pub fn is_known(&self) -> bool {
        self.get().is_some()
    }
}

impl<T: Keyword> From<T> for Choice<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> fmt::Debug for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Choice").field(&self.raw).finish()
    }
}

/// How image data is transported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportHint {
    #[default]
    Raw,
    Compressed,
}

impl Keyword for TransportHint {
    const KEYWORDS: &'static [(&'static str, Self)] =
        &[("raw", Self::Raw), ("compressed", Self::Compressed)];
}

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Keyword for Axis {
    const KEYWORDS: &'static [(&'static str, Self)] =
        &[("X", Self::X), ("Y", Self::Y), ("Z", Self::Z)];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keyword() {
        let hint: Choice<TransportHint> = Choice::from_raw("compressed");
        assert_eq!(hint.get(), Some(TransportHint::Compressed));
        assert!(hint.is_known());
    }

    #[test]
    fn test_unknown_keyword_is_kept() {
        let hint: Choice<TransportHint> = Choice::from_raw("theora");
        assert_eq!(hint.get(), None);
        assert_eq!(hint.raw(), "theora");
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let hint: Choice<TransportHint> = Choice::from_raw("Raw");
        assert!(!hint.is_known());
    }

    #[test]
    fn test_new_uses_keyword() {
        assert_eq!(Choice::new(Axis::Z).raw(), "Z");
        assert_eq!(TransportHint::allowed(), vec!["raw", "compressed"]);
    }
}
