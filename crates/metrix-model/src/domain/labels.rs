use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::LabelPair;

/// Ordered sequence of label pairs identifying one series.
///
/// Insertion order is preserved for display, but two sets compare equal
/// (and hash identically) whenever their sorted pairs match.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<LabelPair>);

impl LabelSet {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a label set from anything convertible into pairs.
    ///
    /// ```
    /// use metrix_model::LabelSet;
    ///
    /// let labels = LabelSet::from_pairs([("method", "get"), ("status_code", "200")]);
    /// assert_eq!(labels.get("method"), Some("get"));
    /// ```
    pub fn from_pairs<I, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<LabelPair>,
    {
        Self(pairs.into_iter().map(Into::into).collect())
    }

    /// Append a pair.
    ///
    /// Returns `self` for chaining.
    pub fn push<N, V>(&mut self, name: N, value: V) -> &mut Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.0.push(LabelPair::new(name, value));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the value for a label name, returning the first match.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.value())
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LabelPair> {
        self.0.iter()
    }

    /// Iterate label names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.name())
    }

    /// Return the pairs sorted by name, then value.
    pub fn sorted(&self) -> Vec<&LabelPair> {
        let mut pairs: Vec<&LabelPair> = self.0.iter().collect();
        pairs.sort();
        pairs
    }
}

impl PartialEq for LabelSet {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.sorted() == other.sorted()
    }
}

impl Eq for LabelSet {}

impl Hash for LabelSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl<P: Into<LabelPair>> FromIterator<P> for LabelSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a LabelPair;
    type IntoIter = std::slice::Iter<'a, LabelPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_ignores_order() {
        let a = LabelSet::from_pairs([("method", "get"), ("status_code", "200")]);
        let b = LabelSet::from_pairs([("status_code", "200"), ("method", "get")]);
        assert_eq!(a, b);
    }

    #[test]
    fn different_values_are_not_equal() {
        let a = LabelSet::from_pairs([("method", "get")]);
        let b = LabelSet::from_pairs([("method", "put")]);
        let c = LabelSet::from_pairs([("method", "get"), ("status_code", "200")]);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_is_order_independent() {
        let mut set = HashSet::new();
        set.insert(LabelSet::from_pairs([("a", "1"), ("b", "2")]));
        assert!(set.contains(&LabelSet::from_pairs([("b", "2"), ("a", "1")])));
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut labels = LabelSet::new();
        labels.push("z", "1").push("a", "2");

        let names: Vec<_> = labels.names().collect();
        assert_eq!(names, vec!["z", "a"]);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("a"), Some("2"));
        assert!(labels.get("missing").is_none());
    }

    #[test]
    fn serde_is_a_plain_array() {
        let labels = LabelSet::from_pairs([("method", "get")]);
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"[{"name":"method","value":"get"}]"#);

        let back: LabelSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, labels);
    }
}
