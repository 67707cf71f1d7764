use serde::{Deserialize, Serialize};

/// A single `name="value"` label pair.
///
/// No validation is applied here; names are checked against the family
/// declaration when the pair is used to address a series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LabelPair {
    /// Label name.
    name: String,
    /// Label value.
    value: String,
}

impl LabelPair {
    /// Create a new label pair.
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get the label name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the label value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<(String, String)> for LabelPair {
    fn from((name, value): (String, String)) -> Self {
        Self { name, value }
    }
}

impl From<(&str, &str)> for LabelPair {
    fn from((name, value): (&str, &str)) -> Self {
        Self::new(name, value)
    }
}
