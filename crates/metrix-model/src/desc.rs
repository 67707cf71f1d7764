use serde::Serialize;

use crate::{
    LabelSet, MetricKind, ModelError, ModelResult, validate_label_name, validate_metric_name,
};

/// Descriptor of a metric family.
///
/// Holds everything that is fixed at registration time: name, help text,
/// kind, declared label names and constant labels. A descriptor can only be
/// built through validating constructors, so every instance satisfies the
/// naming rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDesc {
    name: String,
    help: String,
    kind: MetricKind,
    label_names: Vec<String>,
    const_labels: LabelSet,
}

impl MetricDesc {
    /// Create a validated descriptor.
    ///
    /// # Errors
    /// - [`ModelError::InvalidMetricName`] if `name` breaks the naming rules.
    /// - [`ModelError::InvalidLabelName`] if a label name is empty, reserved,
    ///   malformed or declared twice.
    ///
    /// # Example
    /// ```
    /// use metrix_model::{MetricDesc, MetricKind};
    ///
    /// let desc = MetricDesc::new(
    ///     "http_requests",
    ///     "Total HTTP requests served",
    ///     MetricKind::Counter,
    ///     ["method", "status_code"],
    /// )
    /// .unwrap();
    /// assert_eq!(desc.label_names(), ["method", "status_code"]);
    /// ```
    pub fn new<N, H, I, L>(name: N, help: H, kind: MetricKind, label_names: I) -> ModelResult<Self>
    where
        N: Into<String>,
        H: Into<String>,
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let name = name.into();
        validate_metric_name(&name)?;

        let mut names: Vec<String> = Vec::new();
        for label in label_names {
            let label = label.into();
            validate_label_name(&label)?;
            if names.contains(&label) {
                return Err(ModelError::InvalidLabelName(label));
            }
            names.push(label);
        }

        Ok(Self {
            name,
            help: help.into(),
            kind,
            label_names: names,
            const_labels: LabelSet::new(),
        })
    }

    /// Attach a constant label emitted on every series of this family.
    ///
    /// The name follows the same rules as declared label names and must not
    /// collide with a declared or an already attached constant label.
    pub fn with_const_label<N, V>(mut self, name: N, value: V) -> ModelResult<Self>
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        validate_label_name(&name)?;
        if self.label_names.contains(&name) || self.const_labels.get(&name).is_some() {
            return Err(ModelError::InvalidLabelName(name));
        }
        self.const_labels.push(name, value);
        Ok(self)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn help(&self) -> &str {
        &self.help
    }

    #[inline]
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Declared (variable) label names, in declaration order.
    #[inline]
    pub fn label_names(&self) -> &[String] {
        &self.label_names
    }

    #[inline]
    pub fn const_labels(&self) -> &LabelSet {
        &self.const_labels
    }

    /// Position of a declared label name.
    pub fn label_position(&self, name: &str) -> Option<usize> {
        self.label_names.iter().position(|n| n == name)
    }
}
