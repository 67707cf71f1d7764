use thiserror::Error;

use metrix_model::{MetricKind, ModelError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("metric '{0}' is already registered")]
    DuplicateMetricName(String),

    #[error("invalid metric name: {0:?}")]
    InvalidMetricName(String),

    #[error("invalid label name: {0:?}")]
    InvalidLabelName(String),

    #[error("metric '{metric}' expects {expected} label values, got {actual}")]
    LabelArityMismatch {
        metric: String,
        expected: usize,
        actual: usize,
    },

    #[error("metric '{metric}' has no label named '{label}'")]
    UnknownLabelName { metric: String, label: String },

    #[error("counter '{metric}' cannot be changed by {delta}")]
    NegativeDelta { metric: String, delta: f64 },

    #[error("operation '{op}' is not supported for {kind} '{metric}'")]
    WrongKind {
        metric: String,
        kind: MetricKind,
        op: &'static str,
    },
}

impl From<ModelError> for CoreError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidMetricName(name) => CoreError::InvalidMetricName(name),
            ModelError::InvalidLabelName(name) => CoreError::InvalidLabelName(name),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
