use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid metric name: {0:?}")]
    InvalidMetricName(String),

    #[error("invalid label name: {0:?}")]
    InvalidLabelName(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
