mod domain;
pub use domain::{LabelPair, LabelSet, RESERVED_LABEL_PREFIX};
pub use domain::{validate_label_name, validate_metric_name};

mod error;
pub use error::{ModelError, ModelResult};

mod kind;
pub use kind::MetricKind;

mod desc;
pub use desc::MetricDesc;
