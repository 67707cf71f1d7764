mod pair;
pub use pair::LabelPair;

mod labels;
pub use labels::LabelSet;

mod names;
pub use names::{RESERVED_LABEL_PREFIX, validate_label_name, validate_metric_name};
