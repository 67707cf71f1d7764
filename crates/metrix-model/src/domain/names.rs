//! Name rules for metric families and labels.
//!
//! Metric names: `[a-zA-Z_:][a-zA-Z0-9_:]*`.
//! Label names: `[a-zA-Z_][a-zA-Z0-9_]*`, without the reserved `__` prefix.

use crate::{ModelError, ModelResult};

/// Prefix reserved for internal label names (e.g. `__name__`).
pub const RESERVED_LABEL_PREFIX: &str = "__";

/// Validate a metric family name.
pub fn validate_metric_name(name: &str) -> ModelResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ModelError::InvalidMetricName(name.to_string()))
    }
}

/// Validate a label name.
///
/// Empty names, names with characters outside the allowed set and names
/// starting with [`RESERVED_LABEL_PREFIX`] are rejected.
pub fn validate_label_name(name: &str) -> ModelResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid && !name.starts_with(RESERVED_LABEL_PREFIX) {
        Ok(())
    } else {
        Err(ModelError::InvalidLabelName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_metric_names() {
        for name in ["http_requests", "_private", "ns:subsystem:total", "a1"] {
            assert!(validate_metric_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_invalid_metric_names() {
        for name in ["", "1abc", "with space", "dash-ed", "ünicode"] {
            assert_eq!(
                validate_metric_name(name),
                Err(ModelError::InvalidMetricName(name.to_string())),
            );
        }
    }

    #[test]
    fn accepts_valid_label_names() {
        for name in ["method", "status_code", "_x", "le"] {
            assert!(validate_label_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty_reserved_and_malformed_label_names() {
        for name in ["", "__name__", "__", "9lives", "colon:name", "a-b"] {
            assert_eq!(
                validate_label_name(name),
                Err(ModelError::InvalidLabelName(name.to_string())),
            );
        }
    }
}
