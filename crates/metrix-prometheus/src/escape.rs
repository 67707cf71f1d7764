//! Escaping and number rendering for the text exchange format.

use std::fmt::Write;

/// Append a label value, escaping `\`, `"` and newline.
pub(crate) fn write_label_value(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str(r#"\""#),
            '\n' => out.push_str(r"\n"),
            c => out.push(c),
        }
    }
}

/// Append help text, escaping `\` and newline.
pub(crate) fn write_help(out: &mut String, help: &str) {
    for c in help.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '\n' => out.push_str(r"\n"),
            c => out.push(c),
        }
    }
}

/// Append a sample value.
///
/// Integral values are written without a fractional part; non-finite values
/// use the `+Inf` / `-Inf` / `NaN` spellings.
pub(crate) fn write_value(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value == f64::INFINITY {
        out.push_str("+Inf");
    } else if value == f64::NEG_INFINITY {
        out.push_str("-Inf");
    } else {
        // Display omits `.0` for integral values.
        let _ = write!(out, "{value}");
    }
}
