use std::time::UNIX_EPOCH;

use metrix_core::{FamilySnapshot, LabelSet, MetricKind, SeriesSnapshot, Snapshot};

use crate::escape::{write_help, write_label_value, write_value};

/// Content type of the text exchange format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Encoder for the plain-text exchange format.
///
/// ## Options
/// - `created_samples`: also emit `<base>_created` lines for counter
///   series, carrying the series creation time in unix seconds. `<base>`
///   is the family name without a trailing `_total`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEncoder {
    created_samples: bool,
}

impl TextEncoder {
    /// Create an encoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable `_created` samples for counters.
    pub fn with_created_samples(mut self, enabled: bool) -> Self {
        self.created_samples = enabled;
        self
    }

    /// Content type to advertise alongside the encoded body.
    #[inline]
    pub fn format_type(&self) -> &'static str {
        CONTENT_TYPE
    }

    /// Encode a snapshot.
    ///
    /// Deterministic: families keep snapshot order and series are sorted by
    /// their rendered label string.
    pub fn encode(&self, snapshot: &Snapshot) -> String {
        let mut out = String::new();
        for family in snapshot.families() {
            self.encode_family(&mut out, family);
        }
        out
    }

    fn encode_family(&self, out: &mut String, family: &FamilySnapshot) {
        let desc = &family.desc;
        let name = desc.name();

        out.push_str("# HELP ");
        out.push_str(name);
        out.push(' ');
        write_help(out, desc.help());
        out.push('\n');

        out.push_str("# TYPE ");
        out.push_str(name);
        out.push(' ');
        out.push_str(desc.kind().as_str());
        out.push('\n');

        let mut rows: Vec<(String, &SeriesSnapshot)> = family
            .series
            .iter()
            .map(|s| (render_labels(&s.labels, desc.const_labels()), s))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        // `foo_total` pairs with `foo_created`.
        let created_name = (self.created_samples && desc.kind() == MetricKind::Counter)
            .then(|| name.strip_suffix("_total").unwrap_or(name));
        for (labels, series) in rows {
            write_sample(out, name, "", &labels, series.value);
            if let Some(base) = created_name {
                let secs = series
                    .created
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs_f64())
                    .unwrap_or(0.0);
                write_sample(out, base, "_created", &labels, secs);
            }
        }
    }
}

/// Encode a snapshot with default options.
pub fn encode(snapshot: &Snapshot) -> String {
    TextEncoder::new().encode(snapshot)
}

fn write_sample(out: &mut String, name: &str, suffix: &str, labels: &str, value: f64) {
    out.push_str(name);
    out.push_str(suffix);
    out.push_str(labels);
    out.push(' ');
    write_value(out, value);
    out.push('\n');
}

/// Render `{a="x",b="y"}`, or an empty string when there are no labels.
///
/// Declared labels keep their order; constant labels follow, sorted by name.
fn render_labels(labels: &LabelSet, const_labels: &LabelSet) -> String {
    if labels.is_empty() && const_labels.is_empty() {
        return String::new();
    }

    let mut out = String::from("{");
    let pairs = labels.iter().chain(const_labels.sorted());
    for (i, pair) in pairs.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(pair.name());
        out.push_str("=\"");
        write_label_value(&mut out, pair.value());
        out.push('"');
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use std::{
        sync::Arc,
        time::{Duration, SystemTime},
    };

    use metrix_core::{MetricDesc, Registry};

    use super::*;

    fn series(pairs: &[(&str, &str)], value: f64) -> SeriesSnapshot {
        SeriesSnapshot {
            labels: LabelSet::from_pairs(pairs.iter().copied()),
            value,
            created: UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        }
    }

    fn family(desc: MetricDesc, series: Vec<SeriesSnapshot>) -> FamilySnapshot {
        FamilySnapshot {
            desc: Arc::new(desc),
            series,
        }
    }

    #[test]
    fn encodes_labeled_counter() {
        let registry = Registry::new();
        let requests = registry
            .counter_vec("http_requests", "Total HTTP requests served", ["method", "status_code"])
            .unwrap();
        for _ in 0..5 {
            requests.inc(&["get", "200"]).unwrap();
        }

        let text = encode(&registry.snapshot());
        assert_eq!(
            text,
            "# HELP http_requests Total HTTP requests served\n\
             # TYPE http_requests counter\n\
             http_requests{method=\"get\",status_code=\"200\"} 5\n"
        );
    }

    #[test]
    fn family_without_series_emits_only_headers() {
        let registry = Registry::new();
        registry.gauge_vec("queue_depth", "Items waiting", ["queue"]).unwrap();

        assert_eq!(
            encode(&registry.snapshot()),
            "# HELP queue_depth Items waiting\n# TYPE queue_depth gauge\n"
        );
    }

    #[test]
    fn unlabeled_series_is_bare() {
        let registry = Registry::new();
        let up = registry.gauge_vec("up", "Liveness", Vec::<String>::new()).unwrap();
        up.set(&[], 1.0).unwrap();

        assert!(encode(&registry.snapshot()).ends_with("\nup 1\n"));
    }

    #[test]
    fn series_are_sorted_by_label_string() {
        let desc = MetricDesc::new("m", "h", MetricKind::Counter, ["code"]).unwrap();
        let snap = Snapshot::new(vec![family(
            desc,
            vec![
                series(&[("code", "500")], 1.0),
                series(&[("code", "200")], 2.0),
                series(&[("code", "404")], 3.0),
            ],
        )]);

        let lines: Vec<_> = encode(&snap).lines().skip(2).map(str::to_string).collect();
        assert_eq!(
            lines,
            vec![r#"m{code="200"} 2"#, r#"m{code="404"} 3"#, r#"m{code="500"} 1"#]
        );
    }

    #[test]
    fn families_keep_snapshot_order() {
        let registry = Registry::new();
        registry.counter_vec("b_total", "b", Vec::<String>::new()).unwrap();
        registry.counter_vec("a_total", "a", Vec::<String>::new()).unwrap();

        let text = encode(&registry.snapshot());
        let b = text.find("# HELP b_total").unwrap();
        let a = text.find("# HELP a_total").unwrap();
        assert!(b < a);
    }

    #[test]
    fn escapes_label_values_and_help() {
        let desc = MetricDesc::new("m", "line one\nline \\two", MetricKind::Gauge, ["path"]).unwrap();
        let snap = Snapshot::new(vec![family(
            desc,
            vec![series(&[("path", "C:\\dir \"x\"\nnext")], 1.0)],
        )]);

        let text = encode(&snap);
        assert!(text.contains("# HELP m line one\\nline \\\\two\n"));
        assert!(text.contains(r#"m{path="C:\\dir \"x\"\nnext"} 1"#));
    }

    #[test]
    fn const_labels_follow_declared_labels_sorted() {
        let desc = MetricDesc::new("m", "", MetricKind::Counter, ["method"])
            .unwrap()
            .with_const_label("zone", "eu")
            .unwrap()
            .with_const_label("app", "demo")
            .unwrap();
        let snap = Snapshot::new(vec![family(desc, vec![series(&[("method", "get")], 3.0)])]);

        assert!(encode(&snap).contains(r#"m{method="get",app="demo",zone="eu"} 3"#));
    }

    #[test]
    fn const_labels_on_unlabeled_family() {
        let desc = MetricDesc::new("process_bound_total", "", MetricKind::Counter, Vec::<String>::new())
            .unwrap()
            .with_const_label("foo", "foo")
            .unwrap()
            .with_const_label("bar", "bar")
            .unwrap();
        let snap = Snapshot::new(vec![family(desc, vec![series(&[], 7.0)])]);

        assert!(encode(&snap).contains(r#"process_bound_total{bar="bar",foo="foo"} 7"#));
    }

    #[test]
    fn encoding_is_idempotent() {
        let registry = Registry::new();
        let v = registry.counter_vec("c", "", ["k"]).unwrap();
        for k in ["x", "y", "z", "a"] {
            v.increment(&[k], 1.5).unwrap();
        }
        let snap = registry.snapshot();

        assert_eq!(encode(&snap), encode(&snap));
    }

    #[test]
    fn created_samples_only_for_counters() {
        let counter = MetricDesc::new("c_total", "", MetricKind::Counter, ["k"]).unwrap();
        let gauge = MetricDesc::new("g", "", MetricKind::Gauge, ["k"]).unwrap();
        let snap = Snapshot::new(vec![
            family(counter, vec![series(&[("k", "v")], 1.0)]),
            family(gauge, vec![series(&[("k", "v")], 1.0)]),
        ]);

        let text = TextEncoder::new().with_created_samples(true).encode(&snap);
        assert!(text.contains("c_total{k=\"v\"} 1\nc_created{k=\"v\"} 1700000000\n"));
        assert!(!text.contains("g_created"));

        assert!(!encode(&snap).contains("_created"));
    }

    #[test]
    fn created_name_drops_total_suffix() {
        let registry = Registry::new();
        let bound = registry
            .counter_vec("process_bound_counter_total", "", Vec::<String>::new())
            .unwrap();
        let plain = registry.counter_vec("jobs", "", Vec::<String>::new()).unwrap();
        bound.inc(&[]).unwrap();
        plain.inc(&[]).unwrap();

        let text = TextEncoder::new()
            .with_created_samples(true)
            .encode(&registry.snapshot());
        assert!(text.contains("\nprocess_bound_counter_created "), "{text}");
        assert!(!text.contains("process_bound_counter_total_created"));
        assert!(text.contains("\njobs_created "), "{text}");
    }

    #[test]
    fn created_before_epoch_falls_back_to_zero() {
        let desc = MetricDesc::new("c_total", "", MetricKind::Counter, Vec::<String>::new()).unwrap();
        let mut s = series(&[], 1.0);
        s.created = SystemTime::UNIX_EPOCH - Duration::from_secs(10);
        let snap = Snapshot::new(vec![family(desc, vec![s])]);

        let text = TextEncoder::new().with_created_samples(true).encode(&snap);
        assert!(text.contains("c_created 0\n"));
    }

    #[test]
    fn empty_snapshot_encodes_to_empty_body() {
        assert_eq!(encode(&Snapshot::default()), "");
        assert_eq!(TextEncoder::new().format_type(), "text/plain; version=0.0.4");
    }
}
