//! Metrics infrastructure for the PRT-7 decoder.
//!
//! This crate provides metric label helpers and describes all metrics emitted
//! while decoding a frame stream. It re-exports the `metrics` crate for
//! convenience and defines all metrics as structured [`Metric`] constants to
//! avoid typos and provide rich metadata.
//!
//! Without an installed recorder every metric call is a no-op, so the decoder
//! emits unconditionally.
//!
//! # Example
//!
//! ```rust,ignore
//! use prt7_metrics::{DecodeLabels, metric_defs, describe_metrics};
//!
//! // Initialize metrics descriptions at startup
//! describe_metrics();
//!
//! let labels = DecodeLabels::new("serial");
//! metrics::counter!(metric_defs::LINES_READ.name, &labels.to_labels()).increment(1);
//! ```
//!
//! # Metric Type
//!
//! ```rust
//! use prt7_metrics::{Metric, MetricKind};
//! use metrics::Unit;
//!
//! const MY_COUNTER: Metric = Metric::counter("my.counter")
//!     .with_description("A counter metric")
//!     .with_unit(Unit::Count)
//!     .with_labels(&["source"]);
//!
//! assert_eq!(MY_COUNTER.kind, MetricKind::Counter);
//! ```

pub use metrics;

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};

/// How a metric is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

/// A decoder metric: its name plus the metadata handed to the recorder.
#[derive(Debug, Clone)]
pub struct Metric {
    /// Recorder key, e.g. `prt7.frames.parsed`.
    pub name: &'static str,
    pub kind: MetricKind,
    pub description: &'static str,
    pub unit: Option<Unit>,
    /// Label keys every emission of this metric carries.
    pub labels: &'static [&'static str],
}

impl Metric {
    const fn declare(name: &'static str, kind: MetricKind) -> Self {
        Self {
            name,
            kind,
            description: "",
            unit: None,
            labels: &[],
        }
    }

    /// Declare a counter.
    pub const fn counter(name: &'static str) -> Self {
        Self::declare(name, MetricKind::Counter)
    }

    /// Declare a gauge.
    pub const fn gauge(name: &'static str) -> Self {
        Self::declare(name, MetricKind::Gauge)
    }

    /// Declare a histogram.
    pub const fn histogram(name: &'static str) -> Self {
        Self::declare(name, MetricKind::Histogram)
    }

    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub const fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }

    /// Register the description (and unit, if any) with the installed recorder.
    pub fn describe(&self) {
        let (name, description) = (self.name, self.description);
        match (self.kind, self.unit) {
            (MetricKind::Counter, Some(unit)) => {
                describe_counter!(name, unit, description);
            }
            (MetricKind::Counter, None) => {
                describe_counter!(name, description);
            }
            (MetricKind::Gauge, Some(unit)) => {
                describe_gauge!(name, unit, description);
            }
            (MetricKind::Gauge, None) => {
                describe_gauge!(name, description);
            }
            (MetricKind::Histogram, Some(unit)) => {
                describe_histogram!(name, unit, description);
            }
            (MetricKind::Histogram, None) => {
                describe_histogram!(name, description);
            }
        }
    }
}

/// All metric definitions for the decoder.
pub mod metric_defs {
    use super::{Metric, Unit};

    // ========================================================================
    // Input
    // ========================================================================

    /// Raw lines taken from the line source (sentinel excluded).
    pub const LINES_READ: Metric = Metric::counter("prt7.lines.read")
        .with_description("Raw lines read from the line source")
        .with_unit(Unit::Count)
        .with_labels(&["source"]);

    // ========================================================================
    // Frames
    // ========================================================================

    /// Lines that parsed into a frame.
    ///
    /// Labels: source, frame_type (`load` or `map`)
    pub const FRAMES_PARSED: Metric = Metric::counter("prt7.frames.parsed")
        .with_description("Lines successfully parsed into frames")
        .with_unit(Unit::Count)
        .with_labels(&["source", "frame_type"]);

    /// Lines rejected by the parser.
    ///
    /// Labels: source, reason (`malformed_line`, `unknown_frame_type`,
    /// `invalid_load_payload`)
    pub const FRAMES_REJECTED: Metric = Metric::counter("prt7.frames.rejected")
        .with_description("Lines rejected by the frame parser")
        .with_unit(Unit::Count)
        .with_labels(&["source", "reason"]);

    // ========================================================================
    // Rotor
    // ========================================================================

    /// Map frames applied to the rotor.
    pub const ROTOR_ROTATIONS: Metric = Metric::counter("prt7.rotor.rotations")
        .with_description("Rotations applied to the rotor")
        .with_unit(Unit::Count)
        .with_labels(&["source"]);

    /// Current rotor zero-offset, in [0, 26).
    pub const ROTOR_OFFSET: Metric = Metric::gauge("prt7.rotor.offset")
        .with_description("Current rotor zero-offset")
        .with_labels(&["source"]);

    /// Absolute size of each requested rotation before normalization.
    pub const ROTOR_DELTA: Metric = Metric::histogram("prt7.rotor.delta")
        .with_description("Absolute rotation delta requested by map frames")
        .with_labels(&["source"]);

    // ========================================================================
    // Message
    // ========================================================================

    /// Decoded message length.
    pub const MESSAGE_LENGTH: Metric = Metric::gauge("prt7.message.length")
        .with_description("Characters in the decoded message")
        .with_unit(Unit::Count)
        .with_labels(&["source"]);

    /// All metric definitions.
    pub const ALL: &[&Metric] = &[
        &LINES_READ,
        &FRAMES_PARSED,
        &FRAMES_REJECTED,
        &ROTOR_ROTATIONS,
        &ROTOR_OFFSET,
        &ROTOR_DELTA,
        &MESSAGE_LENGTH,
    ];
}

/// Metric labels identifying a decoding run.
///
/// # Example
///
/// ```rust
/// use prt7_metrics::DecodeLabels;
///
/// let labels = DecodeLabels::new("serial");
/// let extended = labels.with(&[("frame_type", "load".to_string())]);
/// assert_eq!(extended.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DecodeLabels {
    /// Name of the line source (demo, stdin, file, serial).
    pub source: String,
}

impl DecodeLabels {
    /// Creates labels for the given source name.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Converts the labels to the metrics crate label format.
    pub fn to_labels(&self) -> Vec<(&'static str, String)> {
        vec![("source", self.source.clone())]
    }

    /// Returns labels with additional key-value pairs.
    pub fn with(&self, extra: &[(&'static str, String)]) -> Vec<(&'static str, String)> {
        let mut labels = self.to_labels();
        labels.extend_from_slice(extra);
        labels
    }
}

impl Default for DecodeLabels {
    fn default() -> Self {
        Self::new("unknown")
    }
}

/// Describes all metrics used by the decoder.
///
/// Call once at startup, after installing a recorder.
pub fn describe_metrics() {
    for metric in metric_defs::ALL {
        metric.describe();
    }
}

/// Install a Prometheus exporter serving `/metrics` on `addr`.
#[cfg(feature = "prometheus")]
pub fn install_prometheus_exporter(
    addr: std::net::SocketAddr,
) -> Result<(), metrics_exporter_prometheus::BuildError> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    describe_metrics();
    Ok(())
}
