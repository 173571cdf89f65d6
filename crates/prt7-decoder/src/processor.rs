//! Sequence processing: raw lines in, rotor turns and decoded characters out.
//!
//! Lines are handled strictly in order. A Map frame changes the rotor for
//! every Load frame after it, so nothing here may be reordered or run in
//! parallel. A line the parser rejects is recorded and skipped; it never
//! touches the rotor or the message.

use prt7_metrics::{metric_defs, metrics, DecodeLabels};
use prt7_protocol::{parse_frame, Frame, FrameError};
use tracing::{debug, trace, warn};

use crate::buffer::MessageBuffer;
use crate::rotor::Rotor;
use crate::stats::{DecodeReport, DecodeStats, LineFailure};
use crate::trace::TraceEntry;

/// The effect of one applied frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A Load frame decoded `input` to `output` and appended it.
    Loaded { input: char, output: char },
    /// A Map frame rotated the rotor by `delta`, leaving it at `offset`.
    Rotated { delta: i32, offset: usize },
}

/// Apply one parsed frame to the rotor and buffer.
pub fn apply_frame(frame: Frame, rotor: &mut Rotor, buffer: &mut MessageBuffer) -> Step {
    match frame {
        Frame::Load(input) => {
            let output = rotor.map_char(input);
            buffer.append(output);
            Step::Loaded { input, output }
        }
        Frame::Map(delta) => {
            let offset = rotor.rotate(delta);
            Step::Rotated { delta, offset }
        }
    }
}

/// Drive `lines` through the parser into caller-owned state.
///
/// Returns the rejected lines in input order. Rejections are logged and do
/// not stop the run.
pub fn process_all<I, S>(lines: I, rotor: &mut Rotor, buffer: &mut MessageBuffer) -> Vec<LineFailure>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut failures = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        match parse_frame(line) {
            Ok(frame) => {
                apply_frame(frame, rotor, buffer);
            }
            Err(error) => {
                warn!(line_number = index + 1, %error, "rejected frame line");
                failures.push(LineFailure {
                    line_number: index + 1,
                    line: line.to_string(),
                    error,
                });
            }
        }
    }
    failures
}

/// Owns the state of one decoding run.
///
/// Wraps a fresh [`Rotor`] and [`MessageBuffer`], counts what happens,
/// remembers rejected lines, emits metrics, and optionally records a
/// per-line trace.
#[derive(Debug)]
pub struct SequenceProcessor {
    rotor: Rotor,
    buffer: MessageBuffer,
    stats: DecodeStats,
    failures: Vec<LineFailure>,
    trace: Option<Vec<TraceEntry>>,
    labels: DecodeLabels,
}

impl Default for SequenceProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceProcessor {
    /// Create a processor with a fresh rotor and an empty buffer.
    pub fn new() -> Self {
        SequenceProcessor {
            rotor: Rotor::new(),
            buffer: MessageBuffer::new(),
            stats: DecodeStats::default(),
            failures: Vec::new(),
            trace: None,
            labels: DecodeLabels::default(),
        }
    }

    /// Set the metric labels used for this run.
    pub fn with_labels(mut self, labels: DecodeLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Enable per-line trace recording.
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Parse and apply one raw line.
    ///
    /// A rejected line is recorded in [`failures`](Self::failures) and its
    /// error is also returned; the rotor and buffer are left untouched.
    pub fn process_line(&mut self, line: &str) -> Result<Step, FrameError> {
        self.stats.lines += 1;
        let line_number = self.stats.lines;
        metrics::counter!(metric_defs::LINES_READ.name, &self.labels.to_labels()).increment(1);

        let frame = match parse_frame(line) {
            Ok(frame) => frame,
            Err(error) => {
                self.reject(line_number, line, error.clone());
                return Err(error);
            }
        };

        let step = apply_frame(frame, &mut self.rotor, &mut self.buffer);
        metrics::counter!(
            metric_defs::FRAMES_PARSED.name,
            &self.labels.with(&[("frame_type", frame.frame_type().as_str().to_string())])
        )
        .increment(1);

        match step {
            Step::Loaded { input, output } => {
                self.stats.loads += 1;
                debug!(line_number, %input, %output, "load frame");
                metrics::gauge!(metric_defs::MESSAGE_LENGTH.name, &self.labels.to_labels())
                    .set(self.buffer.len() as f64);
            }
            Step::Rotated { delta, offset } => {
                self.stats.maps += 1;
                debug!(line_number, delta, offset, "map frame");
                let labels = self.labels.to_labels();
                metrics::counter!(metric_defs::ROTOR_ROTATIONS.name, &labels).increment(1);
                metrics::gauge!(metric_defs::ROTOR_OFFSET.name, &labels).set(offset as f64);
                metrics::histogram!(metric_defs::ROTOR_DELTA.name, &labels)
                    .record(f64::from(delta).abs());
            }
        }
        trace!(line_number, buffer = %self.buffer, "message so far");

        if let Some(trace) = self.trace.as_mut() {
            trace.push(TraceEntry::from_step(line_number, line, &step, self.rotor.offset()));
        }
        Ok(step)
    }

    /// Process every line in order.
    pub fn process_all<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            // Rejections are already recorded.
            let _ = self.process_line(line.as_ref());
        }
    }

    fn reject(&mut self, line_number: usize, line: &str, error: FrameError) {
        let kind = error.kind();
        warn!(line_number, line, %error, "rejected frame line");
        self.stats.record_rejection(kind);
        metrics::counter!(
            metric_defs::FRAMES_REJECTED.name,
            &self.labels.with(&[("reason", kind.as_str().to_string())])
        )
        .increment(1);

        let failure = LineFailure {
            line_number,
            line: line.to_string(),
            error,
        };
        if let Some(trace) = self.trace.as_mut() {
            trace.push(TraceEntry::from_failure(&failure, self.rotor.offset()));
        }
        self.failures.push(failure);
    }

    /// The rotor.
    pub fn rotor(&self) -> &Rotor {
        &self.rotor
    }

    /// The message buffer.
    pub fn buffer(&self) -> &MessageBuffer {
        &self.buffer
    }

    /// The message assembled so far.
    pub fn message(&self) -> String {
        self.buffer.assembled_message()
    }

    /// Counters for the run so far.
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Rejected lines so far, in input order.
    pub fn failures(&self) -> &[LineFailure] {
        &self.failures
    }

    /// Recorded trace, empty unless enabled with [`with_trace`](Self::with_trace).
    pub fn trace(&self) -> &[TraceEntry] {
        self.trace.as_deref().unwrap_or(&[])
    }

    /// Finish the run and build its report.
    pub fn finish(self) -> DecodeReport {
        DecodeReport {
            message: self.buffer.assembled_message(),
            final_offset: self.rotor.offset(),
            zero_symbol: self.rotor.zero_symbol(),
            stats: self.stats,
            failures: self.failures,
        }
    }
}
