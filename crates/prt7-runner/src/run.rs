//! The decode run loop.

use prt7_decoder::{DecodeReport, SequenceProcessor, TraceEntry};
use prt7_metrics::DecodeLabels;
use prt7_protocol::END_SENTINEL;
use tracing::{debug, info};

use crate::error::RunnerResult;
use crate::source::LineSource;

/// Options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Line that ends the stream; `None` reads to end of input.
    pub sentinel: Option<String>,
    /// Record a per-line trace.
    pub trace: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            sentinel: Some(END_SENTINEL.to_string()),
            trace: false,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Decoded message and counters.
    pub report: DecodeReport,
    /// Per-line trace (empty unless requested).
    pub trace: Vec<TraceEntry>,
    /// Whether the run ended on the sentinel rather than end of input.
    pub sentinel_seen: bool,
}

/// Decode every line from `source` until the sentinel or end of input.
///
/// Rejected lines are recorded in the report. Only an I/O failure of the
/// source ends the run early.
pub fn decode_source(source: &mut dyn LineSource, options: &RunOptions) -> RunnerResult<RunOutcome> {
    let mut processor = SequenceProcessor::new().with_labels(DecodeLabels::new(source.name()));
    if options.trace {
        processor = processor.with_trace();
    }

    let mut sentinel_seen = false;
    while let Some(line) = source.next_line()? {
        if options.sentinel.as_deref() == Some(line.as_str()) {
            debug!(source = source.name(), "sentinel received");
            sentinel_seen = true;
            break;
        }
        // Rejections are recorded by the processor.
        let _ = processor.process_line(&line);
    }

    let trace = processor.trace().to_vec();
    let report = processor.finish();
    info!(
        source = source.name(),
        lines = report.stats.lines,
        loads = report.stats.loads,
        maps = report.stats.maps,
        rejected = report.stats.rejected(),
        "decode complete"
    );
    Ok(RunOutcome {
        report,
        trace,
        sentinel_seen,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    #[test]
    fn test_stops_at_sentinel() {
        let mut source = MemorySource::new("test", ["L,A", "END", "L,B"]);
        let outcome = decode_source(&mut source, &RunOptions::default()).unwrap();
        assert_eq!(outcome.report.message, "A");
        assert!(outcome.sentinel_seen);
        assert_eq!(outcome.report.stats.lines, 1);
    }

    #[test]
    fn test_without_sentinel_reads_everything() {
        let mut source = MemorySource::new("test", ["L,A", "END", "L,B"]);
        let options = RunOptions {
            sentinel: None,
            trace: true,
        };
        let outcome = decode_source(&mut source, &options).unwrap();
        // "END" is an ordinary malformed line here.
        assert_eq!(outcome.report.message, "AB");
        assert_eq!(outcome.report.stats.malformed_lines, 1);
        assert!(!outcome.sentinel_seen);
        assert_eq!(outcome.trace.len(), 3);
    }
}
