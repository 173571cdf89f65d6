//! Run statistics, rejected-line records and the final decode report.

use prt7_protocol::{FrameError, FrameErrorKind};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Counters for one decoding run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Lines handed to the processor.
    pub lines: usize,
    /// Load frames processed (equals the message length).
    pub loads: usize,
    /// Map frames processed.
    pub maps: usize,
    /// Lines rejected as malformed.
    pub malformed_lines: usize,
    /// Lines rejected for an unknown type tag.
    pub unknown_frame_types: usize,
    /// Load lines rejected for a bad payload.
    pub invalid_load_payloads: usize,
}

impl DecodeStats {
    /// Total rejected lines.
    pub fn rejected(&self) -> usize {
        self.malformed_lines + self.unknown_frame_types + self.invalid_load_payloads
    }

    /// Rejected lines of one kind.
    pub fn rejected_of(&self, kind: FrameErrorKind) -> usize {
        match kind {
            FrameErrorKind::MalformedLine => self.malformed_lines,
            FrameErrorKind::UnknownFrameType => self.unknown_frame_types,
            FrameErrorKind::InvalidLoadPayload => self.invalid_load_payloads,
        }
    }

    pub(crate) fn record_rejection(&mut self, kind: FrameErrorKind) {
        match kind {
            FrameErrorKind::MalformedLine => self.malformed_lines += 1,
            FrameErrorKind::UnknownFrameType => self.unknown_frame_types += 1,
            FrameErrorKind::InvalidLoadPayload => self.invalid_load_payloads += 1,
        }
    }
}

/// A line the parser rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// 1-based position of the line in the run.
    pub line_number: usize,
    /// The raw line.
    pub line: String,
    /// Why it was rejected.
    pub error: FrameError,
}

impl Serialize for LineFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LineFailure", 4)?;
        state.serialize_field("line_number", &self.line_number)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("reason", self.error.kind().as_str())?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

impl std::fmt::Display for LineFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.error)
    }
}

/// The outcome of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    /// The assembled message.
    pub message: String,
    /// Run counters.
    pub stats: DecodeStats,
    /// Rotor zero-offset at the end of the run.
    pub final_offset: usize,
    /// Rotor symbol at position zero at the end of the run.
    pub zero_symbol: char,
    /// Rejected lines, in input order.
    pub failures: Vec<LineFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rejection() {
        let mut stats = DecodeStats::default();
        stats.record_rejection(FrameErrorKind::MalformedLine);
        stats.record_rejection(FrameErrorKind::MalformedLine);
        stats.record_rejection(FrameErrorKind::InvalidLoadPayload);

        assert_eq!(stats.rejected(), 3);
        assert_eq!(stats.rejected_of(FrameErrorKind::MalformedLine), 2);
        assert_eq!(stats.rejected_of(FrameErrorKind::UnknownFrameType), 0);
    }

    #[test]
    fn test_failure_serializes_reason() {
        let failure = LineFailure {
            line_number: 3,
            line: "X,A".to_string(),
            error: FrameError::UnknownFrameType { tag: 'X' },
        };
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["line_number"], 3);
        assert_eq!(json["reason"], "unknown_frame_type");
        assert_eq!(failure.to_string(), "line 3: unknown frame type: 'X'");
    }
}
