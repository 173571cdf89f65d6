//! Per-line trace records.
//!
//! When enabled on a [`SequenceProcessor`](crate::SequenceProcessor), every
//! input line produces one [`TraceEntry`] describing what it did to the rotor
//! or the message. The runner writes these out as a JSON array.

use serde::{Deserialize, Serialize};

use crate::processor::Step;
use crate::stats::LineFailure;

/// What a line did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceOutcome {
    /// A Load frame appended a character.
    Load,
    /// A Map frame rotated the rotor.
    Map,
    /// The parser rejected the line.
    Rejected,
}

/// One trace record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// 1-based position of the line in the input.
    pub line_number: usize,
    /// The raw line.
    pub line: String,
    pub outcome: TraceOutcome,
    /// Character carried by a Load frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<char>,
    /// Character a Load frame appended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<char>,
    /// Rotation carried by a Map frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<i32>,
    /// Rotor offset after the line was processed.
    pub offset: usize,
    /// Parser error for a rejected line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TraceEntry {
    pub(crate) fn from_step(line_number: usize, line: &str, step: &Step, offset: usize) -> Self {
        let mut entry = TraceEntry {
            line_number,
            line: line.to_string(),
            outcome: TraceOutcome::Load,
            input: None,
            output: None,
            delta: None,
            offset,
            error: None,
        };
        match *step {
            Step::Loaded { input, output } => {
                entry.input = Some(input);
                entry.output = Some(output);
            }
            Step::Rotated { delta, .. } => {
                entry.outcome = TraceOutcome::Map;
                entry.delta = Some(delta);
            }
        }
        entry
    }

    pub(crate) fn from_failure(failure: &LineFailure, offset: usize) -> Self {
        TraceEntry {
            line_number: failure.line_number,
            line: failure.line.clone(),
            outcome: TraceOutcome::Rejected,
            input: None,
            output: None,
            delta: None,
            offset,
            error: Some(failure.error.to_string()),
        }
    }
}
