//! Built-in example data.

use prt7_protocol::{parse_frame, Frame, FrameResult};
use serde::Serialize;

/// The example transmission. Decodes to `"HOLC YORLD"`.
pub const EXAMPLE_SEQUENCE: [&str; 12] = [
    "L,H", "L,O", "L,L", "M,2", "L,A", "L, ", "L,W", "M,-2", "L,O", "L,R", "L,L", "L,D",
];

/// Lines exercising each parser outcome other than a plain frame.
pub const PARSER_SHOWCASE: [&str; 4] = ["X,A", "L", "L;A", "M,abc"];

/// Parse every showcase line.
pub fn parser_showcase() -> Vec<(&'static str, FrameResult<Frame>)> {
    PARSER_SHOWCASE
        .iter()
        .map(|&line| (line, parse_frame(line)))
        .collect()
}

/// A showcase parse result in serializable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowcaseEntry {
    pub line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ShowcaseEntry {
    pub fn new(line: &str, result: &FrameResult<Frame>) -> Self {
        let (frame, error) = match result {
            Ok(frame) => (Some(format!("{:?}", frame)), None),
            Err(e) => (None, Some(e.to_string())),
        };
        ShowcaseEntry {
            line: line.to_string(),
            frame,
            error,
        }
    }
}
