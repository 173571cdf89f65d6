//! Error types for the PRT-7 frame grammar.

use thiserror::Error;

/// Errors that can occur when parsing a frame line.
///
/// Every variant is local to a single line; none of them is fatal to a
/// decoding run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Line is shorter than three characters or has no comma after the tag.
    #[error("malformed line: {line:?}")]
    MalformedLine {
        /// The offending line.
        line: String,
    },

    /// The type tag is neither `L` nor `M`.
    #[error("unknown frame type: {tag:?}")]
    UnknownFrameType {
        /// The tag character found at position 0.
        tag: char,
    },

    /// A Load frame whose parameter is not exactly one character.
    #[error("load frame must carry exactly one character, got {payload:?}")]
    InvalidLoadPayload {
        /// The parameter text after the comma.
        payload: String,
    },
}

impl FrameError {
    /// Get the fieldless kind of this error.
    pub fn kind(&self) -> FrameErrorKind {
        match self {
            FrameError::MalformedLine { .. } => FrameErrorKind::MalformedLine,
            FrameError::UnknownFrameType { .. } => FrameErrorKind::UnknownFrameType,
            FrameError::InvalidLoadPayload { .. } => FrameErrorKind::InvalidLoadPayload,
        }
    }
}

/// Discriminant of a [`FrameError`], used for counting and labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameErrorKind {
    /// See [`FrameError::MalformedLine`].
    MalformedLine,
    /// See [`FrameError::UnknownFrameType`].
    UnknownFrameType,
    /// See [`FrameError::InvalidLoadPayload`].
    InvalidLoadPayload,
}

impl FrameErrorKind {
    /// Returns the kind as a snake_case string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FrameErrorKind::MalformedLine => "malformed_line",
            FrameErrorKind::UnknownFrameType => "unknown_frame_type",
            FrameErrorKind::InvalidLoadPayload => "invalid_load_payload",
        }
    }
}

impl std::fmt::Display for FrameErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias for frame parsing.
pub type FrameResult<T> = Result<T, FrameError>;
