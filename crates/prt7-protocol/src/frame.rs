//! Frame grammar for the PRT-7 protocol.
//!
//! A frame line has the shape `<tag>,<parameter>`:
//!
//! ```text
//! +-----+-----+---------------------+
//! | tag | ',' | parameter[2..]      |
//! +-----+-----+---------------------+
//! ```
//!
//! - `L`/`l`: the parameter is exactly one character (a space is valid).
//! - `M`/`m`: the parameter is a signed decimal integer, converted
//!   permissively (see [`parse_rotation`]).
//!
//! Parsing is all-or-nothing: a line either yields a complete [`Frame`] or a
//! [`FrameError`].

use crate::error::{FrameError, FrameResult};

/// Sentinel line that terminates a live stream.
pub const END_SENTINEL: &str = "END";

/// Separator between the type tag and the parameter.
pub const FIELD_SEPARATOR: char = ',';

/// Minimum length of a frame line, in characters.
pub const MIN_FRAME_LEN: usize = 3;

/// The type of a frame, as selected by its tag character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameType {
    /// Load one ciphertext character (`L`).
    Load,
    /// Rotate the decoding rotor (`M`).
    Map,
}

impl FrameType {
    /// Look up a frame type by its tag character (case-insensitive).
    pub fn from_tag(tag: char) -> Option<FrameType> {
        match tag {
            'L' | 'l' => Some(FrameType::Load),
            'M' | 'm' => Some(FrameType::Map),
            _ => None,
        }
    }

    /// The canonical (uppercase) tag character.
    pub const fn tag(&self) -> char {
        match self {
            FrameType::Load => 'L',
            FrameType::Map => 'M',
        }
    }

    /// Returns the type as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FrameType::Load => "load",
            FrameType::Map => "map",
        }
    }
}

impl std::fmt::Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed PRT-7 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// A character to be decoded and appended to the message.
    Load(char),
    /// A signed rotation delta for the rotor.
    Map(i32),
}

impl Frame {
    /// Parse a frame from a raw line. See [`parse_frame`].
    pub fn parse(line: &str) -> FrameResult<Frame> {
        parse_frame(line)
    }

    /// Get the frame type.
    pub fn frame_type(&self) -> FrameType {
        match self {
            Frame::Load(_) => FrameType::Load,
            Frame::Map(_) => FrameType::Map,
        }
    }

    /// Check if this is a Load frame.
    pub fn is_load(&self) -> bool {
        matches!(self, Frame::Load(_))
    }

    /// Check if this is a Map frame.
    pub fn is_map(&self) -> bool {
        matches!(self, Frame::Map(_))
    }

    /// Get the payload character if this is a Load frame.
    pub fn load_char(&self) -> Option<char> {
        match self {
            Frame::Load(c) => Some(*c),
            _ => None,
        }
    }

    /// Get the rotation delta if this is a Map frame.
    pub fn map_delta(&self) -> Option<i32> {
        match self {
            Frame::Map(n) => Some(*n),
            _ => None,
        }
    }

    /// Encode the frame in its canonical line form (no terminator).
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frame::Load(c) => write!(f, "{}{}{}", FrameType::Load.tag(), FIELD_SEPARATOR, c),
            Frame::Map(n) => write!(f, "{}{}{}", FrameType::Map.tag(), FIELD_SEPARATOR, n),
        }
    }
}

impl std::str::FromStr for Frame {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_frame(s)
    }
}

/// Parse one raw line into a [`Frame`].
///
/// The line must not include its terminator. Checks are applied in order:
/// length, separator, tag, then the tag-specific parameter rules.
pub fn parse_frame(line: &str) -> FrameResult<Frame> {
    let malformed = || FrameError::MalformedLine {
        line: line.to_string(),
    };

    if line.chars().take(MIN_FRAME_LEN).count() < MIN_FRAME_LEN {
        return Err(malformed());
    }
    let mut chars = line.chars();
    let (tag, separator) = match (chars.next(), chars.next()) {
        (Some(tag), Some(separator)) => (tag, separator),
        _ => return Err(malformed()),
    };
    if separator != FIELD_SEPARATOR {
        return Err(malformed());
    }
    let parameter = chars.as_str();

    let frame = match FrameType::from_tag(tag) {
        Some(FrameType::Load) => {
            let mut payload = parameter.chars();
            match (payload.next(), payload.next()) {
                (Some(c), None) => Frame::Load(c),
                _ => {
                    return Err(FrameError::InvalidLoadPayload {
                        payload: parameter.to_string(),
                    })
                }
            }
        }
        Some(FrameType::Map) => Frame::Map(parse_rotation(parameter)),
        None => return Err(FrameError::UnknownFrameType { tag }),
    };

    log::trace!("parsed [{}] -> {:?}", line, frame);
    Ok(frame)
}

/// Convert a Map parameter to a rotation delta.
///
/// The conversion never fails. Leading whitespace is skipped, an optional
/// sign is accepted, and the longest run of decimal digits that follows is
/// the value. Trailing text is ignored, and a parameter with no leading
/// digits yields `0`, so `"abc"` rotates by zero rather than rejecting the
/// frame. Out-of-range values saturate at the `i32` bounds.
pub fn parse_rotation(parameter: &str) -> i32 {
    let text = parameter.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');

    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    // Capped just past the i32 range so saturation stays exact.
    const CAP: i64 = i32::MAX as i64 + 2;
    let mut magnitude: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        magnitude = (magnitude * 10 + i64::from(byte - b'0')).min(CAP);
    }

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
