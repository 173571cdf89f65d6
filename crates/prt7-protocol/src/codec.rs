//! Line codec for byte-stream transports.
//!
//! A PRT-7 source on a serial line sends one frame per line terminated with
//! `\n`, usually preceded by `\r`. The codec accumulates raw bytes and hands
//! out complete lines with all carriage returns removed.

use bytes::{Buf, BytesMut};

/// Maximum line length in bytes. Longer lines are split at this length.
pub const MAX_LINE_LENGTH: usize = 255;

/// Line terminator byte.
pub const LINE_TERMINATOR: u8 = b'\n';

/// A codec for reading PRT-7 lines from a byte stream.
///
/// - Accumulates received bytes until a complete line is found
/// - Drops every `\r` byte, wherever it appears
/// - Splits over-long lines at [`MAX_LINE_LENGTH`]; the remainder becomes
///   the start of the next line
#[derive(Debug)]
pub struct LineCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
    /// Longest line handed out, in bytes.
    max_line_length: usize,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCodec {
    /// Create a new line codec.
    pub fn new() -> Self {
        Self::with_max_line_length(MAX_LINE_LENGTH)
    }

    /// Create a line codec with a custom maximum line length.
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        LineCodec {
            buffer: BytesMut::with_capacity(max_line_length + 1),
            max_line_length: max_line_length.max(1),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.reserve(data.len());
        for &byte in data {
            if byte != b'\r' {
                self.buffer.extend_from_slice(&[byte]);
            }
        }
    }

    /// Try to decode a complete line from the buffer.
    ///
    /// Returns `Some(line)` without its terminator, or `None` if more data is
    /// needed. Empty lines are returned as empty strings.
    pub fn decode_line(&mut self) -> Option<String> {
        let newline = self
            .buffer
            .iter()
            .take(self.max_line_length + 1)
            .position(|&b| b == LINE_TERMINATOR);

        match newline {
            Some(end) => {
                let line_data = self.buffer.split_to(end);
                self.buffer.advance(1);
                Some(String::from_utf8_lossy(&line_data).into_owned())
            }
            // A line of exactly the maximum length may still get its terminator.
            None if self.buffer.len() > self.max_line_length => {
                let line_data = self.buffer.split_to(self.max_line_length);
                log::warn!(
                    "line exceeds {} bytes, splitting",
                    self.max_line_length
                );
                Some(String::from_utf8_lossy(&line_data).into_owned())
            }
            None => None,
        }
    }

    /// Flush a trailing unterminated line at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        if let Some(line) = self.decode_line() {
            return Some(line);
        }
        if self.buffer.is_empty() {
            return None;
        }
        let line_data = self.buffer.split();
        Some(String::from_utf8_lossy(&line_data).into_owned())
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lines() {
        let mut codec = LineCodec::new();
        codec.push(b"L,H\r\nM,2\r\n");

        assert_eq!(codec.decode_line(), Some("L,H".to_string()));
        assert_eq!(codec.decode_line(), Some("M,2".to_string()));
        assert!(codec.decode_line().is_none());
        assert_eq!(codec.buffered_len(), 0);
    }

    #[test]
    fn test_partial_line() {
        let mut codec = LineCodec::new();
        codec.push(b"L,");
        assert!(codec.decode_line().is_none());

        codec.push(b" \n");
        assert_eq!(codec.decode_line(), Some("L, ".to_string()));
    }

    #[test]
    fn test_carriage_returns_dropped_anywhere() {
        let mut codec = LineCodec::new();
        codec.push(b"M\r,-\r2\n");
        assert_eq!(codec.decode_line(), Some("M,-2".to_string()));
    }

    #[test]
    fn test_empty_lines_are_yielded() {
        let mut codec = LineCodec::new();
        codec.push(b"\r\nEND\n");
        assert_eq!(codec.decode_line(), Some(String::new()));
        assert_eq!(codec.decode_line(), Some("END".to_string()));
    }

    #[test]
    fn test_long_line_split() {
        let mut codec = LineCodec::with_max_line_length(4);
        codec.push(b"ABCDEFG\n");
        assert_eq!(codec.decode_line(), Some("ABCD".to_string()));
        assert_eq!(codec.decode_line(), Some("EFG".to_string()));
        assert!(codec.decode_line().is_none());
    }

    #[test]
    fn test_line_at_exact_limit() {
        let mut codec = LineCodec::with_max_line_length(3);
        codec.push(b"L,A\n");
        assert_eq!(codec.decode_line(), Some("L,A".to_string()));
        assert!(codec.decode_line().is_none());
    }

    #[test]
    fn test_full_length_line_waits_for_terminator() {
        let mut codec = LineCodec::new();
        codec.push(&[b'X'; MAX_LINE_LENGTH]);
        assert!(codec.decode_line().is_none());

        codec.push(b"\nL,A\n");
        assert_eq!(codec.decode_line(), Some("X".repeat(MAX_LINE_LENGTH)));
        assert_eq!(codec.decode_line(), Some("L,A".to_string()));
        assert!(codec.decode_line().is_none());
        assert_eq!(codec.buffered_len(), 0);
    }

    #[test]
    fn test_overlong_line_split_once_next_byte_arrives() {
        let mut codec = LineCodec::with_max_line_length(3);
        codec.push(b"ABC");
        assert!(codec.decode_line().is_none());
        codec.push(b"D");
        assert_eq!(codec.decode_line(), Some("ABC".to_string()));
        assert_eq!(codec.finish(), Some("D".to_string()));
    }

    #[test]
    fn test_finish_flushes_unterminated_line() {
        let mut codec = LineCodec::new();
        codec.push(b"L,D");
        assert!(codec.decode_line().is_none());
        assert_eq!(codec.finish(), Some("L,D".to_string()));
        assert_eq!(codec.finish(), None);
    }
}
