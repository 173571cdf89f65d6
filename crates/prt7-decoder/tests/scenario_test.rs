//! End-to-end decoding scenarios.
//!
//! These tests drive raw frame lines through the whole decoder and check
//! the assembled message, the rotor state and the rejected lines.

use prt7_decoder::{process_all, FrameErrorKind, MessageBuffer, Rotor, SequenceProcessor};
use prt7_protocol::{parse_frame, Frame};

// ============================================================================
// Canonical Scenarios
// ============================================================================

const EXAMPLE: [&str; 12] = [
    "L,H", "L,O", "L,L", "M,2", "L,A", "L, ", "L,W", "M,-2", "L,O", "L,R", "L,L", "L,D",
];

#[test]
fn test_example_sequence_decodes() {
    let mut processor = SequenceProcessor::new();
    processor.process_all(EXAMPLE);

    let decoded: Vec<char> = processor.buffer().chars().collect();
    assert_eq!(decoded, vec!['H', 'O', 'L', 'C', ' ', 'Y', 'O', 'R', 'L', 'D']);
    assert_eq!(processor.message(), "HOLC YORLD");
}

#[test]
fn test_parser_error_cases() {
    assert_eq!(parse_frame("X,A").unwrap_err().kind(), FrameErrorKind::UnknownFrameType);
    assert_eq!(parse_frame("L").unwrap_err().kind(), FrameErrorKind::MalformedLine);
    assert_eq!(parse_frame("L;A").unwrap_err().kind(), FrameErrorKind::MalformedLine);
    assert_eq!(parse_frame("M,abc"), Ok(Frame::Map(0)));
}

#[test]
fn test_error_cases_inside_a_stream() {
    let mut lines: Vec<&str> = EXAMPLE.to_vec();
    lines.insert(3, "X,A");
    lines.insert(6, "L");
    lines.push("L;A");
    lines.push("M,abc");

    let mut rotor = Rotor::new();
    let mut buffer = MessageBuffer::new();
    let failures = process_all(&lines, &mut rotor, &mut buffer);

    assert_eq!(buffer.assembled_message(), "HOLC YORLD");
    assert_eq!(failures.len(), 3);
    assert_eq!(failures[0].line_number, 4);
    assert_eq!(failures[0].line, "X,A");
    assert_eq!(rotor.offset(), 0);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_mixed_case_tags() {
    let mut processor = SequenceProcessor::new();
    processor.process_all(["l,A", "m,3", "L,A", "M,-3", "l,a"]);
    assert_eq!(processor.message(), "ADa");
}

#[test]
fn test_parsing_has_no_side_effects() {
    let processor = SequenceProcessor::new();
    for line in EXAMPLE {
        let first = parse_frame(line);
        let second = parse_frame(line);
        assert_eq!(first, second);
    }
    assert!(processor.buffer().is_empty());
    assert_eq!(processor.rotor(), &Rotor::new());
}

#[test]
fn test_message_length_counts_only_loads() {
    let lines = ["M,1", "L,A", "M,1", "M,1", "L,B", "X,9", "L,C", "M,-100"];
    let mut processor = SequenceProcessor::new();
    processor.process_all(lines);

    assert_eq!(processor.buffer().len(), 3);
    assert_eq!(processor.stats().loads, 3);
    assert_eq!(processor.message(), "BEF");
}

#[test]
fn test_rotation_affects_only_later_loads() {
    let mut processor = SequenceProcessor::new();
    processor.process_all(["L,A", "M,1", "L,A", "M,1", "L,A"]);
    assert_eq!(processor.message(), "ABC");
}

#[test]
fn test_large_rotations_wrap() {
    let mut processor = SequenceProcessor::new();
    processor.process_all(["M,27", "L,A", "M,-53", "L,A", "M,2147483647", "L,A"]);
    // 27 -> 1; 1 - 53 -> 0; i32::MAX mod 26 = 23.
    assert_eq!(processor.message(), "BAX");
}
