//! Integration tests for the runner library.
//!
//! Integration tests run from the crate directory, so data paths are
//! relative to `crates/prt7-runner`.

use std::io::{Cursor, Read};
use std::path::Path;

use prt7_runner::{
    decode_source, load_config, open_source, ByteStreamSource, MemorySource, RunOptions,
    SourceConfig,
};

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_load_file_source_config() {
    let config = load_config(Path::new("tests/data/file_source.yaml")).expect("Failed to load config");

    assert_eq!(
        config.source,
        SourceConfig::File {
            path: "tests/data/frames.txt".into()
        }
    );
    assert_eq!(config.sentinel.as_deref(), Some("END"));
    assert!(config.trace);
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_missing_config_file() {
    let result = load_config(Path::new("tests/data/does_not_exist.yaml"));
    assert!(result.is_err(), "Expected an error for a missing config");
}

// ============================================================================
// Decoding From Sources
// ============================================================================

#[test]
fn test_decode_file_until_sentinel() {
    let config = load_config(Path::new("tests/data/file_source.yaml")).unwrap();
    let mut source = open_source(&config.source, config.max_line_length).unwrap();
    let options = RunOptions {
        sentinel: config.sentinel.clone(),
        trace: config.trace,
    };
    let outcome = decode_source(source.as_mut(), &options).unwrap();

    assert_eq!(outcome.report.message, "HOLC YORLD");
    assert!(outcome.sentinel_seen, "Expected the run to stop at END");
    assert_eq!(outcome.report.stats.lines, 12);
    assert_eq!(outcome.trace.len(), 12);
    assert!(outcome.report.failures.is_empty());
}

#[test]
fn test_decode_file_without_sentinel() {
    let config = load_config(Path::new("tests/data/no_sentinel.yaml")).unwrap();
    assert_eq!(config.sentinel, None);

    let mut source = open_source(&config.source, config.max_line_length).unwrap();
    let options = RunOptions {
        sentinel: None,
        trace: false,
    };
    let outcome = decode_source(source.as_mut(), &options).unwrap();

    // END is rejected as malformed and the trailing load is decoded.
    assert_eq!(outcome.report.message, "HOLC YORLDZ");
    assert_eq!(outcome.report.stats.malformed_lines, 1);
    assert_eq!(outcome.report.failures[0].line_number, 13);
}

#[test]
fn test_decode_crlf_file() {
    let config = SourceConfig::File {
        path: "tests/data/crlf_frames.txt".into(),
    };
    let mut source = open_source(&config, 255).unwrap();
    let outcome = decode_source(source.as_mut(), &RunOptions::default()).unwrap();

    assert_eq!(outcome.report.message, "HI");
    assert_eq!(outcome.report.stats.unknown_frame_types, 1);
    assert!(outcome.sentinel_seen);
}

#[test]
fn test_decode_byte_stream_in_chunks() {
    let bytes = b"M,3\r\nL,E\r\nL,L\r\nL, \r\nM,-3\r\nL,Z\r\nEND\r\n".to_vec();
    let mut source = ByteStreamSource::new("serial", Cursor::new(bytes));
    let outcome = decode_source(&mut source, &RunOptions::default()).unwrap();

    assert_eq!(outcome.report.message, "HO Z");
    assert_eq!(outcome.report.final_offset, 0);
}

/// Hands out at most `limit` bytes per read.
struct ChunkedReader {
    data: Cursor<Vec<u8>>,
    limit: usize,
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = buf.len().min(self.limit);
        self.data.read(&mut buf[..len])
    }
}

#[test]
fn test_full_length_line_independent_of_read_size() {
    let mut bytes = vec![b'X'; 255];
    bytes.extend_from_slice(b"\nL,A\n");

    let mut reports = Vec::new();
    for limit in [1, 255, 256, 4096] {
        let reader = ChunkedReader {
            data: Cursor::new(bytes.clone()),
            limit,
        };
        let mut source = ByteStreamSource::new("serial", reader);
        let outcome = decode_source(&mut source, &RunOptions::default()).unwrap();
        reports.push(outcome.report);
    }

    for report in &reports {
        assert_eq!(report.message, "A");
        assert_eq!(report.stats.lines, 2);
        assert_eq!(report.stats.malformed_lines, 1);
        assert_eq!(report.failures.len(), 1);
    }
}

#[test]
fn test_demo_source() {
    let mut source = MemorySource::demo();
    let outcome = decode_source(&mut source, &RunOptions::default()).unwrap();
    assert_eq!(outcome.report.message, "HOLC YORLD");
    assert!(!outcome.sentinel_seen);
}

#[test]
fn test_custom_sentinel() {
    let mut source = MemorySource::new("test", ["L,A", "STOP", "L,B"]);
    let options = RunOptions {
        sentinel: Some("STOP".to_string()),
        trace: false,
    };
    let outcome = decode_source(&mut source, &options).unwrap();
    assert_eq!(outcome.report.message, "A");
}

#[test]
fn test_open_missing_device_is_fatal() {
    let config = SourceConfig::Serial {
        device: "/dev/prt7-missing-device".into(),
        baud_rate: 9600,
    };
    let err = match open_source(&config, 255) {
        Ok(_) => panic!("Expected opening a missing device to fail"),
        Err(e) => e,
    };
    assert!(err.to_string().contains("/dev/prt7-missing-device"));
}
