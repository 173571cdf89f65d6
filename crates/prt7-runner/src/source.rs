//! Line sources.
//!
//! A line source hands raw text lines to the decoder one at a time. Lines
//! carry no terminator. Byte streams (stdin, files, serial devices) are all
//! read through [`LineCodec`], so they share carriage-return handling and
//! the line length limit.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use prt7_protocol::LineCodec;
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::demo::EXAMPLE_SEQUENCE;
use crate::error::{RunnerError, RunnerResult};

/// Read size for byte-stream sources.
const READ_CHUNK: usize = 256;

/// A producer of raw frame lines.
pub trait LineSource {
    /// Get the next line, or `None` at end of input.
    fn next_line(&mut self) -> RunnerResult<Option<String>>;

    /// Short name of the source, used in logs and metric labels.
    fn name(&self) -> &str;
}

/// Lines held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    lines: VecDeque<String>,
}

impl MemorySource {
    /// Create a source over the given lines.
    pub fn new<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemorySource {
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in example sequence.
    pub fn demo() -> Self {
        Self::new("demo", EXAMPLE_SEQUENCE)
    }
}

impl LineSource for MemorySource {
    fn next_line(&mut self) -> RunnerResult<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Lines decoded from any byte stream.
pub struct ByteStreamSource<R> {
    name: String,
    reader: R,
    codec: LineCodec,
    eof: bool,
}

impl<R: Read> ByteStreamSource<R> {
    /// Create a source reading from `reader`.
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self::with_codec(name, reader, LineCodec::new())
    }

    /// Create a source with a preconfigured codec.
    pub fn with_codec(name: impl Into<String>, reader: R, codec: LineCodec) -> Self {
        ByteStreamSource {
            name: name.into(),
            reader,
            codec,
            eof: false,
        }
    }
}

impl<R: Read> LineSource for ByteStreamSource<R> {
    fn next_line(&mut self) -> RunnerResult<Option<String>> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(line) = self.codec.decode_line() {
                return Ok(Some(line));
            }
            if self.eof {
                return Ok(self.codec.finish());
            }
            match self.reader.read(&mut chunk) {
                Ok(0) => {
                    debug!(source = %self.name, "end of input");
                    self.eof = true;
                }
                Ok(n) => self.codec.push(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(RunnerError::Io(e)),
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn open_file(path: &Path) -> RunnerResult<File> {
    File::open(path).map_err(|source| RunnerError::OpenSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Open the source described by `config`.
///
/// Failing to open a file or device is the one fatal condition of a run.
pub fn open_source(config: &SourceConfig, max_line_length: usize) -> RunnerResult<Box<dyn LineSource>> {
    let name = config.name();
    let codec = || LineCodec::with_max_line_length(max_line_length);
    let source: Box<dyn LineSource> = match config {
        SourceConfig::Demo => Box::new(MemorySource::demo()),
        SourceConfig::Stdin => Box::new(ByteStreamSource::with_codec(name, std::io::stdin(), codec())),
        SourceConfig::File { path } => {
            let file = open_file(path)?;
            info!(path = %path.display(), "reading frames from file");
            Box::new(ByteStreamSource::with_codec(name, file, codec()))
        }
        SourceConfig::Serial { device, baud_rate } => {
            let port = open_file(device)?;
            info!(device = %device.display(), baud_rate, "serial device opened");
            Box::new(ByteStreamSource::with_codec(name, port, codec()))
        }
    };
    Ok(source)
}
