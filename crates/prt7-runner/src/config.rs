//! Runner configuration.
//!
//! Configuration is a small YAML document. Every field is optional:
//!
//! ```yaml
//! source:
//!   type: serial
//!   device: /dev/ttyUSB0
//!   baud_rate: 9600
//! sentinel: END      # null disables sentinel handling
//! trace: false
//! log_level: info
//! max_line_length: 255
//! ```

use std::path::{Path, PathBuf};

use prt7_protocol::{END_SENTINEL, MAX_LINE_LENGTH};
use serde::{Deserialize, Serialize};

use crate::error::RunnerResult;

/// Default serial bit rate.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

fn default_baud_rate() -> u32 {
    DEFAULT_BAUD_RATE
}

/// Where raw lines come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// The built-in example sequence.
    Demo,
    /// Standard input.
    #[default]
    Stdin,
    /// A text file, one frame per line.
    File {
        /// Path to the file.
        path: PathBuf,
    },
    /// A serial device node.
    ///
    /// The device is read as a byte stream; its line discipline (bit rate,
    /// framing) must already be set up. The bit rate is kept for logging.
    Serial {
        /// Device path (e.g. `/dev/ttyUSB0`).
        device: PathBuf,
        /// Bit rate the device is expected to run at.
        #[serde(default = "default_baud_rate")]
        baud_rate: u32,
    },
}

impl SourceConfig {
    /// Short name, used as the `source` metric label.
    pub fn name(&self) -> &'static str {
        match self {
            SourceConfig::Demo => "demo",
            SourceConfig::Stdin => "stdin",
            SourceConfig::File { .. } => "file",
            SourceConfig::Serial { .. } => "serial",
        }
    }
}

/// Top-level runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Line source.
    pub source: SourceConfig,
    /// Line that ends the stream; `None` reads to end of input.
    pub sentinel: Option<String>,
    /// Record a per-line trace.
    pub trace: bool,
    /// Log level filter (overridden by `RUST_LOG`).
    pub log_level: String,
    /// Longest line taken from a byte stream.
    pub max_line_length: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            source: SourceConfig::default(),
            sentinel: Some(END_SENTINEL.to_string()),
            trace: false,
            log_level: "info".to_string(),
            max_line_length: MAX_LINE_LENGTH,
        }
    }
}

/// Load a configuration file.
pub fn load_config(path: &Path) -> RunnerResult<RunnerConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| crate::RunnerError::OpenSource {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&text)
}

/// Parse a configuration from YAML text.
pub fn load_config_from_str(text: &str) -> RunnerResult<RunnerConfig> {
    if text.trim().is_empty() {
        return Ok(RunnerConfig::default());
    }
    Ok(serde_yaml::from_str(text)?)
}
