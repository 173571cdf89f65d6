//! PRT-7 runner library.
//!
//! Ties a line source to the decoder: configuration, sources, the run loop,
//! and output rendering. The `prt7` binary is a thin CLI over this crate.

pub mod config;
pub mod demo;
pub mod error;
pub mod output;
pub mod run;
pub mod source;

pub use config::{load_config, load_config_from_str, RunnerConfig, SourceConfig};
pub use error::{RunnerError, RunnerResult};
pub use output::{write_demo, write_report, write_trace, OutputFormat};
pub use run::{decode_source, RunOptions, RunOutcome};
pub use source::{open_source, ByteStreamSource, LineSource, MemorySource};

pub use prt7_decoder::{DecodeReport, DecodeStats, TraceEntry};
