//! Rendering of run results.

use std::io::Write;
use std::path::Path;

use prt7_decoder::{DecodeReport, TraceEntry};
use prt7_protocol::{Frame, FrameResult};
use serde::Serialize;

use crate::demo::ShowcaseEntry;
use crate::error::RunnerResult;

/// Output format for a decoded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// The bare message on one line.
    #[default]
    Text,
    /// The full report as JSON.
    Json,
}

/// Write a report in the given format.
pub fn write_report<W: Write>(out: &mut W, report: &DecodeReport, format: OutputFormat) -> RunnerResult<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", report.message)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct DemoDocument<'a> {
    report: &'a DecodeReport,
    showcase: Vec<ShowcaseEntry>,
}

/// Write a demo run: the decoded report followed by the parser showcase.
///
/// Text output prints one `line -> result` row per showcase line after the
/// message; JSON output nests both under `report` and `showcase`.
pub fn write_demo<W: Write>(
    out: &mut W,
    report: &DecodeReport,
    showcase: &[(&str, FrameResult<Frame>)],
    format: OutputFormat,
) -> RunnerResult<()> {
    match format {
        OutputFormat::Text => {
            write_report(out, report, format)?;
            for (line, result) in showcase {
                match result {
                    Ok(frame) => writeln!(out, "{:<6} -> {:?}", line, frame)?,
                    Err(e) => writeln!(out, "{:<6} -> error: {}", line, e)?,
                }
            }
        }
        OutputFormat::Json => {
            let document = DemoDocument {
                report,
                showcase: showcase
                    .iter()
                    .map(|(line, result)| ShowcaseEntry::new(line, result))
                    .collect(),
            };
            serde_json::to_writer_pretty(&mut *out, &document)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Write a trace as a JSON array.
pub fn write_trace(path: &Path, trace: &[TraceEntry]) -> RunnerResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, trace)?;
    writer.flush()?;
    Ok(())
}
