//! `prt7`: decode PRT-7 telemetry streams.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use prt7_runner::demo::parser_showcase;
use prt7_runner::{
    decode_source, load_config, open_source, write_demo, write_report, write_trace, MemorySource,
    OutputFormat, RunOptions, RunnerConfig, RunnerResult, SourceConfig,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "prt7", version, about = "Decoder for the PRT-7 telemetry protocol")]
struct Cli {
    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a frame stream.
    Decode(DecodeArgs),
    /// Decode the built-in example sequence and show parser error cases.
    Demo {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Parse frame lines without decoding them.
    Parse {
        /// Lines to parse.
        #[arg(required = true, allow_hyphen_values = true)]
        lines: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Input file, or `-` for stdin. Overrides the configured source.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Line that ends the stream.
    #[arg(long, conflicts_with = "no_sentinel")]
    sentinel: Option<String>,

    /// Read to end of input, treating the sentinel as an ordinary line.
    #[arg(long)]
    no_sentinel: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write a per-line trace as JSON to this path.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Serve Prometheus metrics on this address.
    #[cfg(feature = "prometheus")]
    #[arg(long)]
    metrics_addr: Option<std::net::SocketAddr>,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(args: &DecodeArgs) -> RunnerResult<RunnerConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RunnerConfig::default(),
    };
    if let Some(input) = &args.input {
        config.source = if input.as_os_str() == "-" {
            SourceConfig::Stdin
        } else {
            SourceConfig::File { path: input.clone() }
        };
    }
    if let Some(sentinel) = &args.sentinel {
        config.sentinel = Some(sentinel.clone());
    }
    if args.no_sentinel {
        config.sentinel = None;
    }
    if args.trace.is_some() {
        config.trace = true;
    }
    Ok(config)
}

fn run_decode(args: DecodeArgs, config: RunnerConfig) -> RunnerResult<()> {
    #[cfg(feature = "prometheus")]
    if let Some(addr) = args.metrics_addr {
        if let Err(e) = prt7_metrics::install_prometheus_exporter(addr) {
            warn!("failed to start metrics exporter: {}", e);
        }
    }

    let mut source = open_source(&config.source, config.max_line_length)?;
    let options = RunOptions {
        sentinel: config.sentinel.clone(),
        trace: config.trace,
    };
    let outcome = decode_source(source.as_mut(), &options)?;

    if !outcome.report.failures.is_empty() {
        warn!("{} line(s) rejected", outcome.report.failures.len());
    }
    if let Some(path) = &args.trace {
        write_trace(path, &outcome.trace)?;
        info!(path = %path.display(), "trace written");
    }

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &outcome.report, args.format)
}

fn run_demo(format: OutputFormat) -> RunnerResult<()> {
    let mut source = MemorySource::demo();
    let outcome = decode_source(&mut source, &RunOptions::default())?;

    let stdout = std::io::stdout();
    write_demo(&mut stdout.lock(), &outcome.report, &parser_showcase(), format)
}

fn run_parse(lines: &[String]) -> RunnerResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        match prt7_protocol::parse_frame(line) {
            Ok(frame) => writeln!(out, "{} -> {:?}", line, frame)?,
            Err(e) => writeln!(out, "{} -> error: {}", line, e)?,
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Decode(args) => match resolve_config(&args) {
            Ok(config) => {
                init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));
                run_decode(args, config)
            }
            Err(e) => {
                init_logging(cli.log_level.as_deref().unwrap_or("info"));
                Err(e)
            }
        },
        Command::Demo { format } => {
            init_logging(cli.log_level.as_deref().unwrap_or("warn"));
            run_demo(format)
        }
        Command::Parse { lines } => {
            init_logging(cli.log_level.as_deref().unwrap_or("warn"));
            run_parse(&lines)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
