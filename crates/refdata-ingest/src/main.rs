//! Refdata Ingest - reference data parsing tool

mod progress;

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use refdata_common::logging::{init_logging, LogConfig, LogLevel};
use refdata_ingest::formats::{association, bibliographic, file_listing, gene_reference};
use refdata_ingest::{drain, Encoding, FormatKind, IngestConfig, RecordFormat, RunSummary};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "refdata-ingest")]
#[command(author, version, about = "Reference data parsing tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a file end to end
    Parse(ParseArgs),

    /// List supported formats
    Formats,
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Input file layout
    #[arg(short, long)]
    format: FormatKind,

    /// Input file (plain or gzip)
    path: PathBuf,

    /// Input encoding (utf-8 or latin-1)
    #[arg(short, long)]
    encoding: Option<Encoding>,

    /// Stop after this many records
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print each record as a JSON line on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::for_app("refdata-ingest", log_level)
        .merge_env()
        .context("Invalid logging configuration")?;

    let _guard = init_logging(&log_config).context("Failed to initialize logging")?;

    match cli.command {
        Command::Parse(args) => {
            let mut config = IngestConfig::load().context("Invalid ingest configuration")?;
            if let Some(encoding) = args.encoding {
                config.encoding = encoding;
            }
            if let Some(limit) = args.limit {
                config.parse_limit = Some(limit);
            }
            config.validate().context("Invalid command line options")?;

            parse_file(&args, &config)?;
        },
        Command::Formats => list_formats(),
    }

    Ok(())
}

fn list_formats() {
    for kind in FormatKind::all() {
        println!("{:<16} {}", kind.as_str(), kind.description());
    }
}

fn parse_file(args: &ParseArgs, config: &IngestConfig) -> Result<()> {
    info!(format = %args.format, path = %args.path.display(), encoding = %config.encoding, "Parsing file");
    let started = Instant::now();

    let summary = match args.format {
        FormatKind::GeneReference => run(gene_reference::FORMAT, args, config),
        FormatKind::Bibliographic => run(bibliographic::FORMAT, args, config),
        FormatKind::FileListing => run(file_listing::FORMAT, args, config),
        FormatKind::Association => run(association::FORMAT, args, config),
    }
    .with_context(|| format!("Failed to parse {}", args.path.display()))?;

    info!(
        format = %args.format,
        records = summary.records,
        lines = summary.lines,
        truncated = summary.truncated,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Parsing complete"
    );
    Ok(())
}

fn run<T: Serialize>(
    format: RecordFormat<T>,
    args: &ParseArgs,
    config: &IngestConfig,
) -> Result<RunSummary> {
    let mut parser = format.open(&args.path, config.encoding)?;
    let spinner = progress::create_record_spinner(&file_label(&args.path))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut seen: u64 = 0;

    let summary = drain(&mut parser, config.parse_limit, |record| -> Result<()> {
        if args.json {
            serde_json::to_writer(&mut out, &record).context("Failed to serialize record")?;
            out.write_all(b"\n")?;
        }

        seen += 1;
        if seen % config.progress_interval == 0 {
            spinner.set_position(seen);
        }
        Ok(())
    })?;

    out.flush()?;
    spinner.finish_and_clear();
    parser.close();
    Ok(summary)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| format!("Parsing {}", name.to_string_lossy()))
        .unwrap_or_else(|| "Parsing".to_string())
}
