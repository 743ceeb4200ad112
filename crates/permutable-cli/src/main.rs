mod demo;
mod logging;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use permutable_core::Error as CoreError;
use permutable_generate::{DocumentError, GenerateOptions, SchemaDocument, document_json_schema};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
    #[error("generation error: {0}")]
    Generation(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "permutable", version, about = "Permutable CLI")]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every permutation of the built-in Foo record.
    Demo,
    /// Print every permutation of a record declared in a schema document.
    Generate(GenerateArgs),
    /// Print how many records a schema document produces.
    Count(CountArgs),
    /// Print the JSON Schema for schema documents.
    JsonSchema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Schema document (.json or .toml).
    #[arg(value_name = "FILE")]
    path: PathBuf,
    /// Stop after this many records.
    #[arg(long)]
    limit: Option<u64>,
    /// Output format, one record per line.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct CountArgs {
    /// Schema document (.json or .toml).
    #[arg(value_name = "FILE")]
    path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json)?;

    match cli.command {
        Command::Demo => run_demo(),
        Command::Generate(args) => run_generate(args),
        Command::Count(args) => run_count(args),
        Command::JsonSchema => run_json_schema(),
    }
}

fn run_demo() -> Result<(), CliError> {
    let timer = Instant::now();
    let mut out = BufWriter::new(io::stdout().lock());
    let records = demo::write_demo(&mut out)?;
    out.flush()?;

    tracing::info!(
        event = "demo_finished",
        records,
        duration_ms = timer.elapsed().as_millis()
    );
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        path,
        limit,
        format,
    } = args;

    let timer = Instant::now();
    let document = SchemaDocument::from_path(&path)?;
    let schema = Arc::new(document.to_schema()?);
    let options = GenerateOptions { limit };

    tracing::info!(
        event = "generation_started",
        schema = %schema.name(),
        fields = schema.fields().len(),
        expected = ?schema.expected_count(),
        limit = ?options.limit
    );

    let mut out = BufWriter::new(io::stdout().lock());
    let mut written = 0_u64;
    for record in schema.permutations().take(options.max_records()) {
        let record = record?;
        match format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
            }
            OutputFormat::Text => writeln!(out, "{record}")?,
        }
        written += 1;
    }
    out.flush()?;

    tracing::info!(
        event = "generation_finished",
        records = written,
        duration_ms = timer.elapsed().as_millis()
    );
    Ok(())
}

fn run_count(args: CountArgs) -> Result<(), CliError> {
    let document = SchemaDocument::from_path(&args.path)?;
    let schema = document.to_schema()?;

    let mut out = io::stdout().lock();
    match schema.expected_count() {
        Some(count) => writeln!(out, "{count}")?,
        None => writeln!(out, "more than {}", u64::MAX)?,
    }
    Ok(())
}

fn run_json_schema() -> Result<(), CliError> {
    let schema = serde_json::to_string_pretty(&document_json_schema())?;
    writeln!(io::stdout().lock(), "{schema}")?;
    Ok(())
}
