use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use slotmem_reader::{
    Schema,
    avec::{self, Options, reader::ReaderSource},
    output::{write_footer, write_record},
    sans::header::HEADER_WIDTH,
};
use thiserror::Error;
use tracing::{Level, debug};

#[derive(Parser)]
#[command(
    name = "slotmem-reader",
    about = "Print the records held in a mod_cluster slotmem file",
    version,
    long_about = "Print the records held in a mod_cluster slotmem file, such as \
                  HTTPD_DIR/cache/mod_cluster/manager.node.nodes.slotmem. The table \
                  layout is chosen from the file name unless --table is given."
)]
struct Cli {
    /// Path to the slotmem file
    path: PathBuf,

    /// Table layout to apply instead of matching the file name
    #[arg(short, long, value_enum)]
    table: Option<TableKind>,

    /// Width in bytes of the table header written by the producing platform
    #[arg(long, env = "SLOTMEM_HEADER_WIDTH", default_value_t = HEADER_WIDTH)]
    header_width: usize,

    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum TableKind {
    Node,
    Balancer,
    Context,
    Domain,
    Host,
}

impl From<TableKind> for Schema {
    fn from(table: TableKind) -> Self {
        match table {
            TableKind::Node => Schema::Node,
            TableKind::Balancer => Schema::Balancer,
            TableKind::Context => Schema::Context,
            TableKind::Domain => Schema::Domain,
            TableKind::Host => Schema::Host,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Failures of a run, each with its own exit status.
#[derive(Debug, Error)]
enum Failure {
    #[error("Cannot open the file {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error(
        "The file {} is too short ({size} bytes). It most likely does not contain anything useful.",
        .path.display()
    )]
    TooShort { path: PathBuf, size: u64 },
    #[error("{source} Found {}.", .path.display())]
    UnrecognizedSchema {
        path: PathBuf,
        source: slotmem_reader::schema::UnrecognizedSchema,
    },
    #[error(
        "Cannot find the first record in {}. The header width may not match the platform that wrote it.",
        .path.display()
    )]
    AlignmentNotFound { path: PathBuf },
    #[error("Failed reading {}: {source}", .path.display())]
    Read { path: PathBuf, source: avec::Error },
    #[error("Failed writing output: {0}")]
    Output(#[from] io::Error),
}

impl Failure {
    fn exit_code(&self) -> u8 {
        match self {
            Failure::Output(_) => 1,
            Failure::Open { .. } => 3,
            Failure::TooShort { .. } => 4,
            Failure::UnrecognizedSchema { .. } => 5,
            Failure::AlignmentNotFound { .. } => 6,
            Failure::Read { .. } => 7,
        }
    }

    fn from_decode(path: &Path, err: avec::Error) -> Self {
        let path = path.to_path_buf();
        match err {
            avec::Error::TooShort { size } => Failure::TooShort { path, size },
            avec::Error::AlignmentNotFound => Failure::AlignmentNotFound { path },
            source => Failure::Read { path, source },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(count) => {
            debug!(count, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.exit_code();
            debug!(code, "failed");
            eprintln!("Error: {err}");
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> Result<usize, Failure> {
    let path = cli.path.as_path();

    let schema = match cli.table {
        Some(table) => Schema::from(table),
        None => Schema::from_path(&path.to_string_lossy()).map_err(|source| {
            Failure::UnrecognizedSchema {
                path: path.to_path_buf(),
                source,
            }
        })?,
    };
    debug!(?schema, path = %path.display(), "reading table");

    let source = ReaderSource::open(path).map_err(|source| Failure::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let options = Options {
        header_width: cli.header_width,
    };
    let table =
        avec::Table::open(source, schema, options).map_err(|err| Failure::from_decode(path, err))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut count = 0;

    for record in table {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                // Keep what was printed so far.
                out.flush()?;
                return Err(Failure::from_decode(path, err));
            }
        };
        write_record(&mut out, &record)?;
        count += 1;
    }

    write_footer(&mut out)?;
    out.flush()?;

    Ok(count)
}
