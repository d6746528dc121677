use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use cnf_primal::{
    interrupt::StopFlag,
    io::ClauseLines,
    pipeline::{self, Config},
    Error,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Writes the primal graph of a DIMACS CNF formula (variables adjacent iff
/// they occur positively in a common clause) as `<FILE>.gr.bz2`.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Input formula, optionally compressed (.gz, .bz2, .xz)
    #[arg(short = 'f', long = "file", value_parser = existing_file)]
    instance: PathBuf,

    /// Output path instead of <FILE>.gr.bz2
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Let clauses continue over line breaks instead of dropping unterminated lines
    #[arg(long)]
    join_lines: bool,

    /// Bzip2 compression level
    #[arg(short, long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(1..=9))]
    level: u32,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn existing_file(arg: &str) -> Result<PathBuf, Error> {
    if arg.is_empty() {
        return Err(Error::InvalidArgument("missing file".to_string()));
    }
    let path = PathBuf::from(arg);
    path.canonicalize()
        .map_err(|_| Error::MissingFile(path.clone()))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: &Args, stop: &StopFlag) -> anyhow::Result<()> {
    let config = Config {
        clause_lines: if args.join_lines {
            ClauseLines::Continued
        } else {
            ClauseLines::Terminated
        },
        level: args.level,
        output: args.output.clone(),
    };

    let summary =
        pipeline::convert(&args.instance, &config, stop).context("conversion failed")?;
    info!(
        output = %summary.output.display(),
        clauses = summary.clause_count,
        nodes = summary.node_count,
        edges = summary.edge_count,
        "done"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let stop = StopFlag::new();
    let handler = stop.clone();
    if let Err(err) = ctrlc::set_handler(move || handler.raise()) {
        warn!("cannot install signal handler: {err}");
    }

    match run(&args, &stop) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if matches!(err.downcast_ref::<Error>(), Some(Error::Interrupted)) => {
            warn!("received external interrupt signal, exiting without output");
            ExitCode::from(130)
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
