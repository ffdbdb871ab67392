//! Command-line driver for the sort-matching engine.
//!
//! Usage: sortmatch <updates> <subscriptions> <dimensions> [OPTIONS]
//!
//! Generates a dataset of the requested shape, runs the matching, and exits
//! with 0 on success or the numeric code of the first error. Error messages
//! go to standard output.

use std::io;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use sortmatch::generate::{fixed_dataset, random_dataset};
use sortmatch::{
    sort_matching, BitMatrix, CombineMode, Dataset, MatchConfig, MatchError, ParallelMode, Result,
    SpaceValue, WidenMode,
};

#[derive(Parser)]
#[command(name = "sortmatch")]
#[command(version)]
#[command(about = "Sort-based multi-dimensional extent matching", long_about = None)]
struct Cli {
    /// Number of update extents to generate
    updates: usize,

    /// Number of subscription extents to generate
    subscriptions: usize,

    /// Number of dimensions of the problem
    dimensions: usize,

    /// Widen every extent by one increment so touching extents match
    #[arg(long)]
    superset: bool,

    /// Accumulate all dimensions into a single matrix (halves peak memory)
    #[arg(long)]
    low_memory: bool,

    /// Sweep dimensions on parallel threads with per-row locking
    #[arg(long)]
    threaded: bool,

    /// Print the result matrix to stdout
    #[arg(short, long)]
    verbose: bool,

    /// Generate the deterministic dataset instead of a random one
    #[arg(long)]
    fixed: bool,

    /// Seed for the random dataset (default: a fresh random seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Coordinate type of the space
    #[arg(long, value_enum, default_value = "f64")]
    space_type: SpaceType,

    /// Append the elapsed matching time to a report file
    #[arg(long)]
    timing: bool,

    /// Print matching statistics to stderr
    #[arg(long)]
    stats: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SpaceType {
    I32,
    I64,
    F32,
    F64,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let code = match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => MatchError::InvalidInput(String::new()).exit_code(),
            };
            let _ = error.print();
            process::exit(code);
        }
    };

    if let Err(error) = run(&cli) {
        println!("{error}");
        process::exit(error.exit_code());
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.updates == 0 {
        return Err(MatchError::InvalidInput(
            "not a valid number of update extents".into(),
        ));
    }
    if cli.subscriptions == 0 {
        return Err(MatchError::InvalidInput(
            "not a valid number of subscription extents".into(),
        ));
    }
    if cli.dimensions == 0 {
        return Err(MatchError::InvalidInput(
            "not a valid number of dimensions".into(),
        ));
    }

    match cli.space_type {
        SpaceType::I32 => run_matching::<i32>(cli),
        SpaceType::I64 => run_matching::<i64>(cli),
        SpaceType::F32 => run_matching::<f32>(cli),
        SpaceType::F64 => run_matching::<f64>(cli),
    }
}

fn run_matching<S: SpaceValue>(cli: &Cli) -> Result<()> {
    let data: Dataset<S> = if cli.fixed {
        fixed_dataset(cli.updates, cli.subscriptions, cli.dimensions)?
    } else {
        let seed = cli.seed.unwrap_or_else(rand::random);
        random_dataset(cli.updates, cli.subscriptions, cli.dimensions, seed)?
    };

    let config = MatchConfig {
        combine: if cli.low_memory {
            CombineMode::InPlace
        } else {
            CombineMode::TwoMatrix
        },
        parallel: if cli.threaded {
            ParallelMode::PerDimensionThread
        } else {
            ParallelMode::Sequential
        },
        widen: if cli.superset {
            WidenMode::Superset
        } else {
            WidenMode::Exact
        },
    };

    let start = Instant::now();
    let mut result = BitMatrix::new(data.updates.len(), data.subscriptions.len())?;
    sort_matching(&data, &config, &mut result)?;
    let elapsed = start.elapsed().as_secs_f64();

    if cli.stats {
        eprintln!(
            "Matched {} updates against {} subscriptions in {} dimensions ({:.6}s)",
            data.updates.len(),
            data.subscriptions.len(),
            data.dimensions,
            elapsed
        );
    }

    if cli.timing {
        append_timing_report(cli, elapsed)?;
    }

    if cli.verbose {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        result.write_rows(&mut handle)?;
    }

    Ok(())
}

/// Append one `<seconds>` line to `<progname>_<updates>_<subs>_<dims>.txt`
/// in the working directory.
fn append_timing_report(cli: &Cli, seconds: f64) -> Result<()> {
    use std::io::Write;

    let path = format!(
        "{}_{}_{}_{}.txt",
        program_name(),
        cli.updates,
        cli.subscriptions,
        cli.dimensions
    );
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let mut buffer = ryu::Buffer::new();
    file.write_all(buffer.format(seconds).as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

fn program_name() -> String {
    let arg0 = std::env::args().next().unwrap_or_default();
    Path::new(&arg0)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("sortmatch")
        .to_owned()
}
