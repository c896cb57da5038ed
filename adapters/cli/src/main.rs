#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Mars Rover mission from line-oriented input.

mod mission;
mod parse;
mod report;

use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::mission::MissionConfig;

/// Simulates rovers exploring a rectangular plateau.
///
/// The first input line holds the plateau size `M N`; every following line
/// holds one rover as `(x, y, O) MOVES`. A blank line ends the input.
#[derive(Debug, Parser)]
#[command(name = "mars-rover", version, about)]
struct Cli {
    /// Mission file to read instead of standard input.
    input: Option<PathBuf>,
    /// Print the mission banner before the rover reports.
    #[arg(long)]
    banner: bool,
    /// Increase log verbosity on stderr (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the Mars Rover command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = MissionConfig { banner: cli.banner };
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open mission file {}", path.display()))?;
            mission::run(BufReader::new(file), &mut output, config)
        }
        None => mission::run(io::stdin().lock(), &mut output, config),
    }?;
    output.flush().context("failed to flush rover reports")?;

    log::info!(
        "mission complete: {} rover(s) reported, {} lost",
        summary.rovers,
        summary.lost
    );
    if summary.rejected_moves > 0 {
        log::warn!("{} move request(s) were rejected", summary.rejected_moves);
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
