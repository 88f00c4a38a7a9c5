//! Command-line interface for replaying courier network scenarios.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod simulate;

pub use error::CliError;

use simulate::{SimulateArgs, run_simulate};

pub(crate) const ARG_SIMULATE_SCENARIO: &str = "scenario";
pub(crate) const ARG_SIMULATE_MAP: &str = "map";
pub(crate) const ARG_SIMULATE_START_CITY: &str = "start-city";
pub(crate) const ARG_SIMULATE_LOG: &str = "log";
pub(crate) const ARG_SIMULATE_BASIC_COURIERS: &str = "basic-couriers";
pub(crate) const ARG_SIMULATE_FIRST_CLASS_COURIERS: &str = "first-class-couriers";
pub(crate) const ARG_SIMULATE_BASIC_LIMIT: &str = "basic-limit";
pub(crate) const ARG_SIMULATE_FIRST_CLASS_LIMIT: &str = "first-class-limit";
pub(crate) const ENV_SIMULATE_SCENARIO: &str = "COURIER_CMDS_SIMULATE_SCENARIO";
pub(crate) const ENV_SIMULATE_MAP: &str = "COURIER_CMDS_SIMULATE_MAP";
pub(crate) const ENV_SIMULATE_START_CITY: &str = "COURIER_CMDS_SIMULATE_START_CITY";

/// Run the courier CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments cannot be parsed, inputs are missing
/// or malformed, or the report cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Simulate(args) => run_simulate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Courier network simulator for a post office fleet",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a scenario of receipts, time shifts and queries.
    Simulate(SimulateArgs),
}

#[cfg(test)]
mod tests;
