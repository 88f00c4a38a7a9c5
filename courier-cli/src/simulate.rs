//! Simulate command implementation for the courier CLI.

use std::io::{BufReader, Write};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_core::{ClassConfig, CourierClass, Day, Distance, FleetConfig, PackageId, StatusChange};
use courier_fs::open_utf8_file;
use courier_service::{DeliveryService, PackageReport, Quote, ServiceError, Tariff, load_map};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_SIMULATE_BASIC_COURIERS, ARG_SIMULATE_BASIC_LIMIT, ARG_SIMULATE_FIRST_CLASS_COURIERS,
    ARG_SIMULATE_FIRST_CLASS_LIMIT, ARG_SIMULATE_LOG, ARG_SIMULATE_MAP, ARG_SIMULATE_SCENARIO,
    ARG_SIMULATE_START_CITY, CliError, ENV_SIMULATE_MAP, ENV_SIMULATE_SCENARIO,
    ENV_SIMULATE_START_CITY,
};

/// Event log written when no `--log` is given.
pub(crate) const DEFAULT_LOG: &str = "deliveries.log";

/// CLI arguments for the `simulate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Replay a JSON scenario of post receipts, time shifts and \
                 package queries against a fleet placed on a road map. Every \
                 status change is appended to the event log and the outcome \
                 of each step is printed as JSON.",
    about = "Replay a delivery scenario"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct SimulateArgs {
    /// Path to a JSON file containing the scenario steps.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) scenario: Option<Utf8PathBuf>,
    /// Road map with one `cityA cityB distance` entry per line.
    #[arg(long = ARG_SIMULATE_MAP, value_name = "path")]
    #[serde(default)]
    pub(crate) map: Option<Utf8PathBuf>,
    /// City every courier starts from.
    #[arg(long = ARG_SIMULATE_START_CITY, value_name = "name")]
    #[serde(default)]
    pub(crate) start_city: Option<String>,
    /// Event log path; truncated at start.
    #[arg(long = ARG_SIMULATE_LOG, value_name = "path")]
    #[serde(default)]
    pub(crate) log: Option<Utf8PathBuf>,
    /// Number of basic couriers.
    #[arg(long = ARG_SIMULATE_BASIC_COURIERS, value_name = "count")]
    #[serde(default)]
    pub(crate) basic_couriers: Option<usize>,
    /// Number of first-class couriers.
    #[arg(long = ARG_SIMULATE_FIRST_CLASS_COURIERS, value_name = "count")]
    #[serde(default)]
    pub(crate) first_class_couriers: Option<usize>,
    /// Distance a basic courier covers per day.
    #[arg(long = ARG_SIMULATE_BASIC_LIMIT, value_name = "km")]
    #[serde(default)]
    pub(crate) basic_limit: Option<Distance>,
    /// Distance a first-class courier covers per day.
    #[arg(long = ARG_SIMULATE_FIRST_CLASS_LIMIT, value_name = "km")]
    #[serde(default)]
    pub(crate) first_class_limit: Option<Distance>,
}

impl SimulateArgs {
    pub(crate) fn into_config(self) -> Result<SimulateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SimulateConfig::try_from(merged)
    }
}

/// Resolved `simulate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SimulateConfig {
    /// Path to the JSON scenario.
    pub(crate) scenario: Utf8PathBuf,
    /// Path to the road map.
    pub(crate) map: Utf8PathBuf,
    /// Path to the event log.
    pub(crate) log: Utf8PathBuf,
    /// Fleet layout.
    pub(crate) fleet: FleetConfig,
}

impl SimulateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.scenario, ARG_SIMULATE_SCENARIO)?;
        Self::require_existing(&self.map, ARG_SIMULATE_MAP)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match courier_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SimulateArgs> for SimulateConfig {
    type Error = CliError;

    fn try_from(args: SimulateArgs) -> Result<Self, Self::Error> {
        let scenario = args.scenario.ok_or(CliError::MissingArgument {
            field: ARG_SIMULATE_SCENARIO,
            env: ENV_SIMULATE_SCENARIO,
        })?;
        let map = args.map.ok_or(CliError::MissingArgument {
            field: ARG_SIMULATE_MAP,
            env: ENV_SIMULATE_MAP,
        })?;
        let start_city = args.start_city.ok_or(CliError::MissingArgument {
            field: ARG_SIMULATE_START_CITY,
            env: ENV_SIMULATE_START_CITY,
        })?;
        let log = args.log.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_LOG));

        let fleet = FleetConfig::new(start_city)
            .with_basic(class_config(
                CourierClass::Basic,
                args.basic_couriers,
                args.basic_limit,
            ))
            .with_first_class(class_config(
                CourierClass::FirstClass,
                args.first_class_couriers,
                args.first_class_limit,
            ));

        Ok(Self {
            scenario,
            map,
            log,
            fleet,
        })
    }
}

fn class_config(
    class: CourierClass,
    couriers: Option<usize>,
    daily_limit: Option<Distance>,
) -> ClassConfig {
    let defaults = ClassConfig::default_for(class);
    ClassConfig::new(
        couriers.unwrap_or(defaults.couriers),
        daily_limit.unwrap_or(defaults.daily_limit),
    )
}

/// A recorded sequence of front-desk requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct Scenario {
    pub(crate) steps: Vec<Step>,
}

/// One request replayed against the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum Step {
    /// Post receipt in `source,destination,weight,class` form.
    Send(String),
    /// Number of days to advance.
    Shift(i64),
    /// Package id to report on.
    Query(PackageId),
}

/// Outcome of replaying a whole scenario.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SimulationReport {
    pub(crate) final_day: Day,
    pub(crate) steps: Vec<StepReport>,
}

/// Outcome of one step.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub(crate) enum StepReport {
    Sent {
        receipt: String,
        quote: Quote,
    },
    Shifted {
        days: i64,
        day: Day,
        changes: Vec<StatusChange>,
    },
    Queried {
        report: PackageReport,
    },
    Rejected {
        step: Step,
        error: String,
    },
}

pub(super) fn run_simulate(args: SimulateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_simulate_with(args, &mut stdout)
}

pub(super) fn run_simulate_with(
    args: SimulateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_simulate(args)?;
    write_simulation_report(writer, &report)
}

fn execute_simulate(args: SimulateArgs) -> Result<SimulationReport, CliError> {
    let config = resolve_simulate_config(args)?;
    let scenario = load_scenario(&config.scenario)?;
    let graph = Arc::new(load_map(&config.map)?);
    let mut service =
        DeliveryService::with_log_file(graph, &config.fleet, Tariff::default(), &config.log)?;
    replay(&mut service, &scenario.steps)
}

fn resolve_simulate_config(args: SimulateArgs) -> Result<SimulateConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`Scenario`] from disk.
pub(super) fn load_scenario(path: &Utf8Path) -> Result<Scenario, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenScenario {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseScenario {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply `steps` in order.
///
/// Rejected requests are reported and the replay carries on; failures that
/// leave the service unusable stop it.
pub(super) fn replay<W: Write>(
    service: &mut DeliveryService<W>,
    steps: &[Step],
) -> Result<SimulationReport, CliError> {
    let mut reports = Vec::with_capacity(steps.len());
    for step in steps {
        match apply_step(service, step) {
            Ok(report) => reports.push(report),
            Err(err) if err.is_rejection() => reports.push(StepReport::Rejected {
                step: step.clone(),
                error: err.to_string(),
            }),
            Err(err) => return Err(CliError::Service(err)),
        }
    }
    Ok(SimulationReport {
        final_day: service.day(),
        steps: reports,
    })
}

fn apply_step<W: Write>(
    service: &mut DeliveryService<W>,
    step: &Step,
) -> Result<StepReport, ServiceError> {
    match step {
        Step::Send(receipt) => {
            let quote = service.send_receipt(receipt)?;
            Ok(StepReport::Sent {
                receipt: receipt.clone(),
                quote,
            })
        }
        Step::Shift(days) => {
            let changes = service.shift_time(*days)?;
            Ok(StepReport::Shifted {
                days: *days,
                day: service.day(),
                changes,
            })
        }
        Step::Query(id) => Ok(StepReport::Queried {
            report: service.package_report(*id)?,
        }),
    }
}

fn write_simulation_report(
    writer: &mut dyn Write,
    report: &SimulationReport,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerializeReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SimulateConfig, CliError> {
    let merged = SimulateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SimulateConfig::try_from(merged)
}
