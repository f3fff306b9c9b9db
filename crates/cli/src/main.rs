mod analytic;
mod config;
mod logging;

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use tbsweep::{
    SimulationInput, StudyError, StudyPlan, SweepResult, TimeLimited,
    report::{Dedup, DeviationTable, EndpointSummary},
    sweep::{Config, Execution},
};
use tbsweep_core::Model;
use tbsweep_observers::{SkipFailures, TracingObserver};

use crate::{analytic::AnalyticModel, config::StudyConfig, logging::init_logging};

#[derive(Parser, Debug)]
#[command(name = "tbsweep")]
#[command(about = "Parameter sensitivity study of the mean 21cm brightness temperature")]
struct Args {
    /// Study file (TOML); the reference study is used without one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Evaluate the redshifts of each series in parallel
    #[arg(long)]
    parallel: bool,

    /// Fail any simulation call that runs longer than this
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Skip axis values whose series fail instead of aborting
    #[arg(long)]
    skip_failures: bool,

    /// Write the full result, deviations and summary as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Cells along each side of the simulated box
    #[arg(long, value_name = "N")]
    box_cells: Option<u32>,

    /// Seed of the simulated density field
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(&self, config: &mut StudyConfig) {
        if self.parallel {
            config.run.execution = Execution::Parallel;
        }
        if self.timeout_secs.is_some() {
            config.run.timeout_secs = self.timeout_secs;
        }
        if self.skip_failures {
            config.run.skip_failures = true;
        }
        if let Some(box_cells) = self.box_cells {
            config.simulation.box_cells = box_cells;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    result: &'a SweepResult,
    deviations: &'a DeviationTable,
    summary: &'a EndpointSummary,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut config = match &args.config {
        Some(path) => StudyConfig::load(path)?,
        None => StudyConfig::default(),
    };
    args.apply(&mut config);

    let plan = config.plan()?;
    let model = AnalyticModel::new(config.simulation.box_cells, config.simulation.seed)?;
    let sweep_config = Config::new(config.run.execution);

    tracing::info!(
        redshifts = plan.grid.len(),
        axes = plan.axes.len(),
        evaluations = plan.evaluations(),
        cells = model.cells(),
        execution = ?config.run.execution,
        "starting study"
    );

    let result = match config.run.timeout() {
        Some(limit) => run(
            &TimeLimited::new(model, limit),
            &plan,
            &sweep_config,
            config.run.skip_failures,
        ),
        None => run(&model, &plan, &sweep_config, config.run.skip_failures),
    }?;

    report(&result, config.run.dedup, args.json.as_deref())
}

fn run<M>(
    model: &M,
    plan: &StudyPlan,
    config: &Config,
    skip_failures: bool,
) -> Result<SweepResult, StudyError>
where
    M: Model<Input = SimulationInput> + Sync,
    M::Output: AsRef<[f64]>,
{
    let progress = TracingObserver::new();
    if skip_failures {
        plan.run(model, config, SkipFailures::wrap(progress))
    } else {
        plan.run(model, config, progress)
    }
}

fn report(result: &SweepResult, dedup: Dedup, json: Option<&Path>) -> Result<()> {
    for axis in result.axes() {
        for skipped in axis.skipped() {
            tracing::warn!(
                parameter = %axis.parameter(),
                value = skipped.value,
                reason = %skipped.reason,
                "axis value missing from the report"
            );
        }
    }

    let deviations = DeviationTable::new(result, dedup)?;
    let summary = EndpointSummary::new(result, dedup)?;
    println!("{summary}");

    if let Some(path) = json {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(
            BufWriter::new(file),
            &JsonReport {
                result,
                deviations: &deviations,
                summary: &summary,
            },
        )?;
        tracing::info!(path = %path.display(), "wrote JSON report");
    }

    Ok(())
}
