//! AOC CLI - runs the registered Advent of Code solvers on local puzzle input

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Link the solver plugins
use aoc_2023 as _;

use aggregator::ResultAggregator;
use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError};
use executor::{Executor, WorkItem};
use inputs::{InputStore, Inputs};
use log::{info, warn};
use output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    init_logging(&config);

    let registry = build_registry(&config.tags)?;

    let inputs = match &config.input {
        Some(source) => Inputs::Preloaded(source.read()?),
        None => Inputs::Directory(InputStore::new(config.input_dir.clone())),
    };

    let executor = Executor::new(registry, inputs, &config).map_err(ArcExecutorError::from)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    if config.input.is_none() {
        warn_missing_inputs(&work_items, &InputStore::new(config.input_dir.clone()));
    }

    run_executor(executor, work_items, config.quiet)
}

fn init_logging(config: &Config) {
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

/// Missing files still produce an error line per part; this just says so up front.
fn warn_missing_inputs(work_items: &[WorkItem], store: &InputStore) {
    let missing: Vec<_> = work_items
        .iter()
        .filter(|w| !store.contains(w.year, w.day))
        .collect();
    if !missing.is_empty() {
        warn!("missing {} input file(s):", missing.len());
        for w in missing {
            warn!("  - {}", store.path(w.year, w.day).display());
        }
    }
}

fn run_executor(
    executor: Executor,
    work_items: Vec<WorkItem>,
    quiet: bool,
) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::for_work(&work_items);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.push(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    if !aggregator.is_complete() {
        let leftovers = aggregator.finish();
        for key in &leftovers.missing {
            warn!("no result for {}/{:02} part {}", key.year, key.day, key.part);
        }
        for ready in leftovers.results {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);

    let failed = results.iter().filter(|r| r.answer.is_err()).count();
    info!("{} of {} part(s) solved", results.len() - failed, results.len());
    if failed > 0 {
        return Err(CliError::SolversFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

/// Keeps solvers carrying every requested tag
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
