//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::Inputs;
use aoc_solver::{DynSolver, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Absent when the input never parsed
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// A registered solver and the parts to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    shared: SharedExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// Everything the worker threads read
struct SharedExecutorConfig {
    registry: SolverRegistry,
    inputs: Inputs,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(
        registry: SolverRegistry,
        inputs: Inputs,
        config: &Config,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: SharedExecutorConfig {
                registry,
                inputs,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Registered solvers matching the filters, in (year, day) order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.shared;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .filter_map(|info| {
                filter_parts(cfg.part_filter, info.parts).map(|parts| WorkItem {
                    year: info.year,
                    day: info.day,
                    parts,
                })
            })
            .collect()
    }

    /// Runs every work item and sends one result per part to `tx`.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        info!(
            "running {} solver(s) on {} thread(s), parallelized by {:?}",
            work_items.len(),
            self.thread_pool.current_num_threads(),
            self.shared.parallelize_by
        );

        match self.shared.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.shared) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.execute_grouped(by_year, &tx)
            }
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singletons = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_grouped(singletons, &tx)
            }
        }
    }

    /// One pool task per group; items inside a group run in order.
    fn execute_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, shared) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                    (a, b) => a.or(b),
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts to run for a solver with `max_parts` parts, or `None` if the filter excludes them all.
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> Option<RangeInclusive<u8>> {
    match part_filter {
        Some(p) if (1..=max_parts).contains(&p) => Some(p..=p),
        Some(_) => None,
        None => (max_parts > 0).then_some(1..=max_parts),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Sends the same error as the result of every part of `work`.
fn send_failed(
    tx: &Sender<SolverResult>,
    work: &WorkItem,
    error: ArcExecutorError,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
    }
    Ok(())
}

/// Loads the input for one year/day and solves its parts.
///
/// Missing input and parse failures become error results, so only a closed channel makes
/// this return `Err`.
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &SharedExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let input = match shared.inputs.get(year, day) {
        Ok(input) => input,
        Err(source) => {
            info!("skipping {}/{:02}: {}", year, day, source);
            return send_failed(tx, work, ExecutorError::Input { year, day, source }.into());
        }
    };

    if matches!(shared.parallelize_by, ParallelizeBy::Part) {
        work.parts
            .clone()
            .into_par_iter()
            .map_with(tx.clone(), |tx, part| {
                // Each part parses on its own so the parts share nothing.
                let result = match shared.registry.create_solver(year, day, &input) {
                    Ok(mut solver) => solve_part(year, day, part, &mut *solver),
                    Err(e) => SolverResult::failed(year, day, part, ExecutorError::Solver(e).into()),
                };
                send(tx, result)
            })
            .collect::<Result<(), _>>()
    } else {
        let mut solver = match shared.registry.create_solver(year, day, &input) {
            Ok(solver) => solver,
            Err(e) => return send_failed(tx, work, ExecutorError::Solver(e).into()),
        };
        debug!(
            "parsed {}/{:02} in {}µs",
            year,
            day,
            solver.parse_duration().num_microseconds().unwrap_or(i64::MAX)
        );
        for part in work.parts.clone() {
            send(tx, solve_part(year, day, part, &mut *solver))?;
        }
        Ok(())
    }
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(year, day, part, ExecutorError::Solver(SolverError::Solve(e)).into())
        },
    }
}
