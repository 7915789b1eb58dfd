//! Wires the five pipeline stages into the single entry point
//! `solve(SolveRequest) -> SolveResponse`.

use log::warn;

use crate::ai::SuggestionAdvisor;
use crate::builder;
use crate::config::{ConstraintConfig, Metrics, SolveRequest, SolveResponse, Status};
use crate::diagnostics;
use crate::error::SolverError;
use crate::extractor;
use crate::metrics;
use crate::repository::Repository;
use crate::solver::{self, CancellationToken, DriverOutcome};

/// Runs one full solve: load -> build -> drive -> extract -> metrics ->
/// (diagnose on failure) -> persist on success.
///
/// `DataError` and `InternalError` are returned as `Err` -- exceptional
/// flow, surfaced to the caller -- while `Infeasible` and `Timeout` are
/// represented as `Ok(SolveResponse { status, .. })` values.
pub fn solve(
    repo: &dyn Repository,
    request: SolveRequest,
    advisor: &dyn SuggestionAdvisor,
    cancel: &CancellationToken,
) -> Result<SolveResponse, SolverError> {
    if request.time_budget_ms == 0 {
        return Err(SolverError::DataError(
            "time_budget_ms must be greater than zero".to_string(),
        ));
    }

    let classrooms = repo.load_classrooms()?;
    let faculty = repo.load_faculty()?;
    let subjects = repo.load_subjects()?;
    let batches = repo.load_batches(&request.batch_ids)?;

    let constraints: &ConstraintConfig = &request.constraints;
    let built = builder::build(&batches, &classrooms, &faculty, &subjects, constraints)?;

    let outcome = solver::drive(
        built,
        request.time_budget_ms,
        request.worker_count,
        request.seed,
        cancel,
    )?;

    let response = match outcome {
        DriverOutcome::Optimal(chosen) | DriverOutcome::Feasible(chosen) => {
            let raw = extractor::extract(&chosen);
            let computed_metrics = metrics::compute(&raw, &classrooms, &faculty);
            let assignments = extractor::to_assignments(&raw);
            let mut response = SolveResponse {
                status: Status::Success,
                assignments,
                metrics: computed_metrics,
                conflicts: Vec::new(),
                suggestions: Vec::new(),
            };
            if request.use_ai_suggestions {
                response.suggestions = advisor.suggest(&response);
            }
            repo.persist_timetable(&response.assignments)?;
            response
        }
        DriverOutcome::Infeasible => {
            warn!("solver proved infeasibility; running diagnostic checks");
            SolveResponse {
                status: Status::Infeasible,
                assignments: Vec::new(),
                metrics: Metrics::default(),
                conflicts: diagnostics::analyze(&batches, &classrooms, &faculty, &subjects),
                suggestions: Vec::new(),
            }
        }
        DriverOutcome::Unknown => {
            warn!("solver exhausted its time budget with no incumbent; running diagnostic checks");
            SolveResponse {
                status: Status::Timeout,
                assignments: Vec::new(),
                metrics: Metrics::default(),
                conflicts: diagnostics::analyze(&batches, &classrooms, &faculty, &subjects),
                suggestions: Vec::new(),
            }
        }
    };

    Ok(response)
}
