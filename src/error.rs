use thiserror::Error;

/// The two error kinds that are surfaced to the caller rather than encoded
/// as a [`crate::config::SolveResponse`] status. `Infeasible` and `Timeout`
/// are deliberately absent here: per the propagation policy they are
/// structured response values, not exceptional flow.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("data error: {0}")]
    DataError(String),

    #[error("internal solver error: {0}")]
    InternalError(String),
}
