//! Error taxonomy for the solver core.
//!
//! `InvalidInput`, `InsufficientCards`, and `IllegalAction` are surfaced to
//! callers with enough context to identify the offending input; none of them
//! poison solver state. `InconsistentState` indicates a bug in the solver
//! itself and should abort the training iteration in progress.

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("insufficient cards: requested {requested}, {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },

    #[error("illegal action: {0}")]
    IllegalAction(String),

    #[error("inconsistent state: {0}")]
    InconsistentState(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;
