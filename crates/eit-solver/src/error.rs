//! Error types for solver operations.

use eit_core::{ErrorKind, NodeId, format_ids};
use thiserror::Error;

/// Errors that can occur while solving a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid boundary condition: {what}")]
    InvalidBoundary { what: String },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: String },

    #[error(
        "{} node(s) have no path to the ground or reference node: {}",
        .nodes.len(),
        format_ids(.nodes, 10)
    )]
    DegenerateNetwork { nodes: Vec<NodeId> },

    #[error(
        "Conjugate gradient did not converge after {iterations} iterations \
         (relative residual {residual:.3e}, tolerance {tolerance:.3e})"
    )]
    ConvergenceFailed {
        iterations: usize,
        residual: f64,
        tolerance: f64,
    },

    #[error("Factorization failed: {what}")]
    Factorization { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Solve cancelled during {stage}")]
    Cancelled { stage: &'static str },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolverError::InvalidBoundary { .. } => ErrorKind::Construction,
            SolverError::InvalidConfig { .. } => ErrorKind::Config,
            // A singular or indefinite reduced system means some part of the
            // network is not tied to a fixed potential.
            SolverError::DegenerateNetwork { .. }
            | SolverError::Factorization { .. }
            | SolverError::Numeric { .. } => ErrorKind::DegenerateNetwork,
            SolverError::ConvergenceFailed { .. } => ErrorKind::Convergence,
            SolverError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }
}
