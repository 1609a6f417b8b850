//! Error types for the eit-app service layer.

use std::path::PathBuf;

use eit_core::ErrorKind;

/// Application error type that wraps errors from the backend crates and
/// keeps their [`ErrorKind`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Graph construction failed: {0}")]
    Graph(#[from] eit_graph::GraphError),

    #[error("Solver error: {0}")]
    Solver(#[from] eit_solver::SolverError),

    #[error("Results error: {0}")]
    Results(#[from] eit_results::ResultsError),

    #[error("Configuration error: {0}")]
    Project(#[from] eit_project::ProjectError),

    #[error("Failed to read grid file: {path}")]
    GridRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid grid: {what}")]
    GridParse { what: String },

    #[error("Boundary selection failed: {what}")]
    Selection { what: String },

    #[error("Run cancelled during {stage}")]
    Cancelled { stage: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for eit-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Graph(err) => err.kind(),
            AppError::Solver(err) => err.kind(),
            AppError::Results(err) => err.kind(),
            AppError::Project(err) => err.kind(),
            AppError::GridRead { .. } | AppError::Io(_) => ErrorKind::Io,
            AppError::GridParse { .. } | AppError::Selection { .. } => ErrorKind::Construction,
            AppError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }
}
