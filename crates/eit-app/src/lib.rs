//! Shared application service layer for the EIT forward simulator.
//!
//! This crate turns a configuration and an intensity grid into a solved
//! network for the CLI: grid loading, boundary-pair selection, config
//! compilation and the staged run pipeline with progress reporting.

pub mod boundary;
pub mod compile;
pub mod error;
pub mod grid_io;
pub mod progress;
pub mod run_service;

// Re-export key types for convenience
pub use boundary::{BoundaryPair, BoundarySelection, select_boundary};
pub use compile::{mesh_params, solver_config};
pub use error::{AppError, AppResult};
pub use grid_io::{load_grid, parse_grid_json, parse_grid_text};
pub use progress::{RunProgressEvent, RunStage};
pub use run_service::{
    GraphStats, RunResponse, RunTimingSummary, SolveSummary, build_network, run, run_with_progress,
};
