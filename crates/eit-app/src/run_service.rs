//! Run execution service: build -> select -> solve -> assemble.

use std::time::{Duration, Instant};

use eit_core::{CancelToken, Real, Timer};
use eit_graph::{Graph, IntensityGrid, MeshParams, build_with};
use eit_project::{ProjectError, SimulationConfig, validate_config};
use eit_results::SolvedGraph;
use eit_solver::{BoundarySpec, SolveMethod, solve_with_cancel};
use tracing::{debug, info, warn};

use crate::boundary::{BoundaryPair, select_boundary};
use crate::compile::{mesh_params, solver_config};
use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};

/// Size summary of a built network.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStats {
    pub rows: usize,
    pub cols: usize,
    pub radius: Real,
    pub nodes: usize,
    pub edges: usize,
    pub boundary_nodes: usize,
}

impl GraphStats {
    pub fn of(graph: &Graph, radius: Real) -> Self {
        let (rows, cols) = graph.dims();
        Self {
            rows,
            cols,
            radius,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            boundary_nodes: graph.boundary_nodes().len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveSummary {
    pub method: SolveMethod,
    pub iterations: usize,
    pub residual: Real,
    /// Current entering at the reference node
    pub injected_current: Real,
    pub equivalent_resistance: Option<Real>,
}

/// Wall time per pipeline stage.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub build_time_s: f64,
    pub select_time_s: f64,
    pub solve_time_s: f64,
    pub assemble_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub name: String,
    pub solved: SolvedGraph,
    pub pair: BoundaryPair,
    pub reference_voltage: Real,
    pub stats: GraphStats,
    pub solve: SolveSummary,
    pub timing: RunTimingSummary,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

fn finish(timer: Timer) -> f64 {
    let label = timer.label();
    let elapsed_s = timer.stop();
    debug!(stage = label, elapsed_s, "stage finished");
    elapsed_s
}

/// Seconds to a `Duration`, saturating where the value does not fit.
fn timeout_duration(timeout_s: Real) -> Duration {
    Duration::try_from_secs_f64(timeout_s).unwrap_or(Duration::MAX)
}

fn check_cancel(cancel: &CancelToken, stage: &'static str) -> AppResult<()> {
    if cancel.is_cancelled() {
        Err(AppError::Cancelled { stage })
    } else {
        Ok(())
    }
}

/// Floor `grid` to the configured minimum intensity and build its network.
pub fn build_network(grid: &IntensityGrid, config: &SimulationConfig) -> AppResult<(Graph, MeshParams)> {
    let params = mesh_params(&config.mesh, grid.cols())?;
    let graph = build_with(&grid.floored(config.mesh.min_intensity), &params)?;
    Ok((graph, params))
}

/// Run the full pipeline on `grid`.
pub fn run(grid: &IntensityGrid, config: &SimulationConfig, cancel: &CancelToken) -> AppResult<RunResponse> {
    run_with_progress(grid, config, cancel, None)
}

/// Run the full pipeline and stream stage events.
///
/// A configured `solver.timeout_s` adds a deadline on top of `cancel`.
pub fn run_with_progress(
    grid: &IntensityGrid,
    config: &SimulationConfig,
    cancel: &CancelToken,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();
    validate_config(config).map_err(ProjectError::from)?;

    let cancel = match config.solver.timeout_s {
        Some(timeout_s) => {
            let limited = cancel.expiring_after(timeout_duration(timeout_s));
            if limited.deadline().is_none() {
                warn!(timeout_s, "solver timeout is too large to schedule; running without a deadline");
            }
            limited
        }
        None => cancel.clone(),
    };

    emit_progress(
        &mut progress_cb,
        RunStage::BuildingGraph,
        started,
        Some(format!("Building network for {}x{} grid", grid.rows(), grid.cols())),
    );
    check_cancel(&cancel, "graph construction")?;
    let timer = Timer::start("build");
    let (graph, params) = build_network(grid, config)?;
    let stats = GraphStats::of(&graph, params.radius);
    timing.build_time_s = finish(timer);

    emit_progress(
        &mut progress_cb,
        RunStage::SelectingBoundary,
        started,
        Some(format!("{} boundary nodes", stats.boundary_nodes)),
    );
    check_cancel(&cancel, "boundary selection")?;
    let timer = Timer::start("select");
    let pair = select_boundary(&graph, config.excitation.selection.into())?;
    timing.select_time_s = finish(timer);

    emit_progress(
        &mut progress_cb,
        RunStage::Solving,
        started,
        Some(format!("ground {}, reference {}", pair.ground, pair.reference)),
    );
    let timer = Timer::start("solve");
    let bc = BoundarySpec::new(pair.ground, pair.reference, config.excitation.reference_voltage);
    let result = solve_with_cancel(&graph, &bc, &solver_config(&config.solver), &cancel)?;
    timing.solve_time_s = finish(timer);

    emit_progress(&mut progress_cb, RunStage::Assembling, started, None);
    check_cancel(&cancel, "result assembly")?;
    let timer = Timer::start("assemble");
    let solved = eit_results::assemble(&graph, &result)?;
    timing.assemble_time_s = finish(timer);

    let solve = SolveSummary {
        method: result.method,
        iterations: result.iterations,
        residual: result.residual,
        injected_current: result.injected_current(&graph),
        equivalent_resistance: result.equivalent_resistance(&graph),
    };
    timing.total_time_s = started.elapsed().as_secs_f64();

    info!(
        name = %config.name,
        nodes = stats.nodes,
        edges = stats.edges,
        ground = %pair.ground,
        reference = %pair.reference,
        total_time_s = timing.total_time_s,
        "run completed"
    );
    emit_progress(
        &mut progress_cb,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
    );

    Ok(RunResponse {
        name: config.name.clone(),
        solved,
        pair,
        reference_voltage: config.excitation.reference_voltage,
        stats,
        solve,
        timing,
    })
}
