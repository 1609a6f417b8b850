//! High-level solver interface.

use std::fmt;

use eit_core::{CancelToken, Real, Timer};
use eit_graph::Graph;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::assembly::{ReducedSystem, conductances};
use crate::cg::{CgConfig, conjugate_gradient};
use crate::connectivity::unreachable_nodes;
use crate::direct::cholesky_solve;
use crate::error::{SolverError, SolverResult};
use crate::problem::BoundarySpec;
use crate::solution::SolveResult;

/// Linear solver used for the reduced system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveMethod {
    /// Sparse Cholesky factorization
    #[default]
    Direct,
    /// Jacobi-preconditioned conjugate gradient
    ConjugateGradient,
}

impl SolveMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveMethod::Direct => "direct",
            SolveMethod::ConjugateGradient => "conjugate_gradient",
        }
    }
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub method: SolveMethod,
    /// Relative residual tolerance (CG only)
    pub tolerance: Real,
    /// Iteration cap (CG only)
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let cg = CgConfig::default();
        Self {
            method: SolveMethod::Direct,
            tolerance: cg.tolerance,
            max_iterations: cg.max_iterations,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: format!("tolerance {} must be finite and > 0", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    fn cg(&self) -> CgConfig {
        CgConfig {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

/// Solve `graph` with `boundary` held fixed.
///
/// This function:
/// 1. Validates the boundary pair and configuration
/// 2. Rejects networks with nodes that cannot reach a fixed node
/// 3. Assembles the reduced Laplacian with Dirichlet elimination
/// 4. Solves it with the configured method
/// 5. Scatters voltages (fixed nodes get their exact values) and derives
///    edge currents
pub fn solve(graph: &Graph, boundary: &BoundarySpec, config: &SolverConfig) -> SolverResult<SolveResult> {
    solve_with_cancel(graph, boundary, config, &CancelToken::new())
}

/// [`solve`] with cooperative cancellation. The token is checked between
/// stages and on every CG iteration.
pub fn solve_with_cancel(
    graph: &Graph,
    boundary: &BoundarySpec,
    config: &SolverConfig,
    cancel: &CancelToken,
) -> SolverResult<SolveResult> {
    let timer = Timer::start("solve");
    boundary.validate(graph)?;
    config.validate()?;

    let unreachable = unreachable_nodes(graph, &boundary.fixed_nodes());
    if !unreachable.is_empty() {
        return Err(SolverError::DegenerateNetwork { nodes: unreachable });
    }
    check_cancel(cancel, "assembly")?;

    let conductances = conductances(graph);
    let system = ReducedSystem::assemble(graph, boundary, &conductances);
    debug!(
        unknowns = system.dim(),
        nnz = system.matrix().nnz(),
        "assembled reduced system"
    );
    check_cancel(cancel, "linear solve")?;

    let (free_voltages, iterations, residual) = match config.method {
        SolveMethod::Direct => {
            let x = cholesky_solve(&system)?;
            let residual = system.relative_residual(&x);
            (x, 0, residual)
        }
        SolveMethod::ConjugateGradient => {
            let result = conjugate_gradient(&system, &config.cg(), cancel)?;
            (result.x, result.iterations, result.residual)
        }
    };

    if let Some(bad) = free_voltages.iter().position(|v| !v.is_finite()) {
        return Err(SolverError::Numeric {
            what: format!(
                "non-finite voltage at node {}",
                system.free_nodes()[bad]
            ),
        });
    }

    let mut voltages = vec![0.0; graph.node_count()];
    for (node, v) in system.free_nodes().iter().zip(&free_voltages) {
        voltages[node.idx()] = *v;
    }
    voltages[boundary.ground.idx()] = 0.0;
    voltages[boundary.reference.idx()] = boundary.reference_voltage;

    let currents: Vec<Real> = graph
        .edges()
        .par_iter()
        .zip(conductances.par_iter())
        .map(|(edge, g)| g * (voltages[edge.a.idx()] - voltages[edge.b.idx()]))
        .collect();

    info!(
        method = %config.method,
        nodes = graph.node_count(),
        unknowns = system.dim(),
        iterations,
        residual,
        elapsed_s = timer.stop(),
        "network solved"
    );

    Ok(SolveResult {
        voltages,
        currents,
        ground: boundary.ground,
        reference: boundary.reference,
        reference_voltage: boundary.reference_voltage,
        method: config.method,
        iterations,
        residual,
    })
}

fn check_cancel(cancel: &CancelToken, stage: &'static str) -> SolverResult<()> {
    if cancel.is_cancelled() {
        Err(SolverError::Cancelled { stage })
    } else {
        Ok(())
    }
}
