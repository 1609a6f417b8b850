//! Configuration -> runtime parameter conversion.

use eit_graph::MeshParams;
use eit_project::{MeshDef, SolverDef, SolverMethodDef};
use eit_solver::{SolveMethod, SolverConfig};

use crate::error::AppResult;

/// Mesh parameters for a grid with `cols` columns.
pub fn mesh_params(mesh: &MeshDef, cols: usize) -> AppResult<MeshParams> {
    Ok(MeshParams::new(
        mesh.radius_for(cols),
        mesh.min_resistance,
        mesh.max_resistance,
    )?)
}

pub fn solver_config(solver: &SolverDef) -> SolverConfig {
    SolverConfig {
        method: match solver.method {
            SolverMethodDef::Direct => SolveMethod::Direct,
            SolverMethodDef::ConjugateGradient => SolveMethod::ConjugateGradient,
        },
        tolerance: solver.tolerance,
        max_iterations: solver.max_iterations,
    }
}
