//! Sparse Cholesky solve of the reduced system.

use eit_core::Real;
use nalgebra::DMatrix;
use nalgebra_sparse::factorization::CscCholesky;

use crate::assembly::ReducedSystem;
use crate::error::{SolverError, SolverResult};

/// Factor the reduced Laplacian and solve for the free-node voltages.
///
/// Deterministic: the same system always yields bit-identical voltages.
pub fn cholesky_solve(system: &ReducedSystem) -> SolverResult<Vec<Real>> {
    let n = system.dim();
    if n == 0 {
        return Ok(Vec::new());
    }

    let factor = CscCholesky::factor(&system.to_csc()).map_err(|err| SolverError::Factorization {
        what: format!("{err} ({n} unknowns)"),
    })?;
    let rhs = DMatrix::from_column_slice(n, 1, system.rhs());
    let x = factor.solve(&rhs);
    Ok(x.column(0).iter().copied().collect())
}
