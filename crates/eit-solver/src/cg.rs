//! Jacobi-preconditioned conjugate gradient.

use eit_core::{CancelToken, Real, dot, norm2};
use tracing::{debug, warn};

use crate::assembly::ReducedSystem;
use crate::error::{SolverError, SolverResult};

/// Conjugate gradient configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CgConfig {
    /// Stop once `||r|| / ||b||` drops to this value.
    pub tolerance: Real,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for CgConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 10_000,
        }
    }
}

/// Conjugate gradient result.
#[derive(Debug, Clone)]
pub struct CgResult {
    /// Solution vector
    pub x: Vec<Real>,
    pub iterations: usize,
    /// Relative residual of the returned iterate
    pub residual: Real,
}

/// Solve `A x = b` for the reduced system, starting from `x = 0`.
///
/// The cancel token is polled once per iteration.
pub fn conjugate_gradient(
    system: &ReducedSystem,
    config: &CgConfig,
    cancel: &CancelToken,
) -> SolverResult<CgResult> {
    let n = system.dim();
    let b = system.rhs();
    let inv_diag: Vec<Real> = system.diagonal().iter().map(|d| 1.0 / d).collect();

    let mut x = vec![0.0; n];
    let b_norm = norm2(b);
    if b_norm == 0.0 {
        // Zero excitation: the zero start is exact.
        return Ok(CgResult {
            x,
            iterations: 0,
            residual: 0.0,
        });
    }

    let mut r = b.to_vec();
    let mut z: Vec<Real> = r.iter().zip(&inv_diag).map(|(r, m)| r * m).collect();
    let mut p = z.clone();
    let mut q = vec![0.0; n];
    let mut rz = dot(&r, &z);
    let mut residual = 1.0;

    for iteration in 1..=config.max_iterations {
        if cancel.is_cancelled() {
            return Err(SolverError::Cancelled {
                stage: "conjugate gradient",
            });
        }

        system.apply(&p, &mut q);
        let pq = dot(&p, &q);
        if !(pq.is_finite() && pq > 0.0) {
            return Err(SolverError::Numeric {
                what: format!("search direction lost positive curvature at iteration {iteration} (p'Ap = {pq})"),
            });
        }
        let alpha = rz / pq;

        for ((xi, ri), (pi, qi)) in x.iter_mut().zip(r.iter_mut()).zip(p.iter().zip(&q)) {
            *xi += alpha * pi;
            *ri -= alpha * qi;
        }

        residual = norm2(&r) / b_norm;
        if residual <= config.tolerance {
            debug!(iterations = iteration, residual, "conjugate gradient converged");
            return Ok(CgResult {
                x,
                iterations: iteration,
                residual,
            });
        }

        for ((zi, ri), mi) in z.iter_mut().zip(&r).zip(&inv_diag) {
            *zi = ri * mi;
        }
        let rz_next = dot(&r, &z);
        let beta = rz_next / rz;
        rz = rz_next;
        for (pi, zi) in p.iter_mut().zip(&z) {
            *pi = zi + beta * *pi;
        }
    }

    warn!(
        iterations = config.max_iterations,
        residual,
        tolerance = config.tolerance,
        "conjugate gradient hit its iteration cap"
    );
    Err(SolverError::ConvergenceFailed {
        iterations: config.max_iterations,
        residual,
        tolerance: config.tolerance,
    })
}
