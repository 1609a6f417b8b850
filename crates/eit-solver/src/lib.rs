//! Steady-state resistor network solver.
//!
//! Given a [`Graph`](eit_graph::Graph) and two Dirichlet nodes (ground at
//! 0 V, reference at a prescribed voltage) this crate solves Kirchhoff's
//! current law for every other node. Fixed-node contributions are moved to
//! the right-hand side, leaving the weighted Laplacian restricted to the
//! free nodes, which is symmetric positive-definite as long as every free
//! node can reach a fixed one. That is checked up front.
//!
//! Two methods are available: a sparse Cholesky factorization
//! ([`SolveMethod::Direct`]) and Jacobi-preconditioned conjugate gradient
//! ([`SolveMethod::ConjugateGradient`]).

pub mod assembly;
pub mod cg;
pub mod connectivity;
pub mod direct;
pub mod error;
pub mod problem;
pub mod solution;
pub mod solve;

pub use assembly::ReducedSystem;
pub use cg::{CgConfig, CgResult};
pub use error::{SolverError, SolverResult};
pub use problem::BoundarySpec;
pub use solution::SolveResult;
pub use solve::{SolveMethod, SolverConfig, solve, solve_with_cancel};
