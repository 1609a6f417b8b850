//! Reduced Kirchhoff system assembly.
//!
//! Free nodes are numbered densely in ascending node-id order. Each edge
//! contributes its conductance to the weighted Laplacian; an edge with one
//! fixed endpoint only touches the free endpoint's diagonal and moves
//! `g * v_fixed` to the right-hand side. Edges between two fixed nodes
//! drop out entirely.

use eit_core::{NodeId, Real, norm2};
use eit_graph::{Edge, Graph};
use nalgebra_sparse::{CooMatrix, CscMatrix, CsrMatrix};
use rayon::prelude::*;

use crate::problem::BoundarySpec;

/// Weighted Laplacian restricted to the free nodes, plus its right-hand side.
#[derive(Debug, Clone)]
pub struct ReducedSystem {
    /// Position in the reduced system -> graph node.
    free: Vec<NodeId>,
    /// Graph node index -> position in the reduced system (None when fixed).
    slots: Vec<Option<usize>>,
    matrix: CsrMatrix<Real>,
    diagonal: Vec<Real>,
    rhs: Vec<Real>,
}

impl ReducedSystem {
    /// Assemble the reduced system for `graph` with `boundary` held fixed.
    ///
    /// `conductances[k]` belongs to edge `k`.
    pub fn assemble(graph: &Graph, boundary: &BoundarySpec, conductances: &[Real]) -> Self {
        let mut slots = vec![None; graph.node_count()];
        let mut free = Vec::with_capacity(graph.node_count().saturating_sub(2));
        for node in graph.nodes() {
            if boundary.fixed_voltage(node.id).is_none() {
                slots[node.id.idx()] = Some(free.len());
                free.push(node.id);
            }
        }

        let n = free.len();
        let mut coo = CooMatrix::new(n, n);
        let mut diagonal = vec![0.0; n];
        let mut rhs = vec![0.0; n];

        for (edge, &g) in graph.edges().iter().zip(conductances) {
            let a = slots[edge.a.idx()];
            let b = slots[edge.b.idx()];
            match (a, b) {
                (Some(i), Some(j)) => {
                    coo.push(i, i, g);
                    coo.push(j, j, g);
                    coo.push(i, j, -g);
                    coo.push(j, i, -g);
                    diagonal[i] += g;
                    diagonal[j] += g;
                }
                (Some(i), None) => {
                    coo.push(i, i, g);
                    diagonal[i] += g;
                    rhs[i] += g * boundary.fixed_voltage(edge.b).unwrap_or(0.0);
                }
                (None, Some(j)) => {
                    coo.push(j, j, g);
                    diagonal[j] += g;
                    rhs[j] += g * boundary.fixed_voltage(edge.a).unwrap_or(0.0);
                }
                (None, None) => {}
            }
        }

        Self {
            free,
            slots,
            matrix: CsrMatrix::from(&coo),
            diagonal,
            rhs,
        }
    }

    /// Number of unknowns.
    pub fn dim(&self) -> usize {
        self.free.len()
    }

    pub fn free_nodes(&self) -> &[NodeId] {
        &self.free
    }

    /// Position of `node` in the reduced system, `None` when fixed or unknown.
    pub fn slot(&self, node: NodeId) -> Option<usize> {
        self.slots.get(node.idx()).copied().flatten()
    }

    pub fn matrix(&self) -> &CsrMatrix<Real> {
        &self.matrix
    }

    /// Column-compressed copy of the matrix for factorization.
    pub fn to_csc(&self) -> CscMatrix<Real> {
        CscMatrix::from(&self.matrix)
    }

    pub fn diagonal(&self) -> &[Real] {
        &self.diagonal
    }

    pub fn rhs(&self) -> &[Real] {
        &self.rhs
    }

    /// `y = A x`, one row per task. Each row is summed in storage order so
    /// the result does not depend on scheduling.
    pub fn apply(&self, x: &[Real], y: &mut [Real]) {
        let offsets = self.matrix.row_offsets();
        let cols = self.matrix.col_indices();
        let values = self.matrix.values();
        y.par_iter_mut().enumerate().for_each(|(row, out)| {
            let range = offsets[row]..offsets[row + 1];
            *out = cols[range.clone()]
                .iter()
                .zip(&values[range])
                .map(|(&c, &v)| v * x[c])
                .sum();
        });
    }

    /// `||b - A x|| / ||b||`, or `||A x||` when the right-hand side is zero.
    pub fn relative_residual(&self, x: &[Real]) -> Real {
        let mut ax = vec![0.0; self.dim()];
        self.apply(x, &mut ax);
        let r: Vec<Real> = self.rhs.iter().zip(&ax).map(|(b, a)| b - a).collect();
        let b_norm = norm2(&self.rhs);
        if b_norm > 0.0 {
            norm2(&r) / b_norm
        } else {
            norm2(&r)
        }
    }
}

/// Edge conductances `1 / R`, indexed by edge id.
pub fn conductances(graph: &Graph) -> Vec<Real> {
    graph.edges().par_iter().map(Edge::conductance).collect()
}
