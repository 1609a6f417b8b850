//! Dirichlet boundary conditions for a network solve.

use eit_core::{NodeId, Real};
use eit_graph::Graph;

use crate::error::{SolverError, SolverResult};

/// The two fixed nodes of a solve: `ground` held at 0 V and `reference`
/// held at `reference_voltage`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySpec {
    pub ground: NodeId,
    pub reference: NodeId,
    pub reference_voltage: Real,
}

impl BoundarySpec {
    pub fn new(ground: NodeId, reference: NodeId, reference_voltage: Real) -> Self {
        Self {
            ground,
            reference,
            reference_voltage,
        }
    }

    /// Check the pair against `graph`: both ids exist, they differ, and the
    /// reference voltage is finite.
    pub fn validate(&self, graph: &Graph) -> SolverResult<()> {
        for (role, id) in [("ground", self.ground), ("reference", self.reference)] {
            if !graph.contains(id) {
                return Err(SolverError::InvalidBoundary {
                    what: format!(
                        "{role} node {id} is not in the network ({} nodes)",
                        graph.node_count()
                    ),
                });
            }
        }
        if self.ground == self.reference {
            return Err(SolverError::InvalidBoundary {
                what: format!("ground and reference are both node {}", self.ground),
            });
        }
        if !self.reference_voltage.is_finite() {
            return Err(SolverError::InvalidBoundary {
                what: format!("reference voltage {} is not finite", self.reference_voltage),
            });
        }
        Ok(())
    }

    /// Prescribed voltage of `node`, or `None` if it is free.
    pub fn fixed_voltage(&self, node: NodeId) -> Option<Real> {
        if node == self.ground {
            Some(0.0)
        } else if node == self.reference {
            Some(self.reference_voltage)
        } else {
            None
        }
    }

    pub fn fixed_nodes(&self) -> [NodeId; 2] {
        [self.ground, self.reference]
    }
}
