//! Solved voltages and currents.

use eit_core::{EdgeId, NodeId, Real};
use eit_graph::Graph;

use crate::solve::SolveMethod;

/// Voltages and edge currents of a solved network.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Voltage per node, indexed by node id.
    pub voltages: Vec<Real>,
    /// Current per edge, indexed by edge id. Positive values flow from the
    /// edge's lower-id endpoint `a` to `b`.
    pub currents: Vec<Real>,
    pub ground: NodeId,
    pub reference: NodeId,
    pub reference_voltage: Real,
    /// Method that produced the voltages
    pub method: SolveMethod,
    /// CG iterations; 0 for the direct method
    pub iterations: usize,
    /// Relative residual of the reduced system
    pub residual: Real,
}

impl SolveResult {
    pub fn voltage(&self, node: NodeId) -> Option<Real> {
        self.voltages.get(node.idx()).copied()
    }

    pub fn current(&self, edge: EdgeId) -> Option<Real> {
        self.currents.get(edge.idx()).copied()
    }

    /// Net current leaving `node` through its incident edges.
    pub fn net_current_out(&self, graph: &Graph, node: NodeId) -> Real {
        graph
            .neighbors(node)
            .filter_map(|(_, edge)| {
                let current = self.current(edge.id)?;
                Some(if edge.a == node { current } else { -current })
            })
            .sum()
    }

    /// Current injected at the reference node (equal to the current drawn
    /// at ground).
    pub fn injected_current(&self, graph: &Graph) -> Real {
        self.net_current_out(graph, self.reference)
    }

    /// Total resistance seen between the reference and ground, `V / I`.
    /// `None` when no current flows.
    pub fn equivalent_resistance(&self, graph: &Graph) -> Option<Real> {
        let current = self.injected_current(graph);
        (current != 0.0).then(|| self.reference_voltage / current)
    }
}
