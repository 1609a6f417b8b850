//! Core graph data structures.

use eit_core::{EdgeId, NodeId, Real};

use crate::indexing::CellIndex;

/// A node of the resistor network: one admitted grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Source cell row.
    pub row: usize,
    /// Source cell column.
    pub col: usize,
    /// Display coordinate, `row / rows`, in [0, 1].
    pub x: Real,
    /// Display coordinate, `col / cols`, in [0, 1].
    pub y: Real,
    /// Fewer than 4 incident edges: the node touches the mask or grid edge.
    pub boundary: bool,
}

/// A resistor between two nodes.
///
/// Stored canonically with `a < b`; currents reported by the solver flow
/// from `a` to `b` when positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub a: NodeId,
    pub b: NodeId,
    pub resistance: Real,
}

impl Edge {
    pub fn conductance(&self) -> Real {
        1.0 / self.resistance
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        node == self.a || node == self.b
    }
}

/// The graph: a validated, immutable collection of nodes and edges.
///
/// The graph stores:
/// - All nodes and edges in vectors (indexed by their IDs).
/// - Compact adjacency: for each node, its incident edges in ascending
///   neighbor-id order.
/// - A dense (row, col) -> node index.
///
/// Nothing mutates a graph after `build()`, so it can be shared across
/// threads and solved concurrently with different boundary conditions.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,

    /// Node i's edges are in node_edges[node_edge_offsets[i]..node_edge_offsets[i+1]].
    pub(crate) node_edge_offsets: Vec<usize>,
    pub(crate) node_edges: Vec<EdgeId>,

    pub(crate) cells: CellIndex,
}

impl Graph {
    /// Return all nodes, in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges, in id order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Source grid dimensions `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    /// Get an edge by ID (returns None if ID out of bounds).
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.idx())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Edge ids incident to a node (empty for unknown ids).
    pub fn incident_edges(&self, node_id: NodeId) -> &[EdgeId] {
        let idx = node_id.idx();
        if idx >= self.nodes.len() {
            return &[];
        }
        let start = self.node_edge_offsets[idx];
        let end = self.node_edge_offsets[idx + 1];
        &self.node_edges[start..end]
    }

    pub fn degree(&self, node_id: NodeId) -> usize {
        self.incident_edges(node_id).len()
    }

    /// `(neighbor, edge)` pairs in ascending neighbor-id order.
    pub fn neighbors(&self, node_id: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> + '_ {
        self.incident_edges(node_id).iter().filter_map(move |&eid| {
            let edge = self.edge(eid)?;
            Some((edge.other(node_id)?, edge))
        })
    }

    /// Boundary node ids in ascending id (row-major) order.
    pub fn boundary_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.boundary)
            .map(|n| n.id)
            .collect()
    }

    /// Node occupying the given cell, if the mask admitted it.
    pub fn node_at(&self, row: usize, col: usize) -> Option<NodeId> {
        self.cells.get(row, col)
    }
}
