//! Incremental graph builder.

use eit_core::{EdgeId, NodeId, Real};

use crate::error::GraphResult;
use crate::graph::{Edge, Graph, Node};
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_node` and `add_edge` to build up the network,
/// then call `build()` to validate and freeze it into an immutable `Graph`.
/// The mesh builder drives this for grids; tests and callers with
/// hand-made circuits use it directly.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    rows: usize,
    cols: usize,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl NetworkBuilder {
    /// Create a new empty builder for cells of a `rows x cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Reserve space for the expected number of nodes and edges.
    pub fn with_capacity(rows: usize, cols: usize, nodes: usize, edges: usize) -> Self {
        Self {
            rows,
            cols,
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node for cell (row, col) and return its ID.
    ///
    /// IDs are handed out densely in call order. Cell bounds and
    /// uniqueness are checked by `build()`.
    pub fn add_node(&mut self, row: usize, col: usize) -> NodeId {
        let id = NodeId::from_usize(self.nodes.len());
        let x = if self.rows > 0 {
            row as Real / self.rows as Real
        } else {
            0.0
        };
        let y = if self.cols > 0 {
            col as Real / self.cols as Real
        } else {
            0.0
        };
        self.nodes.push(Node {
            id,
            row,
            col,
            x,
            y,
            boundary: false,
        });
        id
    }

    /// Add a resistor between two nodes and return its ID.
    ///
    /// The endpoints are stored with the lower id first.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, resistance: Real) -> EdgeId {
        let id = EdgeId::from_usize(self.edges.len());
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        self.edges.push(Edge {
            id,
            a,
            b,
            resistance,
        });
        id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build and validate the graph, returning an immutable `Graph`.
    ///
    /// This performs validation, constructs compact adjacency lists and
    /// classifies boundary nodes.
    pub fn build(self) -> GraphResult<Graph> {
        validate::validate_capacity(self.nodes.len(), self.edges.len())?;
        let cells = validate::validate_cells(&self.nodes, self.rows, self.cols)?;
        validate::validate_edges(&self.nodes, &self.edges)?;

        let (node_edge_offsets, node_edges) = Self::build_adjacency(&self.nodes, &self.edges);

        validate::validate_adjacency(&self.nodes, &self.edges, &node_edge_offsets, &node_edges)?;

        let mut nodes = self.nodes;
        for (i, node) in nodes.iter_mut().enumerate() {
            node.boundary = node_edge_offsets[i + 1] - node_edge_offsets[i] < 4;
        }

        Ok(Graph {
            rows: self.rows,
            cols: self.cols,
            nodes,
            edges: self.edges,
            node_edge_offsets,
            node_edges,
            cells,
        })
    }

    /// Build compact adjacency lists: for each node, its incident edges
    /// sorted by neighbor id.
    fn build_adjacency(nodes: &[Node], edges: &[Edge]) -> (Vec<usize>, Vec<EdgeId>) {
        let mut per_node: Vec<Vec<(NodeId, EdgeId)>> = vec![Vec::new(); nodes.len()];
        for edge in edges {
            // Out-of-range endpoints were rejected by validate_edges.
            if let Some(list) = per_node.get_mut(edge.a.idx()) {
                list.push((edge.b, edge.id));
            }
            if let Some(list) = per_node.get_mut(edge.b.idx()) {
                list.push((edge.a, edge.id));
            }
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat = Vec::with_capacity(edges.len() * 2);
        offsets.push(0);
        for mut list in per_node {
            list.sort_unstable();
            flat.extend(list.into_iter().map(|(_, eid)| eid));
            offsets.push(flat.len());
        }

        (offsets, flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    #[test]
    fn builder_basic() {
        let mut builder = NetworkBuilder::new(1, 2);
        let n1 = builder.add_node(0, 0);
        let n2 = builder.add_node(0, 1);
        let e1 = builder.add_edge(n1, n2, 5.0);

        assert_eq!(n1.index(), 0);
        assert_eq!(n2.index(), 1);
        assert_eq!(e1.index(), 0);
        assert_eq!(builder.node_count(), 2);
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn edges_are_canonicalised() {
        let mut builder = NetworkBuilder::new(1, 2);
        let n1 = builder.add_node(0, 0);
        let n2 = builder.add_node(0, 1);
        builder.add_edge(n2, n1, 5.0);

        let graph = builder.build().unwrap();
        let edge = &graph.edges()[0];
        assert_eq!((edge.a, edge.b), (n1, n2));
    }

    #[test]
    fn adjacency_sorted_by_neighbor() {
        // Star: centre node 0 with neighbours added out of order.
        let mut builder = NetworkBuilder::new(3, 3);
        let c = builder.add_node(1, 1);
        let up = builder.add_node(0, 1);
        let left = builder.add_node(1, 0);
        let right = builder.add_node(1, 2);
        let down = builder.add_node(2, 1);
        builder.add_edge(c, down, 1.0);
        builder.add_edge(c, up, 1.0);
        builder.add_edge(c, right, 1.0);
        builder.add_edge(c, left, 1.0);

        let graph = builder.build().unwrap();
        let order: Vec<NodeId> = graph.neighbors(c).map(|(n, _)| n).collect();
        assert_eq!(order, vec![up, left, right, down]);
        assert!(!graph.node(c).unwrap().boundary);
        assert!(graph.node(up).unwrap().boundary);
    }

    #[test]
    fn isolated_node_rejected() {
        let mut builder = NetworkBuilder::new(2, 2);
        let a = builder.add_node(0, 0);
        let b = builder.add_node(0, 1);
        builder.add_node(1, 1);
        builder.add_edge(a, b, 1.0);

        assert!(matches!(
            builder.build(),
            Err(GraphError::IsolatedNode { row: 1, col: 1, .. })
        ));
    }

    #[test]
    fn display_coordinates_normalised() {
        let mut builder = NetworkBuilder::new(4, 8);
        let a = builder.add_node(2, 4);
        let b = builder.add_node(2, 5);
        builder.add_edge(a, b, 1.0);
        let graph = builder.build().unwrap();

        let node = graph.node(a).unwrap();
        assert_eq!((node.x, node.y), (0.5, 0.5));
        assert_eq!(graph.node_at(2, 5), Some(b));
    }
}
