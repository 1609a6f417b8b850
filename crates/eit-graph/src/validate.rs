//! Graph validation logic.

use std::collections::HashSet;

use eit_core::{EdgeId, Id, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Node};
use crate::indexing::CellIndex;

/// Check every node and edge position fits in an id.
pub(crate) fn validate_capacity(node_count: usize, edge_count: usize) -> GraphResult<()> {
    for count in [node_count, edge_count] {
        if let Some(last) = count.checked_sub(1) {
            Id::try_from_usize(last)?;
        }
    }
    Ok(())
}

/// Check node ids are dense and every node owns a distinct in-bounds cell.
pub(crate) fn validate_cells(nodes: &[Node], rows: usize, cols: usize) -> GraphResult<CellIndex> {
    let mut cells = CellIndex::new(rows, cols);
    for (i, node) in nodes.iter().enumerate() {
        if node.id.idx() != i {
            return Err(GraphError::Core(format!(
                "node id {} stored at position {}",
                node.id, i
            )));
        }
        cells.insert(node.row, node.col, node.id)?;
    }
    Ok(cells)
}

/// Check edge endpoints, resistances and uniqueness.
pub(crate) fn validate_edges(nodes: &[Node], edges: &[Edge]) -> GraphResult<()> {
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::with_capacity(edges.len());

    for edge in edges {
        for node in [edge.a, edge.b] {
            if node.idx() >= nodes.len() {
                return Err(GraphError::InvalidNodeRef {
                    edge: edge.id,
                    node,
                });
            }
        }

        if edge.a == edge.b {
            return Err(GraphError::SelfLoop {
                edge: edge.id,
                node: edge.a,
            });
        }

        if !edge.resistance.is_finite() || edge.resistance <= 0.0 {
            return Err(GraphError::InvalidResistance {
                edge: edge.id,
                value: edge.resistance,
            });
        }

        if !seen.insert((edge.a, edge.b)) {
            return Err(GraphError::DuplicateEdge {
                edge: edge.id,
                a: edge.a,
                b: edge.b,
            });
        }
    }

    Ok(())
}

/// Validate adjacency lists: every listed edge touches its node and every
/// node has between 1 and 4 incident edges.
pub(crate) fn validate_adjacency(
    nodes: &[Node],
    edges: &[Edge],
    node_edge_offsets: &[usize],
    node_edges: &[EdgeId],
) -> GraphResult<()> {
    if node_edge_offsets.len() != nodes.len() + 1 {
        return Err(GraphError::Core(format!(
            "adjacency offsets have length {} for {} nodes",
            node_edge_offsets.len(),
            nodes.len()
        )));
    }

    for node in nodes {
        let idx = node.id.idx();
        let start = node_edge_offsets[idx];
        let end = node_edge_offsets[idx + 1];

        for &edge_id in &node_edges[start..end] {
            let touches = edges
                .get(edge_id.idx())
                .is_some_and(|edge| edge.touches(node.id));
            if !touches {
                return Err(GraphError::InconsistentAdjacency {
                    node: node.id,
                    edge: edge_id,
                });
            }
        }

        match end - start {
            0 => {
                return Err(GraphError::IsolatedNode {
                    node: node.id,
                    row: node.row,
                    col: node.col,
                });
            }
            1..=4 => {}
            degree => {
                return Err(GraphError::DegreeOutOfRange {
                    node: node.id,
                    degree,
                });
            }
        }
    }

    // Each edge appears exactly twice (once per endpoint).
    if node_edges.len() != edges.len() * 2 {
        return Err(GraphError::Core(format!(
            "adjacency lists hold {} entries for {} edges",
            node_edges.len(),
            edges.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eit_core::Id;

    fn node(i: u32, row: usize, col: usize) -> Node {
        Node {
            id: Id::from_index(i),
            row,
            col,
            x: 0.0,
            y: 0.0,
            boundary: false,
        }
    }

    fn edge(i: u32, a: u32, b: u32, resistance: f64) -> Edge {
        Edge {
            id: Id::from_index(i),
            a: Id::from_index(a),
            b: Id::from_index(b),
            resistance,
        }
    }

    #[test]
    fn validate_empty_graph() {
        assert!(validate_edges(&[], &[]).is_ok());
        assert!(validate_cells(&[], 0, 0).is_ok());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn validate_capacity_limits() {
        let max = Id::MAX_INDEX as usize;
        assert!(validate_capacity(0, 0).is_ok());
        assert!(validate_capacity(max + 1, max + 1).is_ok());
        assert!(matches!(
            validate_capacity(max + 2, 0),
            Err(GraphError::Core(msg)) if msg.contains(&(max + 1).to_string())
        ));
        assert!(validate_capacity(3, max + 2).is_err());
    }

    #[test]
    fn validate_invalid_node_ref() {
        let nodes = vec![node(0, 0, 0)];
        let edges = vec![edge(0, 0, 99, 1.0)];
        assert!(matches!(
            validate_edges(&nodes, &edges),
            Err(GraphError::InvalidNodeRef { .. })
        ));
    }

    #[test]
    fn validate_bad_resistance_and_loops() {
        let nodes = vec![node(0, 0, 0), node(1, 0, 1)];
        assert!(matches!(
            validate_edges(&nodes, &[edge(0, 0, 1, 0.0)]),
            Err(GraphError::InvalidResistance { .. })
        ));
        assert!(matches!(
            validate_edges(&nodes, &[edge(0, 0, 1, f64::NAN)]),
            Err(GraphError::InvalidResistance { .. })
        ));
        assert!(matches!(
            validate_edges(&nodes, &[edge(0, 1, 1, 1.0)]),
            Err(GraphError::SelfLoop { .. })
        ));
        assert!(matches!(
            validate_edges(&nodes, &[edge(0, 0, 1, 1.0), edge(1, 0, 1, 2.0)]),
            Err(GraphError::DuplicateEdge { .. })
        ));
    }

    #[test]
    fn validate_duplicate_cell() {
        let nodes = vec![node(0, 1, 1), node(1, 1, 1)];
        assert!(matches!(
            validate_cells(&nodes, 2, 2),
            Err(GraphError::DuplicateCell { .. })
        ));
    }

    #[test]
    fn validate_degree_above_four() {
        let nodes: Vec<Node> = (0..6).map(|i| node(i, 0, i as usize)).collect();
        let edges: Vec<Edge> = (1..6).map(|i| edge(i - 1, 0, i, 1.0)).collect();
        let mut offsets = vec![0, 5];
        let mut flat: Vec<EdgeId> = edges.iter().map(|e| e.id).collect();
        for e in &edges {
            flat.push(e.id);
            offsets.push(flat.len());
        }
        assert!(matches!(
            validate_adjacency(&nodes, &edges, &offsets, &flat),
            Err(GraphError::DegreeOutOfRange { degree: 5, .. })
        ));
    }
}
