//! Reachability check run before assembly.
//!
//! The reduced Laplacian is positive-definite exactly when every free node
//! has a path to a fixed node, so anything a breadth-first search from the
//! fixed nodes cannot reach would make the system singular.

use std::collections::VecDeque;

use eit_core::NodeId;
use eit_graph::Graph;

/// Nodes with no path to any of `sources`, in ascending id order.
pub fn unreachable_nodes(graph: &Graph, sources: &[NodeId]) -> Vec<NodeId> {
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();

    for &source in sources {
        if let Some(seen) = visited.get_mut(source.idx())
            && !*seen
        {
            *seen = true;
            queue.push_back(source);
        }
    }

    while let Some(node) = queue.pop_front() {
        for (neighbor, _) in graph.neighbors(node) {
            let seen = &mut visited[neighbor.idx()];
            if !*seen {
                *seen = true;
                queue.push_back(neighbor);
            }
        }
    }

    graph
        .nodes()
        .iter()
        .filter(|n| !visited[n.id.idx()])
        .map(|n| n.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eit_graph::NetworkBuilder;

    #[test]
    fn two_islands() {
        let mut builder = NetworkBuilder::new(2, 3);
        let a = builder.add_node(0, 0);
        let b = builder.add_node(0, 1);
        let c = builder.add_node(1, 1);
        let d = builder.add_node(1, 2);
        builder.add_edge(a, b, 1.0);
        builder.add_edge(c, d, 1.0);
        let graph = builder.build().unwrap();

        assert_eq!(unreachable_nodes(&graph, &[a]), vec![c, d]);
        assert!(unreachable_nodes(&graph, &[a, d]).is_empty());
    }
}
