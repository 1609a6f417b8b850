//! Join a graph and its solve result into a [`SolvedGraph`].

use eit_graph::Graph;
use eit_solver::SolveResult;

use crate::types::{Connection, SolvedGraph, SolvedNode};
use crate::{ResultsError, ResultsResult};

/// Pair every node's display coordinate with its voltage, and every incident
/// edge with the current leaving the node along it.
///
/// Edge currents are stored `a -> b` (`a < b`), so the sign flips when the
/// node is the edge's `b` endpoint.
pub fn assemble(graph: &Graph, result: &SolveResult) -> ResultsResult<SolvedGraph> {
    check_consistency(graph, result)?;

    let nodes = graph
        .nodes()
        .iter()
        .map(|node| {
            let connections = graph
                .neighbors(node.id)
                .map(|(to, edge)| {
                    let current = result.currents[edge.id.idx()];
                    Connection {
                        to: to.index(),
                        current: if edge.a == node.id { current } else { -current },
                    }
                })
                .collect();
            SolvedNode {
                id: node.id.index(),
                x: node.x,
                y: node.y,
                voltage: result.voltages[node.id.idx()],
                connections,
            }
        })
        .collect();

    Ok(SolvedGraph::new(nodes))
}

fn check_consistency(graph: &Graph, result: &SolveResult) -> ResultsResult<()> {
    if result.voltages.len() != graph.node_count() {
        return Err(ResultsError::Consistency {
            what: format!(
                "{} voltages for {} nodes",
                result.voltages.len(),
                graph.node_count()
            ),
        });
    }
    if result.currents.len() != graph.edge_count() {
        return Err(ResultsError::Consistency {
            what: format!(
                "{} currents for {} edges",
                result.currents.len(),
                graph.edge_count()
            ),
        });
    }
    for (role, id) in [("ground", result.ground), ("reference", result.reference)] {
        if !graph.contains(id) {
            return Err(ResultsError::Consistency {
                what: format!("{role} node {id} is not in the network"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eit_core::{ErrorKind, Id};
    use eit_graph::NetworkBuilder;
    use eit_solver::{BoundarySpec, SolverConfig, solve};

    fn chain() -> Graph {
        let mut builder = NetworkBuilder::new(1, 3);
        let n0 = builder.add_node(0, 0);
        let n1 = builder.add_node(0, 1);
        let n2 = builder.add_node(0, 2);
        builder.add_edge(n0, n1, 1.0);
        builder.add_edge(n1, n2, 1.0);
        builder.build().unwrap()
    }

    #[test]
    fn currents_are_oriented_per_node() {
        let graph = chain();
        let bc = BoundarySpec::new(Id::from_index(2), Id::from_index(0), 2.0);
        let result = solve(&graph, &bc, &SolverConfig::default()).unwrap();
        let solved = assemble(&graph, &result).unwrap();

        assert_eq!(solved.len(), 3);
        let middle = &solved.nodes[1];
        assert!((middle.voltage - 1.0).abs() < 1e-12);
        let to: Vec<u32> = middle.connections.iter().map(|c| c.to).collect();
        assert_eq!(to, vec![0, 2]);
        // One amp flows 0 -> 1 -> 2.
        assert!((middle.connections[0].current + 1.0).abs() < 1e-12);
        assert!((middle.connections[1].current - 1.0).abs() < 1e-12);
        assert!((solved.nodes[0].connections[0].current - 1.0).abs() < 1e-12);
        assert_eq!((solved.nodes[2].x, solved.nodes[2].y), (0.0, 2.0 / 3.0));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let graph = chain();
        let bc = BoundarySpec::new(Id::from_index(2), Id::from_index(0), 2.0);
        let mut result = solve(&graph, &bc, &SolverConfig::default()).unwrap();
        result.currents.pop();
        let err = assemble(&graph, &result).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);

        let mut result = solve(&graph, &bc, &SolverConfig::default()).unwrap();
        result.reference = Id::from_index(10);
        assert!(matches!(
            assemble(&graph, &result),
            Err(ResultsError::Consistency { .. })
        ));
    }
}
