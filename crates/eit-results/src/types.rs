//! Solved-graph data types.
//!
//! On the wire a [`SolvedGraph`] is a bare JSON array of nodes:
//!
//! ```json
//! [{"id": 0, "x": 0.0, "y": 0.5, "voltage": 1.0,
//!   "connections": [{"to": 3, "current": 0.0021}]}]
//! ```

use serde::{Deserialize, Serialize};

/// Current through one incident edge, oriented away from the owning node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub to: u32,
    /// Positive when current leaves the owning node towards `to`.
    pub current: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedNode {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub voltage: f64,
    /// Ascending `to` order.
    pub connections: Vec<Connection>,
}

/// The solved network: nodes in ascending id order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolvedGraph {
    pub nodes: Vec<SolvedNode>,
}

/// Normalization scales for rendering a solved graph.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extrema {
    pub max_abs_voltage: f64,
    pub max_abs_current: f64,
}

impl SolvedGraph {
    pub fn new(nodes: Vec<SolvedNode>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: u32) -> Option<&SolvedNode> {
        // Ids are dense, so the id is also the position.
        self.nodes.get(id as usize).filter(|n| n.id == id)
    }

    /// Largest |voltage| over all nodes and largest |current| over all
    /// connections (0 for an empty graph).
    pub fn extrema(&self) -> Extrema {
        self.nodes.iter().fold(Extrema::default(), |acc, node| {
            let max_current = node
                .connections
                .iter()
                .fold(acc.max_abs_current, |m, c| m.max(c.current.abs()));
            Extrema {
                max_abs_voltage: acc.max_abs_voltage.max(node.voltage.abs()),
                max_abs_current: max_current,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, voltage: f64, currents: &[(u32, f64)]) -> SolvedNode {
        SolvedNode {
            id,
            x: 0.0,
            y: 0.0,
            voltage,
            connections: currents
                .iter()
                .map(|&(to, current)| Connection { to, current })
                .collect(),
        }
    }

    #[test]
    fn extrema_uses_magnitudes() {
        let graph = SolvedGraph::new(vec![
            node(0, -3.0, &[(1, 0.5)]),
            node(1, 2.0, &[(0, -0.5), (2, -0.75)]),
            node(2, 0.0, &[(1, 0.75)]),
        ]);
        let e = graph.extrema();
        assert_eq!(e.max_abs_voltage, 3.0);
        assert_eq!(e.max_abs_current, 0.75);
        assert_eq!(SolvedGraph::default().extrema(), Extrema::default());
    }

    #[test]
    fn serializes_as_bare_array() {
        let graph = SolvedGraph::new(vec![node(0, 1.0, &[(1, 0.25)])]);
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(
            json,
            r#"[{"id":0,"x":0.0,"y":0.0,"voltage":1.0,"connections":[{"to":1,"current":0.25}]}]"#
        );
        assert_eq!(graph.node(0).map(|n| n.voltage), Some(1.0));
        assert!(graph.node(1).is_none());
    }
}
