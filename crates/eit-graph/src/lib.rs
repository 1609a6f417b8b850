//! eit-graph: grid-to-network layer for the EIT forward simulator.
//!
//! Provides:
//! - [`IntensityGrid`], the rectangular intensity input
//! - Core graph data structures (Node, Edge, Graph)
//! - An incremental [`NetworkBuilder`] with validation
//! - The masked grid builder ([`build_graph`]) that turns a grid into a
//!   resistor network with row-major node ids
//! - A dense cell index for (row, col) -> node lookup
//!
//! # Example
//!
//! ```
//! use eit_graph::{IntensityGrid, build_graph};
//!
//! let grid = IntensityGrid::from_rows(vec![vec![10.0; 5]; 5]).unwrap();
//! let graph = build_graph(&grid, 2.0, 0.5, 1000.0).unwrap();
//!
//! assert_eq!(graph.node_count(), 13);
//! assert!(graph.nodes().iter().all(|n| (1..=4).contains(&graph.degree(n.id))));
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod grid;
pub mod indexing;
pub mod mesh;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, Node};
pub use grid::IntensityGrid;
pub use indexing::CellIndex;
pub use mesh::{MeshParams, ResistanceRange, build_graph, build_with, edge_resistance};
