//! Graph-specific error types.
//!
//! Every variant is a construction error: the grid, the mesh parameters or a
//! hand-built network violates a precondition of the graph.

use eit_core::{CoreError, EdgeId, ErrorKind, NodeId};
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Intensity grid is empty")]
    EmptyGrid,

    #[error("Intensity grid is not rectangular: row {row} has {actual} samples (expected {expected})")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Intensity grid shape {rows}x{cols} does not match {len} samples")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    #[error("Invalid mask radius {radius} (must be finite and >= 0)")]
    InvalidRadius { radius: f64 },

    #[error("Invalid resistance range [{min}, {max}] (need 0 < min < max, both finite)")]
    InvalidResistanceRange { min: f64, max: f64 },

    #[error("Intensity at cell ({row}, {col}) is {value}; admitted cells must be finite and > 0")]
    InvalidIntensity { row: usize, col: usize, value: f64 },

    #[error("Node {node} at cell ({row}, {col}) has no incident edges")]
    IsolatedNode { node: NodeId, row: usize, col: usize },

    #[error("Node {node} has {degree} incident edges (expected 1..=4)")]
    DegreeOutOfRange { node: NodeId, degree: usize },

    #[error("Edge {edge} refers to non-existent node {node}")]
    InvalidNodeRef { edge: EdgeId, node: NodeId },

    #[error("Edge {edge} connects node {node} to itself")]
    SelfLoop { edge: EdgeId, node: NodeId },

    #[error("Edge {edge} duplicates the connection {a} <-> {b}")]
    DuplicateEdge { edge: EdgeId, a: NodeId, b: NodeId },

    #[error("Edge {edge} has resistance {value}; must be finite and > 0")]
    InvalidResistance { edge: EdgeId, value: f64 },

    #[error("Cell ({row}, {col}) lies outside the {rows}x{cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Cell ({row}, {col}) is claimed by nodes {first} and {second}")]
    DuplicateCell {
        row: usize,
        col: usize,
        first: NodeId,
        second: NodeId,
    },

    #[error("Edge {edge} is in node {node}'s adjacency list but doesn't touch that node")]
    InconsistentAdjacency { node: NodeId, edge: EdgeId },

    #[error("Invalid argument: {0}")]
    Core(String),
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Construction
    }
}

impl From<CoreError> for GraphError {
    fn from(err: CoreError) -> Self {
        GraphError::Core(err.to_string())
    }
}
