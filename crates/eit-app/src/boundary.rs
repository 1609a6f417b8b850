//! Ground/reference pair selection.
//!
//! The boundary list is in row-major id order, not angular order, so an
//! index halfway down the list is not necessarily across the disc from the
//! first node. [`BoundarySelection::Farthest`] picks by geometry instead and
//! is the default.

use eit_core::{NodeId, Real};
use eit_graph::Graph;
use eit_project::BoundarySelectionDef;
use tracing::debug;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundarySelection {
    /// Reference = first boundary node, ground = the boundary node at index
    /// `(len - 1) / 2` (at least 1).
    MidpointIndex,
    /// Reference = first boundary node, ground = the boundary node farthest
    /// from it in grid coordinates, lowest id on ties.
    #[default]
    Farthest,
    Explicit { ground: NodeId, reference: NodeId },
}

impl From<BoundarySelectionDef> for BoundarySelection {
    fn from(def: BoundarySelectionDef) -> Self {
        match def {
            BoundarySelectionDef::MidpointIndex => BoundarySelection::MidpointIndex,
            BoundarySelectionDef::Farthest => BoundarySelection::Farthest,
            BoundarySelectionDef::Explicit { ground, reference } => BoundarySelection::Explicit {
                ground: NodeId::from_index(ground),
                reference: NodeId::from_index(reference),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryPair {
    pub ground: NodeId,
    pub reference: NodeId,
}

/// Pick the ground/reference pair for `graph`.
///
/// Explicit pairs are passed through; the solver checks that they exist.
pub fn select_boundary(graph: &Graph, selection: BoundarySelection) -> AppResult<BoundaryPair> {
    if let BoundarySelection::Explicit { ground, reference } = selection {
        return Ok(BoundaryPair { ground, reference });
    }

    let boundary = graph.boundary_nodes();
    let [reference, rest @ ..] = boundary.as_slice() else {
        return Err(AppError::Selection {
            what: "network has no boundary nodes".to_string(),
        });
    };
    if rest.is_empty() {
        return Err(AppError::Selection {
            what: format!("network has a single boundary node ({reference})"),
        });
    }

    let ground = match selection {
        BoundarySelection::MidpointIndex => boundary[((boundary.len() - 1) / 2).max(1)],
        _ => farthest_from(graph, *reference, rest),
    };
    debug!(
        ?selection,
        boundary_nodes = boundary.len(),
        %ground,
        %reference,
        "selected boundary pair"
    );
    Ok(BoundaryPair {
        ground,
        reference: *reference,
    })
}

fn farthest_from(graph: &Graph, origin: NodeId, candidates: &[NodeId]) -> NodeId {
    let position = |id: NodeId| {
        graph
            .node(id)
            .map(|n| (n.row as Real, n.col as Real))
            .unwrap_or_default()
    };
    let (r0, c0) = position(origin);

    let mut best = candidates[0];
    let mut best_dist = Real::NEG_INFINITY;
    for &id in candidates {
        let (r, c) = position(id);
        let dist = (r - r0).hypot(c - c0);
        if dist > best_dist {
            best = id;
            best_dist = dist;
        }
    }
    best
}
