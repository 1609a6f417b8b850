//! Masked grid -> resistor network.
//!
//! A cell is admitted when its distance from the grid center is within the
//! mask radius. Admitted cells become nodes in row-major order and are
//! linked to their admitted 4-neighbors. The mask and intensity checks run
//! per row in parallel; ids and edges are then assigned in one sequential
//! row-major pass, so the result does not depend on thread scheduling.

use eit_core::Real;
use rayon::prelude::*;
use tracing::debug;

use crate::builder::NetworkBuilder;
use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::grid::IntensityGrid;
use crate::indexing::CellIndex;

/// Resistance range that edge resistances are mapped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceRange {
    pub min: Real,
    pub max: Real,
}

impl ResistanceRange {
    pub fn new(min: Real, max: Real) -> GraphResult<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> GraphResult<()> {
        let ok = self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min < self.max;
        if ok {
            Ok(())
        } else {
            Err(GraphError::InvalidResistanceRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Map a mean reciprocal intensity linearly onto the range, then clamp.
    pub fn map(&self, mean_reciprocal: Real) -> Real {
        (self.min + (self.max - self.min) * mean_reciprocal).clamp(self.min, self.max)
    }
}

/// Mesh construction parameters: mask radius and resistance range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    pub radius: Real,
    pub resistance: ResistanceRange,
}

impl MeshParams {
    pub fn new(radius: Real, min_resistance: Real, max_resistance: Real) -> GraphResult<Self> {
        let params = Self {
            radius,
            resistance: ResistanceRange {
                min: min_resistance,
                max: max_resistance,
            },
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> GraphResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(GraphError::InvalidRadius {
                radius: self.radius,
            });
        }
        self.resistance.validate()
    }
}

/// Resistance of the edge between two cells with intensities `a` and `b`.
///
/// The mean of the reciprocals, `(1/a + 1/b) / 2`, is mapped onto the range.
pub fn edge_resistance(a: Real, b: Real, range: &ResistanceRange) -> Real {
    range.map((1.0 / a + 1.0 / b) / 2.0)
}

/// Build the masked network for `grid`.
pub fn build_graph(
    grid: &IntensityGrid,
    radius: Real,
    min_resistance: Real,
    max_resistance: Real,
) -> GraphResult<Graph> {
    build_with(grid, &MeshParams::new(radius, min_resistance, max_resistance)?)
}

/// Build the masked network for `grid` with pre-assembled parameters.
pub fn build_with(grid: &IntensityGrid, params: &MeshParams) -> GraphResult<Graph> {
    params.validate()?;
    let rows = grid.rows();
    let cols = grid.cols();

    // Per-row mask, computed independently for every row.
    let mask: Vec<Vec<bool>> = (0..rows)
        .into_par_iter()
        .map(|r| {
            (0..cols)
                .map(|c| grid.distance_from_center(r, c) <= params.radius)
                .collect()
        })
        .collect();

    // First bad admitted intensity in row-major order.
    let bad = (0..rows).into_par_iter().find_map_first(|r| {
        grid.row(r).iter().enumerate().find_map(|(c, &v)| {
            let admitted = mask[r][c];
            (admitted && !(v.is_finite() && v > 0.0)).then_some((r, c, v))
        })
    });
    if let Some((row, col, value)) = bad {
        return Err(GraphError::InvalidIntensity { row, col, value });
    }

    let admitted: usize = mask.iter().map(|row| row.iter().filter(|&&m| m).count()).sum();
    let mut builder = NetworkBuilder::with_capacity(rows, cols, admitted, admitted * 2);
    let mut cells = CellIndex::new(rows, cols);

    // Sequential row-major id assignment.
    for (r, row_mask) in mask.iter().enumerate() {
        for (c, _) in row_mask.iter().enumerate().filter(|(_, m)| **m) {
            let id = builder.add_node(r, c);
            cells.insert(r, c, id)?;
        }
    }

    // Each edge is created once, from its upper/left endpoint.
    for r in 0..rows {
        for c in 0..cols {
            let Some(id) = cells.get(r, c) else {
                continue;
            };
            let here = grid.row(r)[c];
            for (dr, dc) in [(1_isize, 0_isize), (0, 1)] {
                if let Some(neighbor) = cells.offset(r, c, dr, dc) {
                    let (nr, nc) = (r + dr as usize, c + dc as usize);
                    let there = grid.row(nr)[nc];
                    builder.add_edge(id, neighbor, edge_resistance(here, there, &params.resistance));
                }
            }
        }
    }

    let graph = builder.build()?;
    debug!(
        rows,
        cols,
        radius = params.radius,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built masked network"
    );
    Ok(graph)
}
