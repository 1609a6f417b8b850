//! Dense cell indexing.
//!
//! Maps grid cells `(row, col)` to node ids through a row-major array sized
//! to the grid, giving O(1) lookup in both directions without hashing.

use eit_core::NodeId;

use crate::error::{GraphError, GraphResult};

#[derive(Debug, Clone, Default)]
pub struct CellIndex {
    rows: usize,
    cols: usize,
    /// Row-major; None for cells the mask excluded.
    slots: Vec<Option<NodeId>>,
    occupied: usize,
}

impl CellIndex {
    /// An empty index for a `rows x cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            slots: vec![None; rows * cols],
            occupied: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Node at (row, col); None when excluded or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<NodeId> {
        if row < self.rows && col < self.cols {
            self.slots[row * self.cols + col]
        } else {
            None
        }
    }

    /// Neighbor lookup with signed offsets; None when it leaves the grid.
    pub fn offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<NodeId> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.get(r, c)
    }

    /// Record that `id` occupies (row, col).
    pub fn insert(&mut self, row: usize, col: usize, id: NodeId) -> GraphResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(GraphError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let slot = &mut self.slots[row * self.cols + col];
        if let Some(first) = *slot {
            return Err(GraphError::DuplicateCell {
                row,
                col,
                first,
                second: id,
            });
        }
        *slot = Some(id);
        self.occupied += 1;
        Ok(())
    }
}
