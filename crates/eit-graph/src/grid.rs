//! Rectangular intensity input.

use eit_core::Real;

use crate::error::{GraphError, GraphResult};

/// Row-major, rectangular array of intensity samples.
///
/// The grid only guarantees its shape. Positivity is checked by the mesh
/// builder, and only for the cells the mask admits.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityGrid {
    rows: usize,
    cols: usize,
    data: Vec<Real>,
}

impl IntensityGrid {
    /// Create a grid from row-major samples.
    pub fn new(rows: usize, cols: usize, data: Vec<Real>) -> GraphResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(GraphError::EmptyGrid);
        }
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(GraphError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a grid from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Real>>) -> GraphResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(GraphError::EmptyGrid);
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GraphError::RaggedGrid {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::new(rows.len(), cols, data)
    }

    /// Build a grid from RGB pixels using the grayscale mean `(r + g + b) / 3`.
    pub fn from_rgb(rows: usize, cols: usize, pixels: &[[u8; 3]]) -> GraphResult<Self> {
        let data = pixels
            .iter()
            .map(|&[r, g, b]| grayscale(r, g, b))
            .collect();
        Self::new(rows, cols, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Sample at (row, col), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Real> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// One row of samples. Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[Real] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    /// Copy of the grid with every sample raised to at least `min`.
    ///
    /// NaN samples are replaced by `min` as well. This is the producer-side
    /// floor that keeps intensities strictly positive.
    pub fn floored(&self, min: Real) -> Self {
        let data = self
            .data
            .iter()
            .map(|&v| if v.is_nan() { min } else { v.max(min) })
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Geometric center cell, `(rows / 2, cols / 2)` with integer halving.
    pub fn center(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    /// Euclidean distance of (row, col) from [`center`](Self::center).
    pub fn distance_from_center(&self, row: usize, col: usize) -> Real {
        let (cr, cc) = self.center();
        let dr = row as Real - cr as Real;
        let dc = col as Real - cc as Real;
        (dr * dr + dc * dc).sqrt()
    }
}

/// Grayscale intensity of an RGB pixel.
pub fn grayscale(r: u8, g: u8, b: u8) -> Real {
    (Real::from(r) + Real::from(g) + Real::from(b)) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged() {
        let err = IntensityGrid::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            GraphError::RaggedGrid {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn empty_grids_rejected() {
        assert_eq!(IntensityGrid::from_rows(vec![]), Err(GraphError::EmptyGrid));
        assert_eq!(
            IntensityGrid::from_rows(vec![vec![]]),
            Err(GraphError::EmptyGrid)
        );
        assert!(IntensityGrid::new(2, 2, vec![1.0; 3]).is_err());
    }

    #[test]
    fn accessors() {
        let grid = IntensityGrid::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(1, 2), Some(6.0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(grid.center(), (1, 1));
    }

    #[test]
    fn floor_replaces_small_and_nan() {
        let grid = IntensityGrid::new(1, 4, vec![0.0, -3.0, Real::NAN, 7.0]).unwrap();
        let floored = grid.floored(1.0);
        assert_eq!(floored.as_slice(), &[1.0, 1.0, 1.0, 7.0]);
    }

    #[test]
    fn grayscale_mean() {
        assert_eq!(grayscale(30, 60, 90), 60.0);
        let grid = IntensityGrid::from_rgb(1, 2, &[[255, 255, 255], [0, 0, 3]]).unwrap();
        assert_eq!(grid.as_slice(), &[255.0, 1.0]);
    }

    #[test]
    fn distance_uses_integer_center() {
        let grid = IntensityGrid::new(5, 5, vec![1.0; 25]).unwrap();
        assert_eq!(grid.distance_from_center(2, 2), 0.0);
        assert_eq!(grid.distance_from_center(0, 2), 2.0);
        assert_eq!(grid.distance_from_center(5 - 1, 5 - 1), 8.0_f64.sqrt());
    }
}
