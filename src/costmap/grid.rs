//! Row-major occupancy/cost grid.

use serde::{Deserialize, Serialize};

use crate::core::types::{Point2D, Pose2D};

/// Cell values used across the stack.
pub mod cost {
    /// Cell never observed
    pub const UNKNOWN: i8 = -1;
    /// Safe to traverse, no penalty
    pub const FREE: i8 = 0;
    /// Highest graded soft cost (soft values span 1..=98)
    pub const SOFT_MAX: i8 = 98;
    /// Hard-padded, forbidden to plan through
    pub const PADDED: i8 = 99;
    /// Observed obstacle
    pub const OCCUPIED: i8 = 100;
}

/// 2D cost grid with a world-frame origin.
///
/// Cells are stored row-major (`index = y * width + x`) as signed bytes:
/// `-1` unknown, `0` free, `1..=98` soft cost, `99` hard-padded, `100`
/// occupied. Cell (0, 0) sits at the origin pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Costmap {
    width: usize,
    height: usize,
    /// Meters per cell
    resolution: f64,
    /// World pose of cell (0, 0)
    origin: Pose2D,
    cells: Vec<i8>,
}

impl Costmap {
    /// Create a grid filled with a single value.
    pub fn new(width: usize, height: usize, resolution: f64, origin: Pose2D, fill: i8) -> Self {
        Self {
            width,
            height,
            resolution,
            origin,
            cells: vec![fill; width * height],
        }
    }

    /// Create a grid from raw row-major cells.
    ///
    /// # Panics
    /// Panics if `cells.len() != width * height`.
    pub fn from_cells(
        width: usize,
        height: usize,
        resolution: f64,
        origin: Pose2D,
        cells: Vec<i8>,
    ) -> Self {
        assert_eq!(cells.len(), width * height, "cell count mismatch");
        Self {
            width,
            height,
            resolution,
            origin,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    #[inline]
    pub fn origin(&self) -> Pose2D {
        self.origin
    }

    /// Raw cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Check that signed cell coordinates fall inside the grid.
    #[inline]
    pub fn is_valid_cell(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell value at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> i8 {
        self.cells[self.index(x, y)]
    }

    /// Set cell value at (x, y).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: i8) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// Convert a world point to cell coordinates via `⌊(p − origin)/res⌋`.
    ///
    /// Returns `None` for points outside the grid.
    #[inline]
    pub fn world_to_cell(&self, point: &Point2D) -> Option<(usize, usize)> {
        let (x, y) = self.world_to_cell_signed(point);
        if self.is_valid_cell(x, y) {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    /// Unbounded world-to-cell conversion.
    #[inline]
    pub fn world_to_cell_signed(&self, point: &Point2D) -> (i64, i64) {
        let x = ((point.x - self.origin.x) / self.resolution).floor() as i64;
        let y = ((point.y - self.origin.y) / self.resolution).floor() as i64;
        (x, y)
    }

    /// World coordinates of a cell center.
    #[inline]
    pub fn cell_to_world(&self, x: usize, y: usize) -> Point2D {
        Point2D::new(
            self.origin.x + (x as f64 + 0.5) * self.resolution,
            self.origin.y + (y as f64 + 0.5) * self.resolution,
        )
    }

    /// Coordinates of every occupied cell.
    pub fn occupied_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[self.index(x, y)] == cost::OCCUPIED {
                    out.push((x, y));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_grid() -> Costmap {
        Costmap::new(10, 8, 0.05, Pose2D::new(-0.25, -0.2, 0.0), cost::FREE)
    }

    #[test]
    fn test_world_to_cell_roundtrip() {
        let grid = test_grid();
        let p = grid.cell_to_world(4, 3);
        assert_eq!(grid.world_to_cell(&p), Some((4, 3)));
    }

    #[test]
    fn test_world_to_cell_floor() {
        let grid = test_grid();
        // Just inside cell (0, 0)
        assert_eq!(
            grid.world_to_cell(&Point2D::new(-0.25 + 1e-9, -0.2 + 1e-9)),
            Some((0, 0))
        );
        // Just below the origin falls outside
        assert_eq!(grid.world_to_cell(&Point2D::new(-0.26, -0.2)), None);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = test_grid();
        assert!(!grid.is_valid_cell(-1, 0));
        assert!(!grid.is_valid_cell(10, 0));
        assert!(!grid.is_valid_cell(0, 8));
        assert_eq!(grid.world_to_cell(&Point2D::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_occupied_cells() {
        let mut grid = test_grid();
        grid.set(2, 1, cost::OCCUPIED);
        grid.set(7, 6, cost::OCCUPIED);
        grid.set(3, 3, cost::PADDED);
        assert_eq!(grid.occupied_cells(), vec![(2, 1), (7, 6)]);
    }

    #[test]
    fn test_cell_center() {
        let grid = test_grid();
        let c = grid.cell_to_world(0, 0);
        assert_relative_eq!(c.x, -0.225);
        assert_relative_eq!(c.y, -0.175);
    }
}
