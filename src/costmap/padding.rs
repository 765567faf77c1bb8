//! Obstacle padding engine.
//!
//! Every occupied cell imprints a precomputed radial stamp: a hard-forbidden
//! Euclidean disk, then graded soft rings grown outward by 4-connected
//! dilation. Each write is an upper-bounded max-lift, so the result is
//! independent of the order occupied cells are visited and stamping an
//! already-padded grid changes nothing.

use std::collections::VecDeque;

use super::decay::DecayProfile;
use super::grid::{Costmap, cost};

/// Precomputed padding stamp.
///
/// Offsets are classified once at construction: the hard disk covers every
/// offset with Euclidean distance ≤ `hard_radius` cells, and soft ring `i`
/// covers offsets at 4-connected distance `i` from the disk. Stamp writes
/// outside the grid are silently dropped.
#[derive(Debug, Clone)]
pub struct PaddingMask {
    /// (dx, dy, imprint value, hard?)
    offsets: Vec<(i64, i64, i8, bool)>,
    hard_value: i8,
}

impl PaddingMask {
    /// Build a stamp for a hard radius in cells and a soft decay profile.
    pub fn new(hard_radius: usize, hard_value: i8, profile: &DecayProfile) -> Self {
        let radius = hard_radius as i64;
        let rings = profile.len() as i64;
        let half = radius + rings;
        let side = (2 * half + 1) as usize;
        let idx = |dx: i64, dy: i64| ((dy + half) as usize) * side + (dx + half) as usize;

        // Ring index per offset: 0 = hard disk, 1..=rings = soft, unassigned otherwise.
        const UNASSIGNED: i64 = i64::MAX;
        let mut ring = vec![UNASSIGNED; side * side];
        let mut queue = VecDeque::new();

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    ring[idx(dx, dy)] = 0;
                    queue.push_back((dx, dy));
                }
            }
        }

        // Brushfire expansion over the 4-neighborhood assigns each soft cell
        // the smallest reachable ring index.
        while let Some((x, y)) = queue.pop_front() {
            let next = ring[idx(x, y)] + 1;
            if next > rings {
                continue;
            }
            for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let (nx, ny) = (x + dx, y + dy);
                if nx < -half || nx > half || ny < -half || ny > half {
                    continue;
                }
                if ring[idx(nx, ny)] == UNASSIGNED {
                    ring[idx(nx, ny)] = next;
                    queue.push_back((nx, ny));
                }
            }
        }

        let mut offsets = Vec::new();
        for dy in -half..=half {
            for dx in -half..=half {
                match ring[idx(dx, dy)] {
                    0 => offsets.push((dx, dy, hard_value, true)),
                    i if i != UNASSIGNED => {
                        offsets.push((dx, dy, profile.values()[(i - 1) as usize], false));
                    }
                    _ => {}
                }
            }
        }

        Self {
            offsets,
            hard_value,
        }
    }

    /// Hard padding value carried by this mask.
    #[inline]
    pub fn hard_value(&self) -> i8 {
        self.hard_value
    }

    /// Imprint the stamp centered on cell (cx, cy).
    ///
    /// Hard offsets lift any cell below the hard value (unknown included);
    /// soft offsets lift known cells below the ring cost, never unknown ones.
    pub fn stamp(&self, grid: &mut Costmap, cx: i64, cy: i64) {
        for &(dx, dy, value, hard) in &self.offsets {
            let (qx, qy) = (cx + dx, cy + dy);
            if !grid.is_valid_cell(qx, qy) {
                continue;
            }
            let (x, y) = (qx as usize, qy as usize);
            let current = grid.get(x, y);
            let lift = if hard {
                current < value
            } else {
                current > cost::UNKNOWN && current < value
            };
            if lift {
                grid.set(x, y, value);
            }
        }
    }

    /// Pad the whole grid: stamp every occupied cell.
    pub fn pad(&self, grid: &mut Costmap) {
        for (x, y) in grid.occupied_cells() {
            self.stamp(grid, x as i64, y as i64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Pose2D;
    use crate::costmap::decay::{DecayProfile, DecayType};

    fn empty_grid(side: usize) -> Costmap {
        Costmap::new(side, side, 0.05, Pose2D::identity(), cost::FREE)
    }

    /// Padding a 5x5 grid with one obstacle at the center: hard radius 2,
    /// one linear soft ring.
    #[test]
    fn test_padding_5x5_single_obstacle() {
        let profile = DecayProfile::generate(DecayType::Linear, 0.05, 0.05);
        assert_eq!(profile.values(), &[98]);
        let mask = PaddingMask::new(2, cost::PADDED, &profile);

        let mut grid = empty_grid(5);
        grid.set(2, 2, cost::OCCUPIED);
        mask.pad(&mut grid);

        assert_eq!(grid.get(2, 2), cost::OCCUPIED);

        for y in 0..5i64 {
            for x in 0..5i64 {
                let (dx, dy) = (x - 2, y - 2);
                let d2 = dx * dx + dy * dy;
                let got = grid.get(x as usize, y as usize);
                if d2 == 0 {
                    continue;
                } else if d2 <= 4 {
                    assert_eq!(got, cost::PADDED, "hard disk at ({}, {})", x, y);
                } else if d2 == 5 {
                    // (±2, ±1) and (±1, ±2): one dilation step past the disk
                    assert_eq!(got, 98, "soft ring at ({}, {})", x, y);
                } else {
                    // Corners stay untouched
                    assert_eq!(got, cost::FREE, "free at ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_padding_is_idempotent() {
        let profile = DecayProfile::generate(DecayType::Exponential, 0.2, 0.05);
        let mask = PaddingMask::new(2, cost::PADDED, &profile);

        let mut grid = empty_grid(20);
        grid.set(5, 5, cost::OCCUPIED);
        grid.set(12, 14, cost::OCCUPIED);
        mask.pad(&mut grid);

        let once = grid.clone();
        mask.pad(&mut grid);
        assert_eq!(grid, once);
    }

    #[test]
    fn test_padding_monotone_refinement() {
        let profile = DecayProfile::generate(DecayType::Reciprocal, 0.3, 0.05);
        let mask = PaddingMask::new(3, cost::PADDED, &profile);

        let mut grid = empty_grid(30);
        // Unknown band plus two obstacles
        for y in 0..30 {
            grid.set(0, y, cost::UNKNOWN);
            grid.set(1, y, cost::UNKNOWN);
        }
        grid.set(4, 10, cost::OCCUPIED);
        grid.set(20, 20, cost::OCCUPIED);

        let before = grid.clone();
        mask.pad(&mut grid);

        for y in 0..30 {
            for x in 0..30 {
                let (old, new) = (before.get(x, y), grid.get(x, y));
                assert!(new <= cost::OCCUPIED);
                if old >= cost::OCCUPIED {
                    assert_eq!(new, old, "occupied cell relaxed at ({}, {})", x, y);
                } else {
                    assert!(new >= old, "cell decreased at ({}, {})", x, y);
                }
                // Unknown is only ever claimed by hard padding
                if old == cost::UNKNOWN && new != cost::UNKNOWN {
                    assert_eq!(new, cost::PADDED);
                }
            }
        }
    }

    #[test]
    fn test_two_sources_take_pairwise_max() {
        let profile = DecayProfile::generate(DecayType::Linear, 0.25, 0.05);
        let mask = PaddingMask::new(2, cost::PADDED, &profile);

        let mut both = empty_grid(40);
        both.set(10, 10, cost::OCCUPIED);
        both.set(14, 10, cost::OCCUPIED);
        mask.pad(&mut both);

        let mut first = empty_grid(40);
        first.set(10, 10, cost::OCCUPIED);
        mask.pad(&mut first);

        let mut second = empty_grid(40);
        second.set(14, 10, cost::OCCUPIED);
        mask.pad(&mut second);

        for y in 0..40 {
            for x in 0..40 {
                // Each source's own occupied cell reads 100 in `both`; the
                // individual grids agree on the max everywhere else too.
                let expect = first.get(x, y).max(second.get(x, y));
                assert_eq!(both.get(x, y), expect, "mismatch at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_stamp_order_independent() {
        let profile = DecayProfile::generate(DecayType::Linear, 0.15, 0.05);
        let mask = PaddingMask::new(2, cost::PADDED, &profile);

        let mut forward = empty_grid(25);
        forward.set(6, 6, cost::OCCUPIED);
        forward.set(9, 7, cost::OCCUPIED);
        let mut reverse = forward.clone();

        mask.stamp(&mut forward, 6, 6);
        mask.stamp(&mut forward, 9, 7);

        mask.stamp(&mut reverse, 9, 7);
        mask.stamp(&mut reverse, 6, 6);

        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_edge_writes_silently_dropped() {
        let profile = DecayProfile::generate(DecayType::Linear, 0.1, 0.05);
        let mask = PaddingMask::new(2, cost::PADDED, &profile);

        let mut grid = empty_grid(5);
        grid.set(0, 0, cost::OCCUPIED);
        mask.pad(&mut grid);

        // Obstacle in the corner: the stamp mostly falls off the grid
        assert_eq!(grid.get(0, 0), cost::OCCUPIED);
        assert_eq!(grid.get(1, 0), cost::PADDED);
        assert_eq!(grid.get(0, 1), cost::PADDED);
    }

    #[test]
    fn test_hard_only_mask() {
        let mask = PaddingMask::new(1, cost::PADDED, &DecayProfile::none());
        let mut grid = empty_grid(5);
        grid.set(2, 2, cost::OCCUPIED);
        mask.pad(&mut grid);

        assert_eq!(grid.get(1, 2), cost::PADDED);
        assert_eq!(grid.get(2, 1), cost::PADDED);
        // Euclidean disk of radius 1 excludes diagonals
        assert_eq!(grid.get(1, 1), cost::FREE);
    }
}
