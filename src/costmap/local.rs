//! Local costmap construction from laser scans.
//!
//! Each cycle the latest scan is reduced two ways: to sensor-frame points
//! destined for the world-frame obstacle cloud, and to an ego-centered
//! occupancy grid with the robot at the center cell. Only beams shorter
//! than half the local grid side length participate.

use crate::core::types::{LaserScan, Point2D, Pose2D};

use super::grid::{Costmap, cost};

/// Sensor-frame points for every beam with range below `half_length`.
///
/// Beam `i` at angle `θ = angle_min + i·angle_increment` yields
/// `(r·cos θ, r·sin θ)`; non-finite ranges are skipped.
pub fn sensor_points(scan: &LaserScan, half_length: f64) -> Vec<Point2D> {
    let mut points = Vec::new();
    for (i, &range) in scan.ranges.iter().enumerate() {
        if !range.is_finite() || range <= 0.0 || range >= half_length {
            continue;
        }
        let angle = scan.angle_at(i);
        points.push(Point2D::new(range * angle.cos(), range * angle.sin()));
    }
    points
}

/// Build the ego-centered local grid for one scan.
///
/// The grid has odd side length `⌈length/res⌉` with the robot at the center
/// cell and world origin `(x − length/2, y − length/2)`. Each qualifying
/// beam lands at the cell offset `⌊r·cos(θ+ψ)/res⌋, ⌊r·sin(θ+ψ)/res⌋` from
/// the center and is marked occupied; off-grid beams are dropped.
pub fn ego_grid(scan: &LaserScan, pose: Pose2D, length: f64, resolution: f64) -> Costmap {
    let mut side = (length / resolution).ceil() as usize;
    if side % 2 == 0 {
        side += 1;
    }
    let origin = Pose2D::new(pose.x - length / 2.0, pose.y - length / 2.0, 0.0);
    let mut grid = Costmap::new(side, side, resolution, origin, cost::FREE);

    let center = (side / 2) as i64;
    let half_length = length / 2.0;

    for (i, &range) in scan.ranges.iter().enumerate() {
        if !range.is_finite() || range <= 0.0 || range >= half_length {
            continue;
        }
        let heading = scan.angle_at(i) + pose.theta;
        let dx = range * heading.cos();
        let dy = range * heading.sin();
        let cx = center + (dx / resolution).floor() as i64;
        let cy = center + (dy / resolution).floor() as i64;
        if grid.is_valid_cell(cx, cy) {
            grid.set(cx as usize, cy as usize, cost::OCCUPIED);
        }
    }

    grid
}
