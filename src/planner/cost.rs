//! Trajectory cost evaluation.
//!
//! A candidate (ω, v) pair is scored as a weighted sum of four terms:
//! velocity (prefer fast), goal heading (prefer pointing at the goal from
//! the terminal state), path proximity (prefer ending near the global
//! path), and obstacle clearance (inverse distance, infinite inside the
//! braking envelope).

use crate::core::math::normalize_angle;
use crate::core::types::Point2D;

use super::trajectory::Rollout;

/// Cost term weights. All gains are non-negative.
#[derive(Debug, Clone)]
pub struct CostGains {
    pub velocity: f64,
    pub goal_angle: f64,
    pub glob_path: f64,
    pub clearance: f64,
}

/// Scoring configuration shared by every candidate of a tick.
#[derive(Debug, Clone)]
pub struct TrajectoryScorer {
    pub gains: CostGains,
    pub min_linear: f64,
    pub max_linear: f64,
    /// Robot body radius in meters
    pub robot_radius: f64,
    /// Extra clearance beyond the body radius
    pub safety_distance: f64,
    /// Deceleration bound used for the braking envelope (m/s²)
    pub max_dec: f64,
    /// Clearance cost when no obstacle is in reach (the inverse of the
    /// local-costmap half length)
    pub clearance_default: f64,
}

impl TrajectoryScorer {
    /// Velocity term: 0 at max speed, 1 at min speed.
    pub fn velocity_cost(&self, v: f64) -> f64 {
        (self.max_linear - v) / (self.max_linear - self.min_linear)
    }

    /// Goal-heading term: terminal misalignment with the goal, normalized
    /// to [0, 1].
    pub fn goal_heading_cost(&self, rollout: &Rollout, goal: &Point2D) -> f64 {
        let t = &rollout.terminal;
        let bearing = (goal.y - t.y).atan2(goal.x - t.x);
        normalize_angle(bearing - t.theta).abs() / std::f64::consts::PI
    }

    /// Path term: distance from the terminal point to the nearest waypoint.
    pub fn path_cost(&self, rollout: &Rollout, path: &[Point2D]) -> f64 {
        let terminal = rollout.terminal.position();
        path.iter()
            .map(|p| p.distance(&terminal))
            .fold(f64::INFINITY, f64::min)
    }

    /// Clearance term: infinite inside the braking envelope, otherwise the
    /// inverse of the closest approach. The finite default applies when no
    /// obstacle is in reach.
    pub fn clearance_cost(&self, rollout: &Rollout, obstacles: &[Point2D], v: f64) -> f64 {
        if obstacles.is_empty() {
            return self.clearance_default;
        }

        let mut min_dist = f64::INFINITY;
        for point in &rollout.points {
            for obstacle in obstacles {
                min_dist = min_dist.min(point.distance(obstacle));
            }
        }

        let braking = v * v / (2.0 * self.max_dec);
        if min_dist < self.safety_distance + self.robot_radius + braking {
            f64::INFINITY
        } else {
            1.0 / min_dist
        }
    }

    /// Total weighted cost of one candidate.
    ///
    /// A vetoed clearance makes the total infinite regardless of gains.
    pub fn score(&self, v: f64, rollout: &Rollout, path: &[Point2D], obstacles: &[Point2D]) -> f64 {
        let clearance = self.clearance_cost(rollout, obstacles, v);
        if clearance.is_infinite() {
            return f64::INFINITY;
        }
        let goal = match path.last() {
            Some(g) => *g,
            None => return f64::INFINITY,
        };

        self.gains.velocity * self.velocity_cost(v)
            + self.gains.goal_angle * self.goal_heading_cost(rollout, &goal)
            + self.gains.glob_path * self.path_cost(rollout, path)
            + self.gains.clearance * clearance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Pose2D;
    use crate::planner::trajectory::rollout;
    use approx::assert_relative_eq;

    fn scorer() -> TrajectoryScorer {
        TrajectoryScorer {
            gains: CostGains {
                velocity: 1.0,
                goal_angle: 1.0,
                glob_path: 1.0,
                clearance: 1.0,
            },
            min_linear: 0.0,
            max_linear: 0.22,
            robot_radius: 0.12,
            safety_distance: 0.05,
            max_dec: 0.5,
            clearance_default: 1.0 / 1.65,
        }
    }

    #[test]
    fn test_velocity_cost_range() {
        let s = scorer();
        assert_relative_eq!(s.velocity_cost(0.22), 0.0);
        assert_relative_eq!(s.velocity_cost(0.0), 1.0);
        assert_relative_eq!(s.velocity_cost(0.11), 0.5);
    }

    #[test]
    fn test_goal_heading_aligned_is_zero() {
        let s = scorer();
        let roll = rollout(Pose2D::identity(), 0.2, 0.0, 1.0, 10);
        // Goal straight ahead of the terminal state
        assert_relative_eq!(
            s.goal_heading_cost(&roll, &Point2D::new(5.0, 0.0)),
            0.0,
            epsilon = 1e-12
        );
        // Goal straight behind scores 1
        assert_relative_eq!(
            s.goal_heading_cost(&roll, &Point2D::new(-5.0, 0.0)),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_path_cost_is_min_distance() {
        let s = scorer();
        let roll = rollout(Pose2D::identity(), 0.1, 0.0, 1.0, 10);
        // Terminal at (0.1, 0)
        let path = vec![Point2D::new(1.0, 0.0), Point2D::new(0.1, 0.3)];
        assert_relative_eq!(s.path_cost(&roll, &path), 0.3, epsilon = 1e-9);
    }

    /// Braking envelope veto: passing 0.10 m from an obstacle at 0.2 m/s
    /// with 0.12 m body and 0.05 m margin needs 0.21 m + braking distance.
    #[test]
    fn test_obstacle_veto() {
        let s = scorer();
        let roll = rollout(Pose2D::identity(), 0.2, 0.0, 1.0, 20);
        // Obstacle 0.10 m left of the trajectory midpoint
        let obstacles = vec![Point2D::new(0.1, 0.1)];
        assert!(s.clearance_cost(&roll, &obstacles, 0.2).is_infinite());
        assert!(
            s.score(0.2, &roll, &[Point2D::new(1.0, 0.0)], &obstacles)
                .is_infinite()
        );
    }

    #[test]
    fn test_clearance_inverse_distance() {
        let s = scorer();
        let roll = rollout(Pose2D::identity(), 0.1, 0.0, 1.0, 10);
        // Obstacle 2 m away: outside the envelope
        let obstacles = vec![Point2D::new(0.0, 2.0)];
        let cost = s.clearance_cost(&roll, &obstacles, 0.1);
        assert!(cost > 0.0 && cost.is_finite());
        assert_relative_eq!(cost, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_empty_obstacles_default() {
        let s = scorer();
        let roll = rollout(Pose2D::identity(), 0.1, 0.0, 1.0, 10);
        assert_relative_eq!(s.clearance_cost(&roll, &[], 0.1), 1.0 / 1.65);
    }

    #[test]
    fn test_zero_clearance_gain_still_vetoes() {
        let mut s = scorer();
        s.gains.clearance = 0.0;
        let roll = rollout(Pose2D::identity(), 0.2, 0.0, 1.0, 20);
        let obstacles = vec![Point2D::new(0.1, 0.0)];
        assert!(
            s.score(0.2, &roll, &[Point2D::new(1.0, 0.0)], &obstacles)
                .is_infinite()
        );
    }
}
