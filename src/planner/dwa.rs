//! Per-tick velocity selection.

use crate::core::types::{Point2D, Pose2D, Twist};

use super::cost::TrajectoryScorer;
use super::trajectory::{Rollout, rollout};
use super::window::{VelocityWindow, WindowLimits};

/// Rollout sampling resolution (points per trajectory).
const ROLLOUT_STEPS: usize = 10;

/// Result of one planning tick.
#[derive(Debug, Clone)]
pub struct PlanStep {
    /// Selected velocity command
    pub command: Twist,
    /// Rollout of the selected command, for visualization
    pub trajectory: Vec<Point2D>,
    /// Cost of the selected command
    pub cost: f64,
}

/// Dynamic-window velocity selector.
#[derive(Debug, Clone)]
pub struct DwaPlanner {
    limits: WindowLimits,
    scorer: TrajectoryScorer,
    /// Rollout horizon (s)
    lookahead: f64,
}

impl DwaPlanner {
    pub fn new(limits: WindowLimits, scorer: TrajectoryScorer, lookahead: f64) -> Self {
        Self {
            limits,
            scorer,
            lookahead,
        }
    }

    /// Evaluate the full dynamic window and return the cheapest pair.
    ///
    /// Every cell of the window is rolled out and scored; the running
    /// minimum wins. Vetoed (infinite-cost) pairs are only selected when
    /// nothing finite exists.
    pub fn plan(
        &self,
        pose: Pose2D,
        twist: Twist,
        path: &[Point2D],
        obstacles: &[Point2D],
    ) -> PlanStep {
        let window = VelocityWindow::sample(twist.linear, twist.angular, self.lookahead, &self.limits);

        let mut best: Option<(f64, f64, f64, Rollout)> = None;
        for &omega in &window.angular {
            for &v in &window.linear {
                let roll = rollout(pose, v, omega, self.lookahead, ROLLOUT_STEPS);
                let cost = self.scorer.score(v, &roll, path, obstacles);
                let better = match &best {
                    Some((best_cost, _, _, _)) => cost < *best_cost,
                    None => true,
                };
                if better {
                    best = Some((cost, v, omega, roll));
                }
            }
        }

        let (cost, v, omega, roll) =
            best.expect("dynamic window is never empty");
        PlanStep {
            command: Twist::new(v, omega),
            trajectory: roll.points,
            cost,
        }
    }
}
