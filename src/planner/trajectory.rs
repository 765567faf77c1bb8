//! Constant-twist trajectory rollout.

use crate::core::types::{Point2D, Pose2D};

/// Angular velocities below this roll out as straight lines.
const OMEGA_EPSILON: f64 = 1e-3;

/// Forward-integrated trajectory of one (ω, v) candidate.
#[derive(Debug, Clone)]
pub struct Rollout {
    /// Sampled points, start state excluded
    pub points: Vec<Point2D>,
    /// Terminal pose after the full horizon
    pub terminal: Pose2D,
}

/// Roll a constant twist forward from `start` over `horizon` seconds in
/// `steps` samples.
///
/// Straight-line integration when |ω| < 10⁻³, otherwise an arc of radius
/// v/ω. The terminal yaw is `ψ + ω·τ` in both cases.
pub fn rollout(start: Pose2D, v: f64, omega: f64, horizon: f64, steps: usize) -> Rollout {
    let mut points = Vec::with_capacity(steps);

    if omega.abs() < OMEGA_EPSILON {
        let (sin_t, cos_t) = start.theta.sin_cos();
        let step = horizon / steps as f64;
        for k in 1..=steps {
            let d = v * step * k as f64;
            points.push(Point2D::new(start.x + d * cos_t, start.y + d * sin_t));
        }
    } else {
        let radius = v / omega;
        let (sin_t, cos_t) = start.theta.sin_cos();
        for k in 1..=steps {
            let swept = start.theta + omega * horizon * k as f64 / steps as f64;
            points.push(Point2D::new(
                start.x - radius * sin_t + radius * swept.sin(),
                start.y + radius * cos_t - radius * swept.cos(),
            ));
        }
    }

    let last = points.last().copied().unwrap_or(start.position());
    Rollout {
        terminal: Pose2D::new(last.x, last.y, start.theta + omega * horizon),
        points,
    }
}
