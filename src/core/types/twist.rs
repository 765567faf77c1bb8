//! Velocity command type.

use serde::{Deserialize, Serialize};

/// A planar velocity command: forward speed plus yaw rate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Twist {
    /// Linear velocity along the robot x axis (m/s)
    pub linear: f64,
    /// Angular velocity about the robot z axis (rad/s)
    pub angular: f64,
}

impl Twist {
    /// Create a new twist.
    #[inline]
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    /// The stop command.
    #[inline]
    pub fn zero() -> Self {
        Self {
            linear: 0.0,
            angular: 0.0,
        }
    }
}
