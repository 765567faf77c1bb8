//! Odometry message as consumed from the odometry source.

use serde::{Deserialize, Serialize};

use super::pose::Pose2D;
use super::twist::Twist;

/// Orientation quaternion (x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    /// Quaternion for a pure yaw rotation.
    pub fn from_yaw(yaw: f64) -> Self {
        let half = yaw * 0.5;
        Self {
            x: 0.0,
            y: 0.0,
            z: half.sin(),
            w: half.cos(),
        }
    }

    /// Yaw component of the rotation.
    pub fn yaw(&self) -> f64 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        siny_cosp.atan2(cosy_cosp)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

/// Odometry sample: position, orientation and current twist, in the odom frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Odometry {
    /// Position x in meters
    pub x: f64,
    /// Position y in meters
    pub y: f64,
    /// Orientation as a quaternion
    pub orientation: Quaternion,
    /// Measured twist (linear.x, angular.z)
    pub twist: Twist,
}

impl Odometry {
    /// Planar pose of the base in the odom frame.
    pub fn pose(&self) -> Pose2D {
        Pose2D::new(self.x, self.y, self.orientation.yaw())
    }
}
