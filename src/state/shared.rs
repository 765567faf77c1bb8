//! Coarse-locked world snapshot shared between all threads.
//!
//! A single lock covers the live pose, twist, scan, path and obstacle set.
//! Sensor callbacks hold it only long enough to write their snapshot; the
//! planner and local-costmap loops hold it only long enough to copy what
//! they need, then release before computing. Snapshots taken within one
//! tick are not mutually time-consistent, which the closed control loop
//! tolerates.

use std::sync::{Arc, RwLock};

use crate::core::types::{LaserScan, Point2D, Pose2D, Timestamped, Twist};

/// Live world snapshot.
#[derive(Debug)]
pub struct WorldState {
    /// Latest map-frame pose of the base (written by the odometry callback)
    pub pose: Pose2D,

    /// Latest measured twist (written by the odometry callback)
    pub twist: Twist,

    /// Whether any odometry sample has arrived yet
    pub have_odom: bool,

    /// Latest laser scan
    pub scan: Option<Timestamped<LaserScan>>,

    /// Active global path, replaced atomically when a new one arrives
    pub path: Option<Arc<Vec<Point2D>>>,

    /// Monotonic counter bumped per received path; the planner activates
    /// when it observes a new value
    pub path_epoch: u64,

    /// Goal point (last waypoint of the active path)
    pub goal: Option<Point2D>,

    /// World-frame obstacle points from the latest local-costmap cycle
    pub obstacles: Arc<Vec<Point2D>>,

    /// Resolution of the current global costmap (meters per cell)
    pub map_resolution: f64,
}

impl WorldState {
    pub fn new() -> Self {
        Self {
            pose: Pose2D::identity(),
            twist: Twist::zero(),
            have_odom: false,
            scan: None,
            path: None,
            path_epoch: 0,
            goal: None,
            obstacles: Arc::new(Vec::new()),
            map_resolution: 0.05,
        }
    }

    /// Record an odometry update.
    pub fn update_odometry(&mut self, pose: Pose2D, twist: Twist) {
        self.pose = pose;
        self.twist = twist;
        self.have_odom = true;
    }

    /// Replace the active path and advance the epoch.
    pub fn replace_path(&mut self, path: Vec<Point2D>) {
        self.goal = path.last().copied();
        self.path = Some(Arc::new(path));
        self.path_epoch += 1;
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle type for the shared world (single coarse lock).
pub type SharedWorld = Arc<RwLock<WorldState>>;

/// Create a fresh shared world.
pub fn create_shared_world() -> SharedWorld {
    Arc::new(RwLock::new(WorldState::new()))
}
