//! PathaNav - costmap generation and dynamic-window local planning.
//!
//! Two tightly coupled subsystems behind one shared world state:
//!
//! - **Costmap generator**: owns the padded global costmap (hard-forbidden
//!   disks plus graded soft rings around every occupied cell), services
//!   map-switch / clear / local-absorption requests, and rebuilds the
//!   rolling ego-centered local costmap from laser scans.
//! - **Dynamic window planner**: samples the reachable velocity space every
//!   control tick, scores constant-twist rollouts against the global path
//!   and the live obstacle cloud, and publishes the cheapest command. A
//!   recovery monitor detects stall, circling and path-timeout conditions
//!   and feeds transient obstacles back into the global costmap.
//!
//! External collaborators (map provider, laser driver, odometry source,
//! global planner) enter through channels and the `MapProvider` /
//! `TransformBuffer` seams; see `threads::spawn_threads` for the wiring.

pub mod config;
pub mod core;
pub mod costmap;
pub mod error;
pub mod io;
pub mod planner;
pub mod state;
pub mod threads;

pub use config::NavConfig;
pub use core::types::{LaserScan, Odometry, Point2D, Pose2D, Quaternion, Timestamped, Twist};
pub use costmap::{
    Costmap, CostmapGenerator, DecayProfile, DecayType, PaddingMask, PaddingSettings, cost,
};
pub use error::{NavError, Result};
pub use io::{FileMapProvider, FrameId, MapProvider, NavTopics, Publisher, TransformBuffer};
pub use planner::{DwaPlanner, RecoveryMonitor, StuckReason, TrajectoryScorer};
pub use state::{MapCommand, SharedWorld, WorldState, create_shared_world};
pub use threads::{InputReceivers, ThreadHandles, spawn_threads};
