//! Dynamic Window Approach local planner.
//!
//! Each control tick samples the reachable velocity space, rolls every
//! candidate pair forward under a constant-twist motion model, scores the
//! rollouts against the global path and the live obstacle set, and selects
//! the cheapest pair. A recovery monitor watches the selected commands for
//! stall, circling and path-timeout conditions.

pub mod cost;
pub mod dwa;
pub mod recovery;
pub mod trajectory;
pub mod window;

pub use cost::TrajectoryScorer;
pub use dwa::{DwaPlanner, PlanStep};
pub use recovery::{RecoveryMonitor, StuckReason};
pub use trajectory::Rollout;
pub use window::VelocityWindow;
