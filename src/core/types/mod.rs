//! Message and state types consumed and produced by the navigation stack.

mod odometry;
mod pose;
mod scan;
mod timestamped;
mod twist;

pub use odometry::{Odometry, Quaternion};
pub use pose::{Point2D, Pose2D};
pub use scan::LaserScan;
pub use timestamped::{Timestamped, now_us};
pub use twist::Twist;
