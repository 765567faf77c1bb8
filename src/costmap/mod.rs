//! Global and local costmap generation.
//!
//! The global costmap is a padded copy of the static map: occupied cells
//! imprint a hard-forbidden disk plus a graded soft-cost ring around
//! themselves. The local costmap is a rolling ego-centered grid rebuilt from
//! the latest laser scan every cycle.

pub mod decay;
pub mod generator;
pub mod grid;
pub mod local;
pub mod padding;

pub use decay::{DecayProfile, DecayType};
pub use generator::{CostmapGenerator, PaddingSettings};
pub use grid::{Costmap, cost};
pub use local::{ego_grid, sensor_points};
pub use padding::PaddingMask;
