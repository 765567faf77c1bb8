//! Core math and message types shared by the costmap and planner modules.

pub mod math;
pub mod types;
