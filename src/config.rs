//! Configuration loading for PathaNav

use std::path::Path;

use serde::Deserialize;

use crate::costmap::DecayType;
use crate::error::{NavError, Result};

/// Main configuration structure
#[derive(Clone, Debug, Deserialize, Default)]
pub struct NavConfig {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub global_costmap: GlobalCostmapConfig,
    #[serde(default)]
    pub local_costmap: LocalCostmapConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub mount: MountConfig,
}

/// Process-wide settings
#[derive(Clone, Debug, Deserialize)]
pub struct GlobalConfig {
    /// Map number fetched at startup
    #[serde(default)]
    pub init_map_nr: i8,

    /// Publish the selected-trajectory visualization
    #[serde(default)]
    pub debug_mode: bool,

    /// Log per-tick loop timing
    #[serde(default)]
    pub log_times: bool,
}

/// Global costmap padding parameters
#[derive(Clone, Debug, Deserialize)]
pub struct GlobalCostmapConfig {
    /// Robot body diameter in meters (default: 0.24)
    #[serde(default = "default_robot_diameter")]
    pub robot_diameter: f64,

    /// Hard clearance beyond the body radius in meters (default: 0.05)
    #[serde(default = "default_safety_distance")]
    pub safety_distance: f64,

    /// Hard padding cell value (default: 99)
    #[serde(default = "default_padded_val")]
    pub padded_val: i8,

    /// Soft decay law (default: exponential)
    #[serde(default = "default_decay_type")]
    pub decay_type: DecayType,

    /// Soft padding reach beyond the hard radius in meters (default: 0.3)
    #[serde(default = "default_decay_distance")]
    pub decay_distance: f64,

    /// Disable to pad hard-only
    #[serde(default = "default_apply_soft_padding")]
    pub apply_soft_padding: bool,

    /// Directory holding `map_<id>.yaml` + PGM pairs (default: "maps")
    #[serde(default = "default_maps_dir")]
    pub maps_dir: String,
}

/// Local costmap parameters
#[derive(Clone, Debug, Deserialize)]
pub struct LocalCostmapConfig {
    /// Side length of the ego grid in meters (default: 3.3)
    #[serde(default = "default_local_length")]
    pub length: f64,

    /// Local loop rate in Hz (default: 5.0)
    #[serde(default = "default_local_frequency")]
    pub frequency: f64,

    /// Laser scan rate in Hz; sizes the stamped odometry buffer
    #[serde(default = "default_scan_frequency")]
    pub frequency_scan: f64,
}

/// Planner and recovery parameters
#[derive(Clone, Debug, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub min_linear_vel: f64,
    #[serde(default = "default_max_linear_vel")]
    pub max_linear_vel: f64,
    #[serde(default = "default_min_angular_vel")]
    pub min_angular_vel: f64,
    #[serde(default = "default_max_angular_vel")]
    pub max_angular_vel: f64,

    /// Acceleration bound for the dynamic window (default: 0.5)
    #[serde(default = "default_max_acc")]
    pub max_acc: f64,

    /// Deceleration bound for the braking envelope (default: 0.5)
    #[serde(default = "default_max_dec")]
    pub max_dec: f64,

    /// Goal-reached radius in meters (default: 0.1)
    #[serde(default = "default_min_dist_goal")]
    pub min_dist_goal: f64,

    /// Rollout horizon in seconds (default: 1.5)
    #[serde(default = "default_lookahead")]
    pub lookahead: f64,

    /// Linear samples in the dynamic window (default: 5)
    #[serde(default = "default_res_lin_vel_space")]
    pub res_lin_vel_space: usize,

    /// Angular samples in the dynamic window (default: 11)
    #[serde(default = "default_res_ang_vel_space")]
    pub res_ang_vel_space: usize,

    /// Control rate in Hz (default: 10.0)
    #[serde(default = "default_planner_frequency")]
    pub frequency: f64,

    #[serde(default = "default_gain_vel")]
    pub gain_vel: f64,
    #[serde(default = "default_gain_glob_path")]
    pub gain_glob_path: f64,
    #[serde(default = "default_gain_goal_angle")]
    pub gain_goal_angle: f64,
    #[serde(default = "default_gain_clearance")]
    pub gain_clearance: f64,

    // --- Recovery thresholds ---
    /// Selected velocities below this count as stalled (default: 0.05)
    #[serde(default = "default_rec_min_lin_vel")]
    pub rec_min_lin_vel: f64,

    /// Stall duration before recovery in seconds (default: 2.0)
    #[serde(default = "default_rec_min_lin_vel_time")]
    pub rec_min_lin_vel_time: f64,

    /// One-sided rotation duration before recovery in seconds (default: 3.0)
    #[serde(default = "default_rec_circling_time")]
    pub rec_circling_time: f64,

    /// Seconds of plan budget per path waypoint (default: 0.5)
    #[serde(default = "default_rec_path_time_factor")]
    pub rec_path_time_factor: f64,

    /// Paths at or below this many waypoints never time out (default: 10)
    #[serde(default = "default_rec_path_length")]
    pub rec_path_length: usize,
}

/// Static laser mount on the base
#[derive(Clone, Debug, Deserialize)]
pub struct MountConfig {
    #[serde(default = "default_laser_x")]
    pub laser_x: f64,
    #[serde(default)]
    pub laser_y: f64,
    #[serde(default)]
    pub laser_yaw: f64,
}

// Default value functions
fn default_robot_diameter() -> f64 {
    0.24
}
fn default_safety_distance() -> f64 {
    0.05
}
fn default_padded_val() -> i8 {
    99
}
fn default_decay_type() -> DecayType {
    DecayType::Exponential
}
fn default_decay_distance() -> f64 {
    0.3
}
fn default_apply_soft_padding() -> bool {
    true
}
fn default_maps_dir() -> String {
    "maps".to_string()
}
fn default_local_length() -> f64 {
    3.3
}
fn default_local_frequency() -> f64 {
    5.0
}
fn default_scan_frequency() -> f64 {
    10.0
}
fn default_max_linear_vel() -> f64 {
    0.22
}
fn default_min_angular_vel() -> f64 {
    -1.0
}
fn default_max_angular_vel() -> f64 {
    1.0
}
fn default_max_acc() -> f64 {
    0.5
}
fn default_max_dec() -> f64 {
    0.5
}
fn default_min_dist_goal() -> f64 {
    0.1
}
fn default_lookahead() -> f64 {
    1.5
}
fn default_res_lin_vel_space() -> usize {
    5
}
fn default_res_ang_vel_space() -> usize {
    11
}
fn default_planner_frequency() -> f64 {
    10.0
}
fn default_gain_vel() -> f64 {
    1.0
}
fn default_gain_glob_path() -> f64 {
    1.2
}
fn default_gain_goal_angle() -> f64 {
    2.0
}
fn default_gain_clearance() -> f64 {
    1.0
}
fn default_rec_min_lin_vel() -> f64 {
    0.05
}
fn default_rec_min_lin_vel_time() -> f64 {
    2.0
}
fn default_rec_circling_time() -> f64 {
    3.0
}
fn default_rec_path_time_factor() -> f64 {
    0.5
}
fn default_rec_path_length() -> usize {
    10
}
fn default_laser_x() -> f64 {
    0.08
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            init_map_nr: 0,
            debug_mode: false,
            log_times: false,
        }
    }
}

impl Default for GlobalCostmapConfig {
    fn default() -> Self {
        Self {
            robot_diameter: default_robot_diameter(),
            safety_distance: default_safety_distance(),
            padded_val: default_padded_val(),
            decay_type: default_decay_type(),
            decay_distance: default_decay_distance(),
            apply_soft_padding: default_apply_soft_padding(),
            maps_dir: default_maps_dir(),
        }
    }
}

impl Default for LocalCostmapConfig {
    fn default() -> Self {
        Self {
            length: default_local_length(),
            frequency: default_local_frequency(),
            frequency_scan: default_scan_frequency(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_linear_vel: 0.0,
            max_linear_vel: default_max_linear_vel(),
            min_angular_vel: default_min_angular_vel(),
            max_angular_vel: default_max_angular_vel(),
            max_acc: default_max_acc(),
            max_dec: default_max_dec(),
            min_dist_goal: default_min_dist_goal(),
            lookahead: default_lookahead(),
            res_lin_vel_space: default_res_lin_vel_space(),
            res_ang_vel_space: default_res_ang_vel_space(),
            frequency: default_planner_frequency(),
            gain_vel: default_gain_vel(),
            gain_glob_path: default_gain_glob_path(),
            gain_goal_angle: default_gain_goal_angle(),
            gain_clearance: default_gain_clearance(),
            rec_min_lin_vel: default_rec_min_lin_vel(),
            rec_min_lin_vel_time: default_rec_min_lin_vel_time(),
            rec_circling_time: default_rec_circling_time(),
            rec_path_time_factor: default_rec_path_time_factor(),
            rec_path_length: default_rec_path_length(),
        }
    }
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            laser_x: default_laser_x(),
            laser_y: 0.0,
            laser_yaw: 0.0,
        }
    }
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("Failed to read config file: {}", e)))?;
        let config: NavConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the stack cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.local_costmap.length <= 0.0 {
            return Err(NavError::Config("local_costmap.length must be > 0".into()));
        }
        if self.local_costmap.frequency <= 0.0 || self.planner.frequency <= 0.0 {
            return Err(NavError::Config("loop frequencies must be > 0".into()));
        }
        if self.planner.max_linear_vel <= self.planner.min_linear_vel {
            return Err(NavError::Config(
                "max_linear_vel must exceed min_linear_vel".into(),
            ));
        }
        if self.planner.max_angular_vel <= self.planner.min_angular_vel {
            return Err(NavError::Config(
                "max_angular_vel must exceed min_angular_vel".into(),
            ));
        }
        if self.planner.max_acc <= 0.0 || self.planner.max_dec <= 0.0 {
            return Err(NavError::Config("acceleration bounds must be > 0".into()));
        }
        if self.planner.lookahead <= 0.0 {
            return Err(NavError::Config("lookahead must be > 0".into()));
        }
        if self.planner.res_lin_vel_space < 2 || self.planner.res_ang_vel_space < 2 {
            return Err(NavError::Config(
                "velocity space resolutions must be at least 2".into(),
            ));
        }
        let gains = [
            self.planner.gain_vel,
            self.planner.gain_glob_path,
            self.planner.gain_goal_angle,
            self.planner.gain_clearance,
        ];
        if gains.iter().any(|g| *g < 0.0) {
            return Err(NavError::Config("gains must be non-negative".into()));
        }
        if self.global_costmap.robot_diameter <= 0.0 {
            return Err(NavError::Config("robot_diameter must be > 0".into()));
        }
        if !(1..=99).contains(&self.global_costmap.padded_val) {
            return Err(NavError::Config("padded_val must be in 1..=99".into()));
        }
        Ok(())
    }
}
