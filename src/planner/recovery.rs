//! Stuck detection.
//!
//! Three independent triggers are evaluated on every selected command:
//! a low-velocity stall, persistent one-sided circling, and an overall
//! path timeout proportional to the path length. Counters reset on
//! trigger and on goal-reached.

use log::warn;

/// Why the planner considers itself stuck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StuckReason {
    /// Selected linear velocity stayed below the threshold too long
    LowVelocity,
    /// Selected angular velocity kept one sign too long
    Circling,
    /// The plan ran longer than its length-proportional budget
    PathTimeout,
}

/// Tick thresholds for the three triggers.
#[derive(Debug, Clone)]
pub struct RecoveryThresholds {
    /// Linear velocities below this count as stalled (m/s)
    pub min_linear_vel: f64,
    /// Stall duration before triggering (s)
    pub min_linear_vel_time: f64,
    /// One-sided rotation duration before triggering (s)
    pub circling_time: f64,
    /// Seconds of budget per path waypoint
    pub path_time_factor: f64,
    /// Paths at or below this many waypoints never time out
    pub path_length: usize,
}

/// Per-plan recovery counters.
#[derive(Debug)]
pub struct RecoveryMonitor {
    thresholds: RecoveryThresholds,
    /// Control period (s)
    dt: f64,
    low_velocity_ticks: u32,
    circling_positive_ticks: u32,
    circling_negative_ticks: u32,
    plan_ticks: u64,
}

impl RecoveryMonitor {
    pub fn new(thresholds: RecoveryThresholds, dt: f64) -> Self {
        Self {
            thresholds,
            dt,
            low_velocity_ticks: 0,
            circling_positive_ticks: 0,
            circling_negative_ticks: 0,
            plan_ticks: 0,
        }
    }

    /// Reset all counters (new plan, goal reached, or trigger fired).
    pub fn reset(&mut self) {
        self.low_velocity_ticks = 0;
        self.circling_positive_ticks = 0;
        self.circling_negative_ticks = 0;
        self.plan_ticks = 0;
    }

    /// Number of positive-circling ticks (test access).
    pub fn circling_positive_ticks(&self) -> u32 {
        self.circling_positive_ticks
    }

    /// Number of negative-circling ticks (test access).
    pub fn circling_negative_ticks(&self) -> u32 {
        self.circling_negative_ticks
    }

    /// Feed the selected command of one tick; returns the first trigger
    /// that fires, resetting the counters when one does.
    pub fn observe(&mut self, v: f64, omega: f64, path_len: usize) -> Option<StuckReason> {
        self.plan_ticks += 1;

        if v < self.thresholds.min_linear_vel {
            self.low_velocity_ticks += 1;
        } else {
            self.low_velocity_ticks = 0;
        }

        if omega > 0.0 {
            self.circling_positive_ticks += 1;
            self.circling_negative_ticks = 0;
        } else if omega < 0.0 {
            self.circling_negative_ticks += 1;
            self.circling_positive_ticks = 0;
        } else {
            self.circling_positive_ticks = 0;
            self.circling_negative_ticks = 0;
        }

        let reason = self.check(path_len);
        if let Some(reason) = reason {
            warn!("Recovery triggered: {:?}", reason);
            self.reset();
        }
        reason
    }

    fn check(&self, path_len: usize) -> Option<StuckReason> {
        let stall_limit = (self.thresholds.min_linear_vel_time / self.dt) as u32;
        if stall_limit > 0 && self.low_velocity_ticks >= stall_limit {
            return Some(StuckReason::LowVelocity);
        }

        let circle_limit = (self.thresholds.circling_time / self.dt) as u32;
        if circle_limit > 0
            && (self.circling_positive_ticks >= circle_limit
                || self.circling_negative_ticks >= circle_limit)
        {
            return Some(StuckReason::Circling);
        }

        if path_len > self.thresholds.path_length {
            let budget = (self.thresholds.path_time_factor * path_len as f64 / self.dt) as u64;
            if self.plan_ticks >= budget {
                return Some(StuckReason::PathTimeout);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> RecoveryThresholds {
        RecoveryThresholds {
            min_linear_vel: 0.05,
            min_linear_vel_time: 2.0,
            circling_time: 3.0,
            path_time_factor: 0.5,
            path_length: 10,
        }
    }

    fn monitor() -> RecoveryMonitor {
        RecoveryMonitor::new(thresholds(), 0.1)
    }

    /// 20 consecutive slow ticks at 10 Hz fire the stall trigger exactly
    /// once.
    #[test]
    fn test_stall_trigger_after_two_seconds() {
        let mut m = monitor();
        for tick in 1..=19 {
            assert_eq!(m.observe(0.01, 0.0, 5), None, "tick {}", tick);
        }
        assert_eq!(m.observe(0.01, 0.0, 5), Some(StuckReason::LowVelocity));
        // Counters reset: the next slow tick starts over
        assert_eq!(m.observe(0.01, 0.0, 5), None);
    }

    #[test]
    fn test_fast_tick_resets_stall_counter() {
        let mut m = monitor();
        for _ in 0..15 {
            assert_eq!(m.observe(0.01, 0.0, 5), None);
        }
        m.observe(0.2, 0.0, 5);
        for _ in 0..19 {
            assert_eq!(m.observe(0.01, 0.0, 5), None);
        }
        assert_eq!(m.observe(0.01, 0.0, 5), Some(StuckReason::LowVelocity));
    }

    /// 30 one-sided ticks at 10 Hz fire the circling trigger; the
    /// opposite-sign counter stays at zero throughout.
    #[test]
    fn test_circling_trigger() {
        let mut m = monitor();
        for tick in 1..=29 {
            assert_eq!(m.observe(0.2, 0.4, 5), None, "tick {}", tick);
            assert_eq!(m.circling_negative_ticks(), 0);
        }
        assert_eq!(m.observe(0.2, 0.4, 5), Some(StuckReason::Circling));
    }

    #[test]
    fn test_sign_flip_resets_circling() {
        let mut m = monitor();
        for _ in 0..29 {
            m.observe(0.2, 0.4, 5);
        }
        m.observe(0.2, -0.4, 5);
        assert_eq!(m.circling_positive_ticks(), 0);
        for _ in 0..28 {
            assert_eq!(m.observe(0.2, -0.4, 5), None);
        }
        assert_eq!(m.observe(0.2, -0.4, 5), Some(StuckReason::Circling));
    }

    #[test]
    fn test_path_timeout_needs_long_path() {
        // Budget: 0.5 s per waypoint → 20 waypoints = 100 ticks at 10 Hz
        let mut m = monitor();
        for tick in 1..=99 {
            assert_eq!(m.observe(0.2, 0.0, 20), None, "tick {}", tick);
        }
        assert_eq!(m.observe(0.2, 0.0, 20), Some(StuckReason::PathTimeout));

        // Short paths never time out
        let mut m = monitor();
        for _ in 0..500 {
            assert_eq!(m.observe(0.2, 0.0, 10), None);
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut m = monitor();
        for _ in 0..15 {
            m.observe(0.01, 0.4, 20);
        }
        m.reset();
        for _ in 0..19 {
            assert_eq!(m.observe(0.01, 0.0, 5), None);
        }
    }
}
