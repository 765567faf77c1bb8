//! Planner thread: dynamic-window control loop.
//!
//! While a plan is active, each tick snapshots the world, evaluates the
//! dynamic window, publishes the cheapest command and feeds the recovery
//! monitor. Publication order within a tick is command first, then
//! visualization, then sleep. A zero twist is published whenever the
//! planner goes idle, reaches the goal, triggers recovery, or shuts down.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::NavConfig;
use crate::core::types::{Point2D, Twist};
use crate::io::bus::NavTopics;
use crate::planner::cost::{CostGains, TrajectoryScorer};
use crate::planner::dwa::DwaPlanner;
use crate::planner::recovery::{RecoveryMonitor, RecoveryThresholds};
use crate::planner::window::WindowLimits;
use crate::state::commands::{MapCommand, MapCommandSender, request_sync};
use crate::state::shared::SharedWorld;

/// Bound on waiting for the absorption service during recovery.
const SERVICE_TIMEOUT: Duration = Duration::from_secs(5);

/// Planner thread state and logic.
pub struct PlannerThread {
    world: SharedWorld,
    topics: Arc<NavTopics>,
    map_tx: MapCommandSender,
    shutdown: Arc<AtomicBool>,
    planner: DwaPlanner,
    recovery: RecoveryMonitor,
    period: Duration,
    min_dist_goal: f64,
    debug_mode: bool,
    log_times: bool,
    plan_active: bool,
    seen_epoch: u64,
}

impl PlannerThread {
    pub fn new(
        config: &NavConfig,
        world: SharedWorld,
        topics: Arc<NavTopics>,
        map_tx: MapCommandSender,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        let p = &config.planner;
        let limits = WindowLimits {
            min_linear: p.min_linear_vel,
            max_linear: p.max_linear_vel,
            min_angular: p.min_angular_vel,
            max_angular: p.max_angular_vel,
            max_acc: p.max_acc,
            linear_samples: p.res_lin_vel_space,
            angular_samples: p.res_ang_vel_space,
        };
        let scorer = TrajectoryScorer {
            gains: CostGains {
                velocity: p.gain_vel,
                goal_angle: p.gain_goal_angle,
                glob_path: p.gain_glob_path,
                clearance: p.gain_clearance,
            },
            min_linear: p.min_linear_vel,
            max_linear: p.max_linear_vel,
            robot_radius: config.global_costmap.robot_diameter / 2.0,
            safety_distance: config.global_costmap.safety_distance,
            max_dec: p.max_dec,
            clearance_default: 1.0 / (config.local_costmap.length / 2.0),
        };
        let dt = 1.0 / p.frequency;
        let thresholds = RecoveryThresholds {
            min_linear_vel: p.rec_min_lin_vel,
            min_linear_vel_time: p.rec_min_lin_vel_time,
            circling_time: p.rec_circling_time,
            path_time_factor: p.rec_path_time_factor,
            path_length: p.rec_path_length,
        };

        Self {
            world,
            topics,
            map_tx,
            shutdown,
            planner: DwaPlanner::new(limits, scorer, p.lookahead),
            recovery: RecoveryMonitor::new(thresholds, dt),
            period: Duration::from_secs_f64(dt),
            min_dist_goal: p.min_dist_goal,
            debug_mode: config.global.debug_mode,
            log_times: config.global.log_times,
            plan_active: false,
            seen_epoch: 0,
        }
    }

    /// Run the control loop.
    pub fn run(&mut self) {
        info!("Planner thread started at {:?} period", self.period);

        loop {
            if self.shutdown.load(Ordering::Acquire) {
                info!("Planner thread shutting down");
                self.topics.cmd_vel.publish(Twist::zero());
                break;
            }

            let tick_start = Instant::now();
            self.tick();

            if self.log_times {
                debug!("planner tick took {:?}", tick_start.elapsed());
            }

            let elapsed = tick_start.elapsed();
            if elapsed < self.period {
                std::thread::sleep(self.period - elapsed);
            }
        }
    }

    fn tick(&mut self) {
        let (pose, twist, path, epoch, goal, obstacles, have_odom) = {
            let world = self.world.read().unwrap();
            (
                world.pose,
                world.twist,
                world.path.clone(),
                world.path_epoch,
                world.goal,
                world.obstacles.clone(),
                world.have_odom,
            )
        };

        // A freshly received path activates the plan
        if epoch != self.seen_epoch {
            self.seen_epoch = epoch;
            if path.as_ref().is_some_and(|p| !p.is_empty()) {
                info!("Plan activated (epoch {})", epoch);
                self.plan_active = true;
                self.recovery.reset();
            }
        }

        let (path, goal) = match (path, goal) {
            (Some(p), Some(g)) if self.plan_active && !p.is_empty() && have_odom => (p, g),
            _ => {
                // Idle: never retain a previous command
                self.topics.cmd_vel.publish(Twist::zero());
                return;
            }
        };

        let step = self.planner.plan(pose, twist, &path, &obstacles);

        if let Some(reason) = self
            .recovery
            .observe(step.command.linear, step.command.angular, path.len())
        {
            self.trigger_recovery(reason, goal);
            return;
        }

        self.topics.cmd_vel.publish(step.command);
        if self.debug_mode {
            self.topics.trajectory.publish(step.trajectory);
        }

        if pose.position().distance(&goal) < self.min_dist_goal {
            info!("Goal reached at ({:.2}, {:.2})", goal.x, goal.y);
            self.plan_active = false;
            self.topics.cmd_vel.publish(Twist::zero());
            self.recovery.reset();
        }
    }

    /// Stop, absorb the local obstacles into the global costmap and hand the
    /// goal back to the global planner.
    fn trigger_recovery(&mut self, reason: crate::planner::recovery::StuckReason, goal: Point2D) {
        warn!("Plan aborted ({:?}), requesting map absorption", reason);
        self.plan_active = false;
        self.topics.cmd_vel.publish(Twist::zero());

        match request_sync(
            &self.map_tx,
            MapCommand::AddLocalMap {
                command: "stuck".to_string(),
            },
            SERVICE_TIMEOUT,
        ) {
            Ok(true) => debug!("Local obstacles absorbed"),
            Ok(false) => warn!("Absorption service rejected the request"),
            Err(e) => warn!("Absorption service unavailable: {}", e),
        }

        self.topics.goal.publish(goal);
    }
}
