//! Input thread: sensor fan-in.
//!
//! Waits on the odometry, scan and path channels with `select!` and writes
//! each message into the shared world under the coarse lock. Critical
//! sections only store the snapshot the message produced; no computation
//! happens while holding the lock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, select};
use log::{debug, info, warn};

use crate::core::types::{LaserScan, Odometry, Point2D, Timestamped};
use crate::io::transforms::TransformBuffer;
use crate::state::shared::SharedWorld;

/// Receiving ends of the consumed topics.
pub struct InputReceivers {
    /// Odometry samples from the odometry source
    pub odom: Receiver<Timestamped<Odometry>>,
    /// Laser scans from the laser driver
    pub scan: Receiver<Timestamped<LaserScan>>,
    /// Global paths from the global planner
    pub path: Receiver<Vec<Point2D>>,
}

/// Input thread state and logic.
pub struct InputThread {
    world: SharedWorld,
    tf: Arc<TransformBuffer>,
    receivers: InputReceivers,
    shutdown: Arc<AtomicBool>,
}

impl InputThread {
    pub fn new(
        world: SharedWorld,
        tf: Arc<TransformBuffer>,
        receivers: InputReceivers,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            world,
            tf,
            receivers,
            shutdown,
        }
    }

    /// Run the input fan-in loop.
    pub fn run(&mut self) {
        info!("Input thread started");

        loop {
            if self.shutdown.load(Ordering::Acquire) {
                info!("Input thread shutting down");
                break;
            }

            select! {
                recv(self.receivers.odom) -> msg => match msg {
                    Ok(sample) => self.handle_odom(sample),
                    Err(_) => {
                        warn!("Odometry channel disconnected, input thread exiting");
                        break;
                    }
                },
                recv(self.receivers.scan) -> msg => match msg {
                    Ok(sample) => self.handle_scan(sample),
                    Err(_) => {
                        warn!("Scan channel disconnected, input thread exiting");
                        break;
                    }
                },
                recv(self.receivers.path) -> msg => match msg {
                    Ok(path) => self.handle_path(path),
                    Err(_) => {
                        warn!("Path channel disconnected, input thread exiting");
                        break;
                    }
                },
                default(Duration::from_millis(100)) => {}
            }
        }
    }

    fn handle_odom(&self, sample: Timestamped<Odometry>) {
        let pose_in_odom = sample.data.pose();
        self.tf
            .insert_odom_sample(Timestamped::new(pose_in_odom, sample.timestamp_us));

        let pose_in_map = self.tf.base_in_map(&pose_in_odom);
        self.world
            .write()
            .unwrap()
            .update_odometry(pose_in_map, sample.data.twist);
    }

    fn handle_scan(&self, sample: Timestamped<LaserScan>) {
        self.world.write().unwrap().scan = Some(sample);
    }

    fn handle_path(&self, path: Vec<Point2D>) {
        if path.is_empty() {
            debug!("Ignoring empty global path");
            return;
        }
        info!("New global path with {} waypoints", path.len());
        self.world.write().unwrap().replace_path(path);
    }
}
