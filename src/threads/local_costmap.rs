//! Local costmap thread.
//!
//! Fixed-rate loop that reduces the latest scan to the world-frame obstacle
//! cloud and the ego-centered local grid. The scan-to-map transform resolves
//! through the transform buffer with a bounded wait; a timed-out tick is
//! skipped, never fatal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::NavConfig;
use crate::costmap::local::{ego_grid, sensor_points};
use crate::io::bus::NavTopics;
use crate::io::transforms::{FrameId, TransformBuffer};
use crate::state::shared::SharedWorld;

/// Bound on waiting for the scan-to-map transform.
const TRANSFORM_TIMEOUT: Duration = Duration::from_secs(10);

/// Local costmap thread state and logic.
pub struct LocalCostmapThread {
    world: SharedWorld,
    tf: Arc<TransformBuffer>,
    topics: Arc<NavTopics>,
    shutdown: Arc<AtomicBool>,
    /// Ego grid side length (m)
    length: f64,
    period: Duration,
    log_times: bool,
}

impl LocalCostmapThread {
    pub fn new(
        config: &NavConfig,
        world: SharedWorld,
        tf: Arc<TransformBuffer>,
        topics: Arc<NavTopics>,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            world,
            tf,
            topics,
            shutdown,
            length: config.local_costmap.length,
            period: Duration::from_secs_f64(1.0 / config.local_costmap.frequency),
            log_times: config.global.log_times,
        }
    }

    /// Run the local costmap loop.
    pub fn run(&self) {
        info!("Local costmap thread started");

        // Precondition: at least one scan and one odometry sample
        loop {
            if self.shutdown.load(Ordering::Acquire) {
                return;
            }
            {
                let world = self.world.read().unwrap();
                if world.scan.is_some() && world.have_odom {
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        info!("Local costmap loop running at {:?} period", self.period);

        loop {
            if self.shutdown.load(Ordering::Acquire) {
                info!("Local costmap thread shutting down");
                break;
            }

            let tick_start = Instant::now();
            self.tick();

            if self.log_times {
                debug!("local costmap tick took {:?}", tick_start.elapsed());
            }

            // Overruns compress the sleep to zero instead of dropping ticks
            let elapsed = tick_start.elapsed();
            if elapsed < self.period {
                std::thread::sleep(self.period - elapsed);
            }
        }
    }

    fn tick(&self) {
        let (scan, pose, resolution) = {
            let world = self.world.read().unwrap();
            let Some(scan) = world.scan.clone() else {
                return;
            };
            (scan, world.pose, world.map_resolution)
        };

        // The whole scan shares one rigid transform; resolve it once per tick
        let laser_in_map = match self.tf.wait_for(
            FrameId::Map,
            FrameId::HokuyoLink,
            scan.timestamp_us,
            TRANSFORM_TIMEOUT,
        ) {
            Ok(t) => t,
            Err(e) => {
                warn!("Skipping local costmap tick: {}", e);
                return;
            }
        };

        let half_length = self.length / 2.0;
        let obstacles: Vec<_> = sensor_points(&scan.data, half_length)
            .iter()
            .map(|p| laser_in_map.transform_point(p))
            .collect();
        let obstacles = Arc::new(obstacles);

        self.world.write().unwrap().obstacles = Arc::clone(&obstacles);
        self.topics.local_obstacles.publish(obstacles);

        let grid = ego_grid(&scan.data, pose, self.length, resolution);
        self.topics.local_costmap.publish(Arc::new(grid));
    }
}
