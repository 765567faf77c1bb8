//! Coordinate transforms between the named frames of the stack.
//!
//! The frame chain is `map → odom → base_link → hokuyo_link`. The laser
//! mount (`hokuyo_link` in `base_link`) is static and cached at
//! construction; `base_link` in `odom` is a ring of time-stamped odometry
//! samples; `odom` in `map` defaults to identity until a localization
//! source overrides it. Lookups compose the chain using the sample nearest
//! the query stamp instead of sleeping in sensor callbacks.

use std::collections::VecDeque;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::core::types::{Pose2D, Timestamped};
use crate::error::{NavError, Result};

/// Named coordinate frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameId {
    Map,
    Odom,
    BaseLink,
    HokuyoLink,
}

impl FrameId {
    /// Depth in the chain, root first.
    fn depth(&self) -> usize {
        match self {
            FrameId::Map => 0,
            FrameId::Odom => 1,
            FrameId::BaseLink => 2,
            FrameId::HokuyoLink => 3,
        }
    }
}

/// Polling interval while waiting for a transform to become available.
const WAIT_POLL: Duration = Duration::from_millis(10);

/// Buffer of live transforms for the fixed frame chain.
#[derive(Debug)]
pub struct TransformBuffer {
    /// Static laser mount: hokuyo_link expressed in base_link
    laser_in_base: Pose2D,
    /// odom expressed in map (identity unless externally corrected)
    map_from_odom: RwLock<Pose2D>,
    /// base_link in odom, stamped odometry samples, oldest first
    samples: RwLock<VecDeque<Timestamped<Pose2D>>>,
    capacity: usize,
}

impl TransformBuffer {
    /// Create a buffer with the static laser mount transform.
    pub fn new(laser_in_base: Pose2D, capacity: usize) -> Self {
        Self {
            laser_in_base,
            map_from_odom: RwLock::new(Pose2D::identity()),
            samples: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Record a stamped odometry pose (base_link in odom).
    pub fn insert_odom_sample(&self, sample: Timestamped<Pose2D>) {
        let mut samples = self.samples.write().unwrap();
        if samples.len() == self.capacity {
            samples.pop_front();
        }
        samples.push_back(sample);
    }

    /// Override the map → odom correction.
    pub fn set_map_from_odom(&self, transform: Pose2D) {
        *self.map_from_odom.write().unwrap() = transform;
    }

    /// Pose of the base in the map frame for a given odometry pose.
    pub fn base_in_map(&self, base_in_odom: &Pose2D) -> Pose2D {
        self.map_from_odom.read().unwrap().compose(base_in_odom)
    }

    /// Newest stored odometry stamp, if any.
    pub fn newest_stamp(&self) -> Option<u64> {
        self.samples.read().unwrap().back().map(|s| s.timestamp_us)
    }

    fn nearest_sample(&self, stamp_us: u64) -> Option<Timestamped<Pose2D>> {
        let samples = self.samples.read().unwrap();
        samples
            .iter()
            .min_by_key(|s| s.timestamp_us.abs_diff(stamp_us))
            .cloned()
    }

    /// Pose of `source` expressed in `target` at the given stamp.
    ///
    /// Only lookups descending the chain are supported; errors if no
    /// odometry sample has been recorded yet.
    pub fn lookup(&self, target: FrameId, source: FrameId, stamp_us: u64) -> Result<Pose2D> {
        if target.depth() >= source.depth() {
            return Err(NavError::Transform(format!(
                "unsupported lookup {:?} -> {:?}",
                target, source
            )));
        }

        let mut transform = Pose2D::identity();
        for depth in target.depth()..source.depth() {
            let link = match depth {
                0 => *self.map_from_odom.read().unwrap(),
                1 => {
                    self.nearest_sample(stamp_us)
                        .ok_or_else(|| {
                            NavError::Transform("no odometry samples buffered".to_string())
                        })?
                        .data
                }
                _ => self.laser_in_base,
            };
            transform = transform.compose(&link);
        }
        Ok(transform)
    }

    /// Bounded-wait lookup: retries until a sample at or past the stamp is
    /// buffered, then resolves. Errors after `timeout` (recoverable; the
    /// caller skips its tick).
    pub fn wait_for(
        &self,
        target: FrameId,
        source: FrameId,
        stamp_us: u64,
        timeout: Duration,
    ) -> Result<Pose2D> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(newest) = self.newest_stamp()
                && newest >= stamp_us
            {
                return self.lookup(target, source, stamp_us);
            }
            if Instant::now() >= deadline {
                // Fall back to whatever is buffered rather than failing a
                // tick that an older sample can still serve.
                return self.lookup(target, source, stamp_us).map_err(|_| {
                    NavError::Transform(format!(
                        "timed out waiting for {:?} -> {:?} at {}",
                        target, source, stamp_us
                    ))
                });
            }
            std::thread::sleep(WAIT_POLL);
        }
    }
}
