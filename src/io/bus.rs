//! In-process topic fan-out.
//!
//! A `Publisher` clones each message to every subscriber over an unbounded
//! channel. Latched topics additionally keep the last message and replay it
//! to late subscribers, which is how the global costmap stays authoritative
//! between rebuilds.

use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::core::types::{Point2D, Twist};
use crate::costmap::Costmap;

/// Fan-out publisher for one topic.
#[derive(Debug)]
pub struct Publisher<T: Clone> {
    subscribers: Mutex<Vec<Sender<T>>>,
    latched: Mutex<Option<T>>,
    latch: bool,
}

impl<T: Clone> Publisher<T> {
    /// Create a plain (non-latched) publisher.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            latched: Mutex::new(None),
            latch: false,
        }
    }

    /// Create a latched publisher: late subscribers receive the last message.
    pub fn latched() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            latched: Mutex::new(None),
            latch: true,
        }
    }

    /// Publish a message to all current subscribers.
    ///
    /// Disconnected subscribers are dropped.
    pub fn publish(&self, msg: T) {
        if self.latch {
            *self.latched.lock().unwrap() = Some(msg.clone());
        }
        let mut subs = self.subscribers.lock().unwrap();
        subs.retain(|tx| tx.send(msg.clone()).is_ok());
    }

    /// Subscribe; returns the receiving end of an unbounded channel.
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = unbounded();
        if self.latch
            && let Some(last) = self.latched.lock().unwrap().clone()
        {
            let _ = tx.send(last);
        }
        self.subscribers.lock().unwrap().push(tx);
        rx
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

impl<T: Clone> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Every topic the stack publishes.
#[derive(Debug)]
pub struct NavTopics {
    /// Latched padded global costmap
    pub global_costmap: Publisher<Arc<Costmap>>,
    /// Rolling ego-centered local costmap
    pub local_costmap: Publisher<Arc<Costmap>>,
    /// World-frame obstacle points from the latest scan
    pub local_obstacles: Publisher<Arc<Vec<Point2D>>>,
    /// Velocity command
    pub cmd_vel: Publisher<Twist>,
    /// Selected rollout as a line strip (debug visualization)
    pub trajectory: Publisher<Vec<Point2D>>,
    /// Goal re-publish during recovery
    pub goal: Publisher<Point2D>,
}

impl NavTopics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            global_costmap: Publisher::latched(),
            local_costmap: Publisher::new(),
            local_obstacles: Publisher::new(),
            cmd_vel: Publisher::new(),
            trajectory: Publisher::new(),
            goal: Publisher::new(),
        })
    }
}
