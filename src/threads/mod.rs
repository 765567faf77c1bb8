//! Multi-threaded architecture for PathaNav.
//!
//! Separates concerns into four threads:
//! - Input thread: sensor fan-in, short snapshot writes
//! - Costmap service thread: map switch / clear / absorb requests
//! - Local costmap thread: scan → ego grid + world obstacles at a fixed rate
//! - Planner thread: dynamic-window control loop

mod costmap;
mod inputs;
mod local_costmap;
mod planner;

pub use costmap::CostmapServiceThread;
pub use inputs::{InputReceivers, InputThread};
pub use local_costmap::LocalCostmapThread;
pub use planner::PlannerThread;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread::{self, JoinHandle};

use crate::config::NavConfig;
use crate::costmap::CostmapGenerator;
use crate::io::bus::NavTopics;
use crate::io::transforms::TransformBuffer;
use crate::state::commands::{MapCommandReceiver, MapCommandSender};
use crate::state::shared::SharedWorld;

/// Thread handles for the multi-threaded system.
pub struct ThreadHandles {
    pub inputs: JoinHandle<()>,
    pub costmap: JoinHandle<()>,
    pub local_costmap: JoinHandle<()>,
    pub planner: JoinHandle<()>,
}

impl ThreadHandles {
    /// True if any worker exited.
    pub fn any_finished(&self) -> bool {
        self.inputs.is_finished()
            || self.costmap.is_finished()
            || self.local_costmap.is_finished()
            || self.planner.is_finished()
    }

    /// Join all workers, logging panics.
    pub fn join_all(self) {
        for (name, handle) in [
            ("inputs", self.inputs),
            ("costmap", self.costmap),
            ("local-costmap", self.local_costmap),
            ("planner", self.planner),
        ] {
            if let Err(e) = handle.join() {
                log::error!("{} thread panicked: {:?}", name, e);
            }
        }
    }
}

/// Spawn all threads and return handles.
#[allow(clippy::too_many_arguments)]
pub fn spawn_threads(
    config: NavConfig,
    world: SharedWorld,
    tf: Arc<TransformBuffer>,
    topics: Arc<NavTopics>,
    receivers: InputReceivers,
    generator: CostmapGenerator,
    map_rx: MapCommandReceiver,
    map_tx: MapCommandSender,
    shutdown: Arc<AtomicBool>,
) -> ThreadHandles {
    let inputs = {
        let mut thread = InputThread::new(
            Arc::clone(&world),
            Arc::clone(&tf),
            receivers,
            Arc::clone(&shutdown),
        );
        thread::Builder::new()
            .name("inputs".into())
            .spawn(move || thread.run())
            .expect("Failed to spawn input thread")
    };

    let costmap = {
        let mut thread = CostmapServiceThread::new(generator, map_rx, Arc::clone(&shutdown));
        thread::Builder::new()
            .name("costmap".into())
            .spawn(move || thread.run())
            .expect("Failed to spawn costmap service thread")
    };

    let local_costmap = {
        let thread = LocalCostmapThread::new(
            &config,
            Arc::clone(&world),
            Arc::clone(&tf),
            Arc::clone(&topics),
            Arc::clone(&shutdown),
        );
        thread::Builder::new()
            .name("local-costmap".into())
            .spawn(move || thread.run())
            .expect("Failed to spawn local costmap thread")
    };

    let planner = {
        let mut thread = PlannerThread::new(
            &config,
            Arc::clone(&world),
            Arc::clone(&topics),
            map_tx,
            Arc::clone(&shutdown),
        );
        thread::Builder::new()
            .name("planner".into())
            .spawn(move || thread.run())
            .expect("Failed to spawn planner thread")
    };

    ThreadHandles {
        inputs,
        costmap,
        local_costmap,
        planner,
    }
}
