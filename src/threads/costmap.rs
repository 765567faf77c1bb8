//! Costmap service thread.
//!
//! Drains the service channel and lets the generator execute each request,
//! acknowledging with the service's bool result. The generator stays the
//! single writer of the global costmap.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use log::info;

use crate::costmap::CostmapGenerator;
use crate::state::commands::MapCommandReceiver;

/// Costmap service thread state and logic.
pub struct CostmapServiceThread {
    generator: CostmapGenerator,
    command_rx: MapCommandReceiver,
    shutdown: Arc<AtomicBool>,
}

impl CostmapServiceThread {
    pub fn new(
        generator: CostmapGenerator,
        command_rx: MapCommandReceiver,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            generator,
            command_rx,
            shutdown,
        }
    }

    /// Run the service dispatch loop.
    pub fn run(&mut self) {
        info!("Costmap service thread started");

        loop {
            if self.shutdown.load(Ordering::Acquire) {
                info!("Costmap service thread shutting down");
                break;
            }

            match self.command_rx.recv_timeout(Duration::from_millis(100)) {
                Ok(request) => {
                    let ok = self.generator.handle(&request.command);
                    request.response_tx.send(ok).ok();
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    info!("Service channel closed, costmap service thread exiting");
                    break;
                }
            }
        }
    }
}
