//! Costmap service channel.
//!
//! The three costmap services (map switch, clear, local absorption) are
//! dispatched to the costmap service thread over an mpsc channel. Each
//! request carries a oneshot-style response channel; every service resolves
//! to a bool.

use std::sync::mpsc;
use std::time::Duration;

use crate::error::{NavError, Result};

/// Requests handled by the costmap service thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapCommand {
    /// Replace the global costmap with map `map_id` from the provider.
    SwitchMap { map_id: i8 },

    /// Refetch and re-pad the current map. Only the command `"clear"` is
    /// honored.
    ClearMap { command: String },

    /// Absorb the latest local obstacles into the global costmap. Only the
    /// command `"stuck"` is honored.
    AddLocalMap { command: String },
}

/// Command with response channel for acknowledgment.
pub struct MapRequest {
    /// The command to execute.
    pub command: MapCommand,
    /// Channel for the service result.
    pub response_tx: mpsc::Sender<bool>,
}

impl std::fmt::Debug for MapRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapRequest")
            .field("command", &self.command)
            .field("response_tx", &"...")
            .finish()
    }
}

/// Sender end of the service channel.
pub type MapCommandSender = mpsc::Sender<MapRequest>;

/// Receiver end of the service channel (held by the costmap service thread).
pub type MapCommandReceiver = mpsc::Receiver<MapRequest>;

/// Create a new service channel pair.
pub fn create_map_channel() -> (MapCommandSender, MapCommandReceiver) {
    mpsc::channel()
}

/// Send a command and wait for its result.
pub fn request_sync(
    sender: &MapCommandSender,
    command: MapCommand,
    timeout: Duration,
) -> Result<bool> {
    let (response_tx, response_rx) = mpsc::channel();

    sender
        .send(MapRequest {
            command,
            response_tx,
        })
        .map_err(|_| NavError::Service("costmap service not running".to_string()))?;

    response_rx.recv_timeout(timeout).map_err(|e| match e {
        mpsc::RecvTimeoutError::Timeout => {
            NavError::Service("costmap service timeout".to_string())
        }
        mpsc::RecvTimeoutError::Disconnected => {
            NavError::Service("costmap service disconnected".to_string())
        }
    })
}
