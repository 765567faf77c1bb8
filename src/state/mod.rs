//! Shared state and the costmap service channel.

pub mod commands;
pub mod shared;

pub use commands::{
    MapCommand, MapCommandReceiver, MapCommandSender, MapRequest, create_map_channel, request_sync,
};
pub use shared::{SharedWorld, WorldState, create_shared_world};
