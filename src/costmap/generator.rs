//! Global costmap owner.
//!
//! The generator holds the padded global grid and is its single writer.
//! It services three requests: switching to another map from the provider,
//! clearing back to the freshly fetched map, and absorbing the latest
//! world-frame obstacle points when the planner reports being stuck. Every
//! rebuild is republished on the latched global-costmap topic.

use std::sync::Arc;

use log::{info, warn};

use crate::config::NavConfig;
use crate::core::types::Point2D;
use crate::error::Result;
use crate::io::bus::NavTopics;
use crate::io::map_provider::MapProvider;
use crate::state::commands::MapCommand;
use crate::state::shared::SharedWorld;

use super::decay::{DecayProfile, DecayType};
use super::grid::{Costmap, cost};
use super::padding::PaddingMask;

/// Padding parameters, resolution-independent.
///
/// The stamp mask is rebuilt per fetched map so a provider switching cell
/// resolutions keeps the metric radii intact.
#[derive(Debug, Clone)]
pub struct PaddingSettings {
    /// Hard-forbidden reach from an obstacle center (m)
    pub hard_reach: f64,
    /// Hard padding cell value
    pub padded_val: i8,
    pub decay_type: DecayType,
    /// Soft padding reach beyond the hard radius (m)
    pub decay_distance: f64,
    pub apply_soft_padding: bool,
}

impl PaddingSettings {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            hard_reach: config.global_costmap.robot_diameter / 2.0
                + config.global_costmap.safety_distance,
            padded_val: config.global_costmap.padded_val,
            decay_type: config.global_costmap.decay_type,
            decay_distance: config.global_costmap.decay_distance,
            apply_soft_padding: config.global_costmap.apply_soft_padding,
        }
    }

    /// Build the stamp mask for a given map resolution.
    pub fn mask_for(&self, resolution: f64) -> PaddingMask {
        let profile = if self.apply_soft_padding {
            DecayProfile::generate(self.decay_type, self.decay_distance, resolution)
        } else {
            DecayProfile::none()
        };
        let hard_radius = (self.hard_reach / resolution).ceil() as usize;
        PaddingMask::new(hard_radius, self.padded_val, &profile)
    }
}

/// Owner of the padded global costmap.
pub struct CostmapGenerator {
    provider: Box<dyn MapProvider>,
    settings: PaddingSettings,
    grid: Costmap,
    /// Stamp mask matching the current grid resolution
    mask: PaddingMask,
    map_id: i8,
    topics: Arc<NavTopics>,
    world: SharedWorld,
}

impl CostmapGenerator {
    /// Fetch the initial map, pad it and publish the first grid.
    ///
    /// A provider failure here is fatal: the stack cannot run without a
    /// global costmap.
    pub fn startup(
        provider: Box<dyn MapProvider>,
        settings: PaddingSettings,
        init_map_id: i8,
        topics: Arc<NavTopics>,
        world: SharedWorld,
    ) -> Result<Self> {
        let mut grid = provider.fetch(init_map_id)?;
        let mask = settings.mask_for(grid.resolution());
        mask.pad(&mut grid);
        info!(
            "Global costmap ready: map {} ({}x{} cells at {:.3} m)",
            init_map_id,
            grid.width(),
            grid.height(),
            grid.resolution()
        );

        let generator = Self {
            provider,
            settings,
            grid,
            mask,
            map_id: init_map_id,
            topics,
            world,
        };
        generator.republish();
        Ok(generator)
    }

    /// Current grid (test and inspection access).
    pub fn grid(&self) -> &Costmap {
        &self.grid
    }

    /// Currently active map id.
    pub fn map_id(&self) -> i8 {
        self.map_id
    }

    /// Dispatch one service request.
    pub fn handle(&mut self, command: &MapCommand) -> bool {
        match command {
            MapCommand::SwitchMap { map_id } => self.switch_map(*map_id),
            MapCommand::ClearMap { command } => {
                if command == "clear" {
                    self.refetch("clear_map", self.map_id)
                } else {
                    warn!("clear_map: unknown command {:?}", command);
                    false
                }
            }
            MapCommand::AddLocalMap { command } => {
                if command == "stuck" {
                    self.absorb_local_obstacles()
                } else {
                    warn!("add_local_map: unknown command {:?}", command);
                    false
                }
            }
        }
    }

    /// Replace the grid with map `map_id`, keeping the old grid on failure.
    fn switch_map(&mut self, map_id: i8) -> bool {
        let ok = self.refetch("switch_map", map_id);
        if ok {
            self.map_id = map_id;
        }
        ok
    }

    /// Fetch, pad and publish `map_id`; on failure the current grid stays.
    fn refetch(&mut self, service: &str, map_id: i8) -> bool {
        match self.provider.fetch(map_id) {
            Ok(mut grid) => {
                let mask = self.settings.mask_for(grid.resolution());
                mask.pad(&mut grid);
                self.grid = grid;
                self.mask = mask;
                self.republish();
                info!("{}: map {} rebuilt", service, map_id);
                true
            }
            Err(e) => {
                warn!("{}({}) failed, keeping current map: {}", service, map_id, e);
                false
            }
        }
    }

    /// Mark the latest local obstacles as occupied and re-pad around them.
    ///
    /// Out-of-bounds points are skipped silently.
    fn absorb_local_obstacles(&mut self) -> bool {
        let obstacles: Arc<Vec<Point2D>> = self.world.read().unwrap().obstacles.clone();

        let mut absorbed = 0usize;
        for point in obstacles.iter() {
            if let Some((x, y)) = self.grid.world_to_cell(point) {
                self.grid.set(x, y, cost::OCCUPIED);
                self.mask.stamp(&mut self.grid, x as i64, y as i64);
                absorbed += 1;
            }
        }

        info!(
            "Absorbed {} of {} local obstacles into map {}",
            absorbed,
            obstacles.len(),
            self.map_id
        );
        self.republish();
        true
    }

    fn republish(&self) {
        self.world.write().unwrap().map_resolution = self.grid.resolution();
        self.topics.global_costmap.publish(Arc::new(self.grid.clone()));
    }
}
