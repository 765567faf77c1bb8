//! Static map provider.
//!
//! The map provider is an external collaborator; the daemon only needs
//! `fetch`. The shipped implementation reads ROS-standard PGM + YAML map
//! pairs from a directory, keyed by map number (`map_<id>.yaml`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::types::Pose2D;
use crate::costmap::{Costmap, cost};
use crate::error::{NavError, Result};

/// Source of unpadded occupancy grids.
pub trait MapProvider: Send {
    /// Fetch map `map_id`. Errors are surfaced to the caller: fatal during
    /// startup, reported as a failed service call afterwards.
    fn fetch(&self, map_id: i8) -> Result<Costmap>;
}

/// Map metadata from the YAML file (ROS standard format).
#[derive(Debug, Deserialize)]
struct MapMetadata {
    /// PGM image filename (relative to the YAML file)
    image: String,

    /// Map resolution in meters per pixel
    resolution: f64,

    /// Origin of map [x, y, yaw]: world coordinates of the bottom-left pixel
    origin: [f64; 3],

    /// Occupied-probability threshold
    #[serde(default = "default_occupied_thresh")]
    occupied_thresh: f64,

    /// Free-probability threshold
    #[serde(default = "default_free_thresh")]
    free_thresh: f64,

    /// Invert pixel interpretation (ROS `negate`)
    #[serde(default)]
    negate: i32,
}

fn default_occupied_thresh() -> f64 {
    0.65
}

fn default_free_thresh() -> f64 {
    0.196
}

/// Provider backed by a directory of PGM + YAML map files.
#[derive(Debug, Clone)]
pub struct FileMapProvider {
    maps_dir: PathBuf,
}

impl FileMapProvider {
    pub fn new<P: AsRef<Path>>(maps_dir: P) -> Self {
        Self {
            maps_dir: maps_dir.as_ref().to_path_buf(),
        }
    }
}

impl MapProvider for FileMapProvider {
    fn fetch(&self, map_id: i8) -> Result<Costmap> {
        let yaml_path = self.maps_dir.join(format!("map_{}.yaml", map_id));
        let yaml = std::fs::read_to_string(&yaml_path)
            .map_err(|e| NavError::MapProvider(format!("read {:?}: {}", yaml_path, e)))?;
        let meta: MapMetadata = serde_yaml::from_str(&yaml)
            .map_err(|e| NavError::MapProvider(format!("parse {:?}: {}", yaml_path, e)))?;

        let image_path = self.maps_dir.join(&meta.image);
        let pixels = image::open(&image_path)
            .map_err(|e| NavError::MapProvider(format!("load {:?}: {}", image_path, e)))?
            .to_luma8();

        let width = pixels.width() as usize;
        let height = pixels.height() as usize;
        let origin = Pose2D::new(meta.origin[0], meta.origin[1], meta.origin[2]);
        let mut grid = Costmap::new(width, height, meta.resolution, origin, cost::UNKNOWN);

        // Image row 0 is the top of the map; grid row 0 is the origin row.
        for (py, row) in pixels.rows().enumerate() {
            let gy = height - 1 - py;
            for (px, pixel) in row.enumerate() {
                let occ = if meta.negate == 0 {
                    (255.0 - pixel.0[0] as f64) / 255.0
                } else {
                    pixel.0[0] as f64 / 255.0
                };
                let value = if occ > meta.occupied_thresh {
                    cost::OCCUPIED
                } else if occ < meta.free_thresh {
                    cost::FREE
                } else {
                    cost::UNKNOWN
                };
                grid.set(px, gy, value);
            }
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_map(dir: &Path, id: i8, rows: &[&[u8]]) {
        let height = rows.len();
        let width = rows[0].len();
        let pgm_name = format!("map_{}.pgm", id);

        let mut pgm = Vec::new();
        write!(pgm, "P5\n{} {}\n255\n", width, height).unwrap();
        for row in rows {
            pgm.extend_from_slice(row);
        }
        std::fs::write(dir.join(&pgm_name), pgm).unwrap();

        let yaml = format!(
            "image: {}\nresolution: 0.05\norigin: [-1.0, -1.0, 0.0]\n",
            pgm_name
        );
        std::fs::write(dir.join(format!("map_{}.yaml", id)), yaml).unwrap();
    }

    #[test]
    fn test_fetch_thresholds_and_flips() {
        let dir = tempfile::tempdir().unwrap();
        // Top row: occupied, occupied; bottom row: free, mid-gray (unknown)
        write_map(dir.path(), 0, &[&[0, 10], &[254, 150]]);

        let provider = FileMapProvider::new(dir.path());
        let grid = provider.fetch(0).unwrap();

        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.resolution(), 0.05);
        assert_eq!(grid.origin().x, -1.0);

        // Bottom image row lands at grid row 0
        assert_eq!(grid.get(0, 0), cost::FREE);
        assert_eq!(grid.get(1, 0), cost::UNKNOWN);
        assert_eq!(grid.get(0, 1), cost::OCCUPIED);
        assert_eq!(grid.get(1, 1), cost::OCCUPIED);
    }

    #[test]
    fn test_fetch_missing_map_fails() {
        let dir = tempfile::tempdir().unwrap();
        let provider = FileMapProvider::new(dir.path());
        assert!(matches!(
            provider.fetch(3),
            Err(NavError::MapProvider(_))
        ));
    }
}
