//! World configuration loaded once at startup

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use crate::terrain::TerrainParams;

/// Parameters fixing the world grid's extent and terrain.
///
/// The grid footprint is derived from `render_distance` at creation time and
/// never changes afterwards; only per-chunk LOD state mutates at runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Width in chunks of one LOD band (also scales the grid's half extent).
    pub render_distance: u32,
    /// Vertical chunk count of the grid.
    pub world_height: u32,
    /// Horizontal (x, z) chunk-space translation of the whole grid.
    pub center_offset: [i32; 2],
    /// Terrain noise parameters.
    pub terrain: TerrainParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            render_distance: 2,
            world_height: 4,
            center_offset: [0, 0],
            terrain: TerrainParams::default(),
        }
    }
}

impl WorldConfig {
    /// Check the extents the grid math relies on.
    pub fn validate(&self) -> Result<()> {
        if self.render_distance == 0 {
            return Err(Error::Config("render_distance must be at least 1".into()));
        }
        if self.world_height == 0 {
            return Err(Error::Config("world_height must be at least 1".into()));
        }
        Ok(())
    }
}
