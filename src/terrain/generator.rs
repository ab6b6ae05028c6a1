//! Noise-based procedural terrain generation

use glam::Vec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Occupancy source for chunk generation.
///
/// A position is solid when its density is negative. Implementations must be
/// deterministic given their construction parameters; chunk generation is run
/// exactly once per chunk and never repeated for LOD changes.
///
/// Positions arrive pre-normalized: the sampler divides global voxel
/// coordinates by the chunk edge length, so one unit here spans one chunk.
pub trait TerrainSource: Sync {
    fn density(&self, pos: Vec3) -> f32;
}

/// Any `Sync` closure works as a terrain source (handy in tests).
impl<F> TerrainSource for F
where
    F: Fn(Vec3) -> f32 + Sync,
{
    fn density(&self, pos: Vec3) -> f32 {
        self(pos)
    }
}

/// Parameters controlling terrain generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TerrainParams {
    pub seed: u32,
    /// Horizontal noise scale in normalized units (larger = smoother).
    pub scale: f32,
    /// Surface height the noise oscillates around, in chunks.
    pub base_height: f32,
    /// Peak-to-valley amplitude, in chunks.
    pub height_scale: f32,
    /// FBM octaves (detail levels).
    pub octaves: u32,
    /// FBM persistence (0.5 typical).
    pub persistence: f32,
    /// FBM lacunarity (2.0 typical).
    pub lacunarity: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            scale: 6.0,
            base_height: 2.0,
            height_scale: 1.5,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Height-field terrain backed by fractal Brownian motion (FBM).
///
/// Density is the signed distance above the surface: positions below the
/// sampled height are negative, hence occupied.
pub struct HeightfieldTerrain {
    params: TerrainParams,
    noise: Fbm<Perlin>,
}

impl HeightfieldTerrain {
    /// Create a new terrain generator with the given parameters
    pub fn new(params: TerrainParams) -> Self {
        let noise = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);

        Self { params, noise }
    }

    /// Get terrain parameters
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Surface height at a normalized (x, z) position, in chunks.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let nx = (x / self.params.scale) as f64;
        let nz = (z / self.params.scale) as f64;

        // Noise value in [-1, 1]
        let noise_value = self.noise.get([nx, nz]) as f32;

        self.params.base_height + noise_value * self.params.height_scale
    }
}

impl TerrainSource for HeightfieldTerrain {
    fn density(&self, pos: Vec3) -> f32 {
        pos.y - self.height_at(pos.x, pos.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = HeightfieldTerrain::new(TerrainParams::default());
        let b = HeightfieldTerrain::new(TerrainParams::default());
        for i in 0..32 {
            let p = Vec3::new(i as f32 * 0.37, 1.5, i as f32 * -0.91);
            assert_eq!(a.density(p), b.density(p));
        }
    }

    #[test]
    fn test_seed_changes_field() {
        let a = HeightfieldTerrain::new(TerrainParams::default());
        let b = HeightfieldTerrain::new(TerrainParams {
            seed: 99,
            ..TerrainParams::default()
        });
        let differs = (0..32).any(|i| {
            let p = Vec3::new(i as f32 * 0.53, 2.0, i as f32 * 0.11);
            a.density(p) != b.density(p)
        });
        assert!(differs);
    }

    #[test]
    fn test_solid_below_empty_above() {
        let params = TerrainParams::default();
        let max_height = params.base_height + params.height_scale;
        let min_height = params.base_height - params.height_scale;
        let terrain = HeightfieldTerrain::new(params);

        // Far below any reachable surface height: occupied
        assert!(terrain.density(Vec3::new(0.3, min_height - 1.0, 0.7)) < 0.0);
        // Far above: empty
        assert!(terrain.density(Vec3::new(0.3, max_height + 1.0, 0.7)) >= 0.0);
    }

    #[test]
    fn test_closure_source() {
        let flat = |pos: Vec3| pos.y - 1.0;
        assert!(flat.density(Vec3::new(5.0, 0.5, -3.0)) < 0.0);
        assert!(flat.density(Vec3::new(5.0, 1.5, -3.0)) >= 0.0);
    }
}
