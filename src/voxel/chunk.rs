//! Chunk storage: a fixed-size cubic occupancy field

use glam::{IVec3, Vec3};

use super::voxel::Voxel;
use crate::core::error::{Error, Result};
use crate::math::div_floor_ivec3;
use crate::mesh::MeshBuffer;
use crate::terrain::TerrainSource;

/// Chunk edge length in voxels.
pub const CHUNK_SIZE: i32 = 16;

/// Voxels per chunk (`CHUNK_SIZE`³).
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Integer coordinate identifying a chunk in the world grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Convert a world-space position to the chunk containing it
    pub fn from_world_pos(pos: Vec3) -> Self {
        Self {
            x: (pos.x / CHUNK_SIZE as f32).floor() as i32,
            y: (pos.y / CHUNK_SIZE as f32).floor() as i32,
            z: (pos.z / CHUNK_SIZE as f32).floor() as i32,
        }
    }

    /// Convert a global voxel position to the chunk owning it
    pub fn from_voxel_pos(pos: IVec3) -> Self {
        let c = div_floor_ivec3(pos, CHUNK_SIZE);
        Self { x: c.x, y: c.y, z: c.z }
    }

    /// Global voxel position of this chunk's minimum corner
    pub fn voxel_origin(&self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z) * CHUNK_SIZE
    }

    /// World-space model translation handed to the renderer
    pub fn translation(&self) -> Vec3 {
        self.voxel_origin().as_vec3()
    }
}

/// A single chunk: dense occupancy plus the mesh last extracted from it.
///
/// `lod` always matches the stride used to produce `mesh`; the two are only
/// ever swapped together.
pub struct VoxelField {
    coord: ChunkCoord,
    /// Dense `CHUNK_SIZE`³ occupancy, row-major x, then y, then z.
    voxels: Vec<Voxel>,
    lod: u32,
    mesh: Option<MeshBuffer>,
}

impl VoxelField {
    /// Generate a chunk from a terrain source.
    ///
    /// Samples the density at every local position's global coordinate,
    /// normalized by the chunk edge length. Runs once per chunk; LOD changes
    /// resample the same voxels at a different stride and never regenerate.
    pub fn generate(
        coord: ChunkCoord,
        lod: u32,
        terrain: &dyn TerrainSource,
    ) -> Result<Self> {
        let mut voxels = Vec::new();
        voxels
            .try_reserve_exact(CHUNK_VOLUME)
            .map_err(|e| Error::Allocation(format!("chunk {:?}: {}", coord, e)))?;

        let origin = coord.voxel_origin();
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    let global = origin + IVec3::new(x, y, z);
                    let sample = global.as_vec3() / CHUNK_SIZE as f32;
                    voxels.push(Voxel::from_density(terrain.density(sample)));
                }
            }
        }

        Ok(Self {
            coord,
            voxels,
            lod,
            mesh: None,
        })
    }

    /// Build a chunk from a closure over local coordinates (tests, benches).
    pub fn from_fn(coord: ChunkCoord, mut f: impl FnMut(IVec3) -> Voxel) -> Self {
        let mut voxels = Vec::with_capacity(CHUNK_VOLUME);
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_SIZE {
                    voxels.push(f(IVec3::new(x, y, z)));
                }
            }
        }
        Self {
            coord,
            voxels,
            lod: 0,
            mesh: None,
        }
    }

    /// Fully occupied chunk
    pub fn filled(coord: ChunkCoord) -> Self {
        Self::from_fn(coord, |_| Voxel::Occupied)
    }

    /// Fully empty chunk
    pub fn empty(coord: ChunkCoord) -> Self {
        Self::from_fn(coord, |_| Voxel::Empty)
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn lod(&self) -> u32 {
        self.lod
    }

    pub fn mesh(&self) -> Option<&MeshBuffer> {
        self.mesh.as_ref()
    }

    /// Replace the mesh and its LOD as one unit. The previous buffer is
    /// dropped here, never held alongside its replacement.
    pub fn install_mesh(&mut self, lod: u32, mesh: MeshBuffer) {
        self.lod = lod;
        self.mesh = Some(mesh);
    }

    /// Whether a local coordinate lies inside the chunk
    pub fn in_bounds(local: IVec3) -> bool {
        local.cmpge(IVec3::ZERO).all() && local.cmplt(IVec3::splat(CHUNK_SIZE)).all()
    }

    /// Local voxel read; callers guarantee bounds.
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> Voxel {
        self.voxels[Self::index(x, y, z)]
    }

    /// Local voxel read by vector
    pub fn voxel_at(&self, local: IVec3) -> Voxel {
        self.voxel(local.x, local.y, local.z)
    }

    fn index(x: i32, y: i32, z: i32) -> usize {
        (x * CHUNK_SIZE * CHUNK_SIZE + y * CHUNK_SIZE + z) as usize
    }
}

/// Chunk owning a global voxel position, plus the local coordinate within
/// it. Floor division keeps negative positions resolving correctly; the
/// local part is always in `[0, CHUNK_SIZE)`.
pub fn split_voxel_pos(global: IVec3) -> (ChunkCoord, IVec3) {
    let chunk = ChunkCoord::from_voxel_pos(global);
    let local = global - chunk.voxel_origin();
    (chunk, local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_coord_from_world_pos() {
        let cs = CHUNK_SIZE as f32;
        assert_eq!(
            ChunkCoord::from_world_pos(Vec3::new(cs / 2.0, cs / 2.0, cs / 2.0)),
            ChunkCoord::new(0, 0, 0)
        );
        assert_eq!(
            ChunkCoord::from_world_pos(Vec3::new(cs, 0.0, -0.5)),
            ChunkCoord::new(1, 0, -1)
        );
    }

    #[test]
    fn test_chunk_coord_from_voxel_pos_negative() {
        assert_eq!(
            ChunkCoord::from_voxel_pos(IVec3::new(-1, 0, 16)),
            ChunkCoord::new(-1, 0, 1)
        );
        assert_eq!(
            ChunkCoord::from_voxel_pos(IVec3::new(-16, -17, 15)),
            ChunkCoord::new(-1, -2, 0)
        );
    }

    #[test]
    fn test_split_voxel_pos() {
        let (chunk, local) = split_voxel_pos(IVec3::new(-1, 5, 33));
        assert_eq!(chunk, ChunkCoord::new(-1, 0, 2));
        assert_eq!(local, IVec3::new(15, 5, 1));

        // Identity: chunk origin + local == global
        for global in [IVec3::new(-100, 3, 7), IVec3::new(0, 0, 0), IVec3::new(255, 17, -255)] {
            let (chunk, local) = split_voxel_pos(global);
            assert_eq!(chunk.voxel_origin() + local, global);
            assert!(VoxelField::in_bounds(local));
        }
    }

    #[test]
    fn test_generate_matches_density() {
        let terrain = |pos: Vec3| pos.y - 0.5;
        let field = VoxelField::generate(ChunkCoord::new(0, 0, 0), 0, &terrain).unwrap();

        // Surface sits at half a chunk: rows below y=8 occupied, above empty
        assert!(field.voxel(3, 0, 3).is_occupied());
        assert!(field.voxel(3, 7, 3).is_occupied());
        assert!(field.voxel(3, 8, 3).is_empty());
        assert!(field.voxel(3, 15, 3).is_empty());
    }

    #[test]
    fn test_generate_uses_global_position() {
        let terrain = |pos: Vec3| pos.y - 0.5;
        // One chunk up: everything is above the surface
        let field = VoxelField::generate(ChunkCoord::new(0, 1, 0), 0, &terrain).unwrap();
        assert!(field.voxel(0, 0, 0).is_empty());

        // One chunk down: everything below
        let field = VoxelField::generate(ChunkCoord::new(0, -1, 0), 0, &terrain).unwrap();
        assert!(field.voxel(15, 15, 15).is_occupied());
    }

    #[test]
    fn test_index_axis_order() {
        // x-major, then y, then z: incrementing z moves by one slot
        let field = VoxelField::from_fn(ChunkCoord::default(), |l| {
            if l == IVec3::new(1, 2, 3) {
                Voxel::Occupied
            } else {
                Voxel::Empty
            }
        });
        assert!(field.voxel(1, 2, 3).is_occupied());
        assert!(field.voxel(3, 2, 1).is_empty());
        assert!(field.voxel(1, 3, 2).is_empty());
    }

    #[test]
    fn test_install_mesh_updates_pair() {
        let mut field = VoxelField::filled(ChunkCoord::new(0, 0, 0));
        assert!(field.mesh().is_none());
        assert_eq!(field.lod(), 0);

        field.install_mesh(2, MeshBuffer::new(Vec::new(), 4));
        assert_eq!(field.lod(), 2);
        assert_eq!(field.mesh().map(|m| m.lod_scale()), Some(4));
    }
}
