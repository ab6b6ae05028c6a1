//! Voxel data structures and chunk storage

pub mod chunk;
pub mod voxel;

pub use chunk::{split_voxel_pos, ChunkCoord, VoxelField, CHUNK_SIZE, CHUNK_VOLUME};
pub use voxel::Voxel;
