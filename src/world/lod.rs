//! Distance-based level of detail
//!
//! LOD forms concentric square bands around the viewer's chunk in the
//! horizontal plane; each band doubles the extraction stride. Vertical
//! position never affects the band.

use glam::IVec3;

use crate::voxel::ChunkCoord;

/// Safety ceiling on the extraction stride. `2^4 = 16` is one block per
/// chunk; anything coarser is too far to matter and keeps its old mesh.
pub const MAX_LOD: u32 = 4;

/// Extraction stride for a LOD level, in voxels
pub fn lod_scale(lod: u32) -> u32 {
    1 << lod
}

/// LOD band of a chunk relative to the viewer's chunk.
///
/// The half-cell bias centers the bands on the middle of the viewer's chunk
/// rather than its corner. Truncation toward zero matches band edges to
/// whole multiples of `render_distance`.
pub fn lod_band(chunk: ChunkCoord, viewer_chunk: IVec3, render_distance: u32) -> u32 {
    let rx = (chunk.x as f32 - viewer_chunk.x as f32 + 0.5).abs();
    let rz = (chunk.z as f32 - viewer_chunk.z as f32 + 0.5).abs();

    (rx.max(rz) / render_distance as f32) as u32
}
