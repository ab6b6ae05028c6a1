//! Surface extraction: dense occupancy in, visible face list out

use glam::IVec3;

use super::face::{FaceDir, FaceRecord};
use crate::math::hash3;
use crate::voxel::{Voxel, VoxelField, CHUNK_SIZE};

/// Cross-chunk occupancy queries, resolved by whoever owns the neighboring
/// chunks. Passed explicitly into extraction by the caller.
pub trait VoxelLookup: Sync {
    fn voxel(&self, global: IVec3) -> Voxel;
}

/// Any `Sync` closure works as a lookup (handy in tests).
impl<F> VoxelLookup for F
where
    F: Fn(IVec3) -> Voxel + Sync,
{
    fn voxel(&self, global: IVec3) -> Voxel {
        self(global)
    }
}

/// Walk the chunk at a stride of `2^lod` and emit one record per visible
/// face. Occupancy is read from the local array when the queried position
/// stays inside the chunk and from `lookup` when it crosses the boundary.
///
/// Fully buried blocks (all six directions occluded) contribute nothing.
pub fn extract_surface(
    field: &VoxelField,
    lod: u32,
    lookup: &dyn VoxelLookup,
) -> Vec<FaceRecord> {
    let scale = 1i32 << lod;
    let half = scale / 2;
    let origin = field.coord().voxel_origin();
    let mut faces = Vec::new();

    for x in (0..CHUNK_SIZE).step_by(scale as usize) {
        for y in (0..CHUNK_SIZE).step_by(scale as usize) {
            for z in (0..CHUNK_SIZE).step_by(scale as usize) {
                let local = IVec3::new(x, y, z);
                if field.voxel_at(local).is_empty() {
                    continue;
                }

                for dir in FaceDir::ALL {
                    if occluded(field, local, dir, scale, lookup) {
                        continue;
                    }
                    // Block-center offset keeps coarse blocks aligned with
                    // the cell they cover
                    let centered = local + IVec3::splat(half);
                    let color = face_color(origin + centered, dir);
                    faces.push(FaceRecord::pack(centered, color, dir));
                }
            }
        }
    }

    faces
}

/// Whether the face of `local` pointing along `dir` is covered by an
/// occupied neighbor at this stride.
fn occluded(
    field: &VoxelField,
    local: IVec3,
    dir: FaceDir,
    scale: i32,
    lookup: &dyn VoxelLookup,
) -> bool {
    let neighbor = local + dir.offset() * scale;
    if VoxelField::in_bounds(neighbor) {
        return field.voxel_at(neighbor).is_occupied();
    }

    let global = field.coord().voxel_origin() + neighbor;
    if scale == 1 {
        return lookup.voxel(global).is_occupied();
    }

    // Coarse stride across a boundary: the neighbor chunk may be meshed at a
    // finer stride, in which case a single sample can claim coverage that is
    // only partial. The face is hidden only if all four finer sub-samples
    // across the face are occupied. (A neighbor meshed *coarser* than this
    // chunk is not corrected for; those faces point away from any viewer
    // close enough to see them.)
    let (u, v) = dir.orthogonal();
    let half = scale / 2;
    for du in [0, half] {
        for dv in [0, half] {
            if lookup.voxel(global + u * du + v * dv).is_empty() {
                return false;
            }
        }
    }
    true
}

/// Terrain-layer color bands over global height, in voxels.
fn height_band(y: i32) -> (u8, u8, u8) {
    if y < 8 {
        (6, 6, 7) // deep rock
    } else if y < 20 {
        (9, 6, 3) // dirt
    } else if y < 36 {
        (3, 10, 3) // grass
    } else {
        (14, 14, 15) // snow
    }
}

/// Band color with a deterministic per-face jitter to avoid flat banding.
fn face_color(global: IVec3, dir: FaceDir) -> (u8, u8, u8) {
    let base = height_band(global.y);
    let h = hash3(global, dir.id());
    (
        jitter(base.0, h),
        jitter(base.1, h >> 2),
        jitter(base.2, h >> 4),
    )
}

fn jitter(channel: u8, bits: u32) -> u8 {
    let delta = match bits & 0x3 {
        0 => -1i32,
        3 => 1,
        _ => 0,
    };
    (channel as i32 + delta).clamp(0, 15) as u8
}
