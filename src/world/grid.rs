//! World grid: owns every chunk in a fixed extent and drives LOD updates

use std::time::Instant;

use glam::{IVec2, IVec3, Vec3};
use rayon::prelude::*;

use super::lod::{lod_band, lod_scale, MAX_LOD};
use crate::core::config::WorldConfig;
use crate::core::error::{Error, Result};
use crate::mesh::{extract_surface, MeshBuffer, VoxelLookup};
use crate::terrain::TerrainSource;
use crate::voxel::{split_voxel_pos, ChunkCoord, Voxel, VoxelField, CHUNK_SIZE};

/// Chunks closer than this (squared world units) are always drawn,
/// regardless of view direction.
const CULL_MIN_DISTANCE_SQ: f32 = (2 * CHUNK_SIZE * 2 * CHUNK_SIZE) as f32;

/// Per-chunk draw parameters handed to the rendering backend.
pub struct ChunkDraw<'a> {
    pub coord: ChunkCoord,
    /// Model translation: chunk coordinate times the chunk edge length
    pub translation: Vec3,
    /// Stride the buffer was extracted at; scales the emitted quads
    pub lod_scale: u32,
    pub buffer: &'a MeshBuffer,
}

/// Dense grid of chunks over a fixed footprint and height.
///
/// The set of covered chunk coordinates never changes after creation; only
/// each chunk's `lod`/mesh pair mutates, driven by `tick`. A cell is `None`
/// only when its chunk failed to allocate, in which case all lookups against
/// it read as empty.
pub struct WorldGrid {
    cells: Vec<Option<VoxelField>>,
    render_distance: i32,
    /// Horizontal half extent of the grid in chunks:
    /// `render_distance * (log2(CHUNK_SIZE) + 1)`, one chunk ring per band.
    half_extent: i32,
    height: i32,
    /// Horizontal chunk-space translation of the whole grid
    center_offset: IVec2,
    /// Chunk cell the viewer occupied at the last tick; LOD work is gated on
    /// this changing, not on continuous movement.
    viewer_chunk: Option<IVec3>,
    remesh_count: u64,
}

impl WorldGrid {
    /// Allocate the grid, generate every chunk, and extract every mesh.
    ///
    /// Generation of all chunks completes before any extraction starts, so
    /// boundary lookups always read finalized occupancy. A chunk that fails
    /// to allocate is logged and its cell left absent; only failure of the
    /// grid array itself aborts creation.
    pub fn create(config: &WorldConfig, terrain: &dyn TerrainSource) -> Result<Self> {
        config.validate()?;

        let render_distance = config.render_distance as i32;
        let half_extent = render_distance * (CHUNK_SIZE.ilog2() as i32 + 1);
        let height = config.world_height as i32;
        let center_offset = IVec2::from(config.center_offset);
        let cell_count = (2 * half_extent * 2 * half_extent * height) as usize;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(cell_count)
            .map_err(|e| Error::Allocation(format!("grid of {} cells: {}", cell_count, e)))?;

        let mut grid = Self {
            cells,
            render_distance,
            half_extent,
            height,
            center_offset,
            viewer_chunk: None,
            remesh_count: 0,
        };

        let started = Instant::now();
        let grid_center = IVec3::new(center_offset.x, 0, center_offset.y);
        let coords: Vec<ChunkCoord> = (0..cell_count).map(|i| grid.coord_of_index(i)).collect();

        let generated: Vec<Option<VoxelField>> = coords
            .into_par_iter()
            .map(|coord| {
                let lod = lod_band(coord, grid_center, config.render_distance).min(MAX_LOD);
                match VoxelField::generate(coord, lod, terrain) {
                    Ok(field) => Some(field),
                    Err(e) => {
                        log::error!("chunk {:?} left absent: {}", coord, e);
                        None
                    }
                }
            })
            .collect();
        grid.cells.extend(generated);
        log::info!(
            "generated {}/{} chunks in {:.2}s",
            grid.populated_count(),
            cell_count,
            started.elapsed().as_secs_f32()
        );

        let meshing = Instant::now();
        let meshes: Vec<Option<(u32, MeshBuffer)>> = grid
            .cells
            .par_iter()
            .map(|cell| {
                cell.as_ref().map(|field| {
                    let lod = field.lod();
                    let records = extract_surface(field, lod, &grid);
                    (lod, MeshBuffer::new(records, lod_scale(lod)))
                })
            })
            .collect();
        for (cell, mesh) in grid.cells.iter_mut().zip(meshes) {
            if let (Some(field), Some((lod, buffer))) = (cell.as_mut(), mesh) {
                field.install_mesh(lod, buffer);
            }
        }
        log::info!("meshed world in {:.2}s", meshing.elapsed().as_secs_f32());

        Ok(grid)
    }

    /// Bounds-checked chunk lookup
    pub fn chunk_at(&self, coord: ChunkCoord) -> Option<&VoxelField> {
        self.cells[self.index_of(coord)?].as_ref()
    }

    /// Global voxel lookup. Positions outside the grid, or inside an absent
    /// cell, read as empty.
    pub fn voxel_at(&self, global: IVec3) -> Voxel {
        let (coord, local) = split_voxel_pos(global);
        match self.chunk_at(coord) {
            Some(field) => field.voxel_at(local),
            None => Voxel::Empty,
        }
    }

    /// Per-frame update with the viewer's position.
    ///
    /// No-op until the viewer crosses into a new chunk cell. On a crossing,
    /// every chunk's band is recomputed; chunks whose band moved past the
    /// LOD ceiling are skipped (their old mesh stays), and exactly the
    /// chunks whose band differs from their stored LOD are re-extracted.
    pub fn tick(&mut self, viewer_pos: Vec3) {
        let v = ChunkCoord::from_world_pos(viewer_pos);
        let viewer_chunk = IVec3::new(v.x, v.y, v.z);
        if self.viewer_chunk == Some(viewer_chunk) {
            return;
        }
        self.viewer_chunk = Some(viewer_chunk);

        let mut stale: Vec<(usize, u32)> = Vec::new();
        for (index, cell) in self.cells.iter().enumerate() {
            let Some(field) = cell else { continue };
            let band = lod_band(field.coord(), viewer_chunk, self.render_distance as u32);
            if band > MAX_LOD {
                continue;
            }
            if band != field.lod() {
                stale.push((index, band));
            }
        }
        if stale.is_empty() {
            return;
        }

        // Extract against the pre-swap grid, then install all buffers; the
        // renderer never sees a half-replaced mesh.
        let grid = &*self;
        let rebuilt: Vec<(usize, u32, MeshBuffer)> = stale
            .par_iter()
            .filter_map(|&(index, lod)| {
                grid.cells[index].as_ref().map(|field| {
                    let records = extract_surface(field, lod, grid);
                    (index, lod, MeshBuffer::new(records, lod_scale(lod)))
                })
            })
            .collect();

        let remeshed = rebuilt.len();
        for (index, lod, buffer) in rebuilt {
            if let Some(field) = self.cells[index].as_mut() {
                field.install_mesh(lod, buffer);
                self.remesh_count += 1;
            }
        }
        log::debug!(
            "viewer entered chunk {:?}: remeshed {} chunks",
            viewer_chunk,
            remeshed
        );
    }

    /// Chunks worth drawing this frame. Beyond a minimum distance, chunks
    /// behind the view direction are skipped entirely; this is an
    /// optimization, not a correctness requirement.
    pub fn visible_chunks(
        &self,
        viewer_pos: Vec3,
        view_dir: Vec3,
    ) -> impl Iterator<Item = ChunkDraw<'_>> {
        self.cells.iter().filter_map(move |cell| {
            let field = cell.as_ref()?;
            let buffer = field.mesh()?;

            let center = field.coord().translation() + Vec3::splat(CHUNK_SIZE as f32 / 2.0);
            let to_chunk = center - viewer_pos;
            if to_chunk.length_squared() > CULL_MIN_DISTANCE_SQ && view_dir.dot(to_chunk) < 0.0 {
                return None;
            }

            Some(ChunkDraw {
                coord: field.coord(),
                translation: field.coord().translation(),
                lod_scale: buffer.lod_scale(),
                buffer,
            })
        })
    }

    /// All populated chunks
    pub fn chunks(&self) -> impl Iterator<Item = &VoxelField> {
        self.cells.iter().filter_map(|cell| cell.as_ref())
    }

    /// Total grid cells, populated or not
    pub fn chunk_count(&self) -> usize {
        self.cells.len()
    }

    /// Cells holding a generated chunk
    pub fn populated_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Chunks re-extracted by `tick` since creation
    pub fn remesh_count(&self) -> u64 {
        self.remesh_count
    }

    pub fn half_extent(&self) -> i32 {
        self.half_extent
    }

    /// Flat cell index of a chunk coordinate, if it lies inside the grid
    fn index_of(&self, coord: ChunkCoord) -> Option<usize> {
        let rel_x = coord.x - self.center_offset.x + self.half_extent;
        let rel_y = coord.y;
        let rel_z = coord.z - self.center_offset.y + self.half_extent;

        let span = 2 * self.half_extent;
        if rel_x < 0 || rel_x >= span || rel_y < 0 || rel_y >= self.height || rel_z < 0 || rel_z >= span {
            return None;
        }
        Some((rel_x * span * self.height + rel_y * span + rel_z) as usize)
    }

    /// Inverse of `index_of` over in-grid indices
    fn coord_of_index(&self, index: usize) -> ChunkCoord {
        let span = 2 * self.half_extent;
        let index = index as i32;
        let rel_x = index / (span * self.height);
        let rel_y = index % (span * self.height) / span;
        let rel_z = index % span;

        ChunkCoord::new(
            rel_x - self.half_extent + self.center_offset.x,
            rel_y,
            rel_z - self.half_extent + self.center_offset.y,
        )
    }
}

impl VoxelLookup for WorldGrid {
    fn voxel(&self, global: IVec3) -> Voxel {
        self.voxel_at(global)
    }
}
