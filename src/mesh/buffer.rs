//! Chunk-owned mesh buffer handle

use super::face::FaceRecord;

/// Vertices the backend generates per face record.
pub const VERTS_PER_FACE: u32 = 6;

/// The face list extracted from one chunk, owned exclusively by that chunk.
///
/// Stands in for the uploaded graphics buffer: the renderer casts the record
/// slice to bytes, issues `vertex_count()` generated vertices, and scales the
/// emitted quads by `lod_scale()`. Replacing a chunk's mesh drops the old
/// buffer; two versions never coexist.
#[derive(Debug)]
pub struct MeshBuffer {
    records: Vec<FaceRecord>,
    lod_scale: u32,
}

impl MeshBuffer {
    pub fn new(records: Vec<FaceRecord>, lod_scale: u32) -> Self {
        Self { records, lod_scale }
    }

    pub fn records(&self) -> &[FaceRecord] {
        &self.records
    }

    /// Primitive count for the draw call
    pub fn record_count(&self) -> u32 {
        self.records.len() as u32
    }

    /// Generated vertex count (6 per face)
    pub fn vertex_count(&self) -> u32 {
        self.record_count() * VERTS_PER_FACE
    }

    /// Stride the buffer was extracted at, in voxels
    pub fn lod_scale(&self) -> u32 {
        self.lod_scale
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }
}
