//! World grid management and LOD scheduling

pub mod grid;
pub mod lod;

pub use grid::{ChunkDraw, WorldGrid};
pub use lod::{lod_band, lod_scale, MAX_LOD};
