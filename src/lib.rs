//! Voxen - a chunked voxel world engine with LOD surface extraction

pub mod core;
pub mod math;
pub mod terrain;
pub mod voxel;
pub mod mesh;
pub mod world;
