//! Terrain density sources

pub mod generator;

pub use generator::{HeightfieldTerrain, TerrainParams, TerrainSource};
