//! Mathematical utilities for grid addressing

pub mod grid;

pub use grid::{div_floor, div_floor_ivec3, hash3, modulo, modulo_ivec3};
