//! Face records, mesh buffers, and surface extraction

pub mod buffer;
pub mod extract;
pub mod face;

pub use buffer::{MeshBuffer, VERTS_PER_FACE};
pub use extract::{extract_surface, VoxelLookup};
pub use face::{FaceDir, FaceRecord};
