//! Voxel data type

/// Binary occupancy state of a single voxel.
///
/// No per-voxel metadata is stored; color is derived procedurally at
/// extraction time from the voxel's world position.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Voxel {
    #[default]
    Empty = 0,
    Occupied = 1,
}

impl Voxel {
    pub fn is_occupied(self) -> bool {
        self == Voxel::Occupied
    }

    pub fn is_empty(self) -> bool {
        self == Voxel::Empty
    }

    /// Occupied iff the terrain density is below the surface threshold.
    pub fn from_density(density: f32) -> Self {
        if density < 0.0 {
            Voxel::Occupied
        } else {
            Voxel::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(std::mem::size_of::<Voxel>(), 1);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Voxel::default().is_empty());
    }

    #[test]
    fn test_from_density_threshold() {
        assert_eq!(Voxel::from_density(-0.001), Voxel::Occupied);
        assert_eq!(Voxel::from_density(0.0), Voxel::Empty);
        assert_eq!(Voxel::from_density(1.0), Voxel::Empty);
    }
}
