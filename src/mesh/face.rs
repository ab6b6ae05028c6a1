//! Packed face records consumed by the rendering backend

use bytemuck::{Pod, Zeroable};
use glam::IVec3;

/// One of the six axis-aligned face directions
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceDir {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl FaceDir {
    pub const ALL: [FaceDir; 6] = [
        FaceDir::PosX,
        FaceDir::NegX,
        FaceDir::PosY,
        FaceDir::NegY,
        FaceDir::PosZ,
        FaceDir::NegZ,
    ];

    /// Unit offset along the face normal
    pub fn offset(self) -> IVec3 {
        match self {
            FaceDir::PosX => IVec3::X,
            FaceDir::NegX => IVec3::NEG_X,
            FaceDir::PosY => IVec3::Y,
            FaceDir::NegY => IVec3::NEG_Y,
            FaceDir::PosZ => IVec3::Z,
            FaceDir::NegZ => IVec3::NEG_Z,
        }
    }

    /// The two unit axes perpendicular to the face normal
    pub fn orthogonal(self) -> (IVec3, IVec3) {
        match self {
            FaceDir::PosX | FaceDir::NegX => (IVec3::Y, IVec3::Z),
            FaceDir::PosY | FaceDir::NegY => (IVec3::X, IVec3::Z),
            FaceDir::PosZ | FaceDir::NegZ => (IVec3::X, IVec3::Y),
        }
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<FaceDir> {
        FaceDir::ALL.get(id as usize).copied()
    }
}

/// Compact descriptor of one visible voxel face.
///
/// Explicit shift/mask packing into a `u32` so the layout is portable and
/// directly interpretable by the vertex-generation shader stage:
///
/// ```text
/// bits  0..12  local block coordinate, 4 bits per axis (x, y, z)
/// bits 12..24  color, 4 bits per channel (r, g, b)
/// bits 24..27  face direction id
/// bits 27..32  flags, reserved (always zero)
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct FaceRecord(u32);

const COORD_MASK: u32 = 0xF;
const CHANNEL_MASK: u32 = 0xF;
const FACE_MASK: u32 = 0x7;

impl FaceRecord {
    /// Pack a face. Coordinate and color inputs are masked to field width.
    pub fn pack(local: IVec3, color: (u8, u8, u8), dir: FaceDir) -> Self {
        let x = local.x as u32 & COORD_MASK;
        let y = local.y as u32 & COORD_MASK;
        let z = local.z as u32 & COORD_MASK;
        let r = color.0 as u32 & CHANNEL_MASK;
        let g = color.1 as u32 & CHANNEL_MASK;
        let b = color.2 as u32 & CHANNEL_MASK;
        let face = dir.id() & FACE_MASK;

        Self(x | y << 4 | z << 8 | r << 12 | g << 16 | b << 20 | face << 24)
    }

    /// Local block coordinate
    pub fn local(self) -> IVec3 {
        IVec3::new(
            (self.0 & COORD_MASK) as i32,
            (self.0 >> 4 & COORD_MASK) as i32,
            (self.0 >> 8 & COORD_MASK) as i32,
        )
    }

    /// 4-bit color channels
    pub fn color(self) -> (u8, u8, u8) {
        (
            (self.0 >> 12 & CHANNEL_MASK) as u8,
            (self.0 >> 16 & CHANNEL_MASK) as u8,
            (self.0 >> 20 & CHANNEL_MASK) as u8,
        )
    }

    /// Face direction
    pub fn dir(self) -> FaceDir {
        // Masked to 3 bits at pack time from a 6-value enum
        match FaceDir::from_id(self.0 >> 24 & FACE_MASK) {
            Some(dir) => dir,
            None => FaceDir::PosX,
        }
    }

    /// Reserved flags field
    pub fn flags(self) -> u8 {
        (self.0 >> 27) as u8
    }

    /// Raw packed value
    pub fn bits(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_opposed() {
        assert_eq!(FaceDir::PosX.offset(), -FaceDir::NegX.offset());
        assert_eq!(FaceDir::PosY.offset(), -FaceDir::NegY.offset());
        assert_eq!(FaceDir::PosZ.offset(), -FaceDir::NegZ.offset());
    }

    #[test]
    fn test_orthogonal_perpendicular_to_normal() {
        for dir in FaceDir::ALL {
            let (u, v) = dir.orthogonal();
            assert_eq!(u.dot(dir.offset()), 0);
            assert_eq!(v.dot(dir.offset()), 0);
            assert_eq!(u.dot(v), 0);
        }
    }

    #[test]
    fn test_id_roundtrip() {
        for dir in FaceDir::ALL {
            assert_eq!(FaceDir::from_id(dir.id()), Some(dir));
        }
        assert_eq!(FaceDir::from_id(6), None);
    }

    #[test]
    fn test_pack_field_isolation() {
        let record = FaceRecord::pack(IVec3::new(15, 0, 9), (1, 14, 7), FaceDir::NegZ);
        assert_eq!(record.local(), IVec3::new(15, 0, 9));
        assert_eq!(record.color(), (1, 14, 7));
        assert_eq!(record.dir(), FaceDir::NegZ);
        assert_eq!(record.flags(), 0);
    }

    #[test]
    fn test_pack_masks_overflow() {
        // 16 wraps to 0 in a 4-bit field
        let record = FaceRecord::pack(IVec3::new(16, 17, -1), (16, 255, 0), FaceDir::PosY);
        assert_eq!(record.local(), IVec3::new(0, 1, 15));
        assert_eq!(record.color(), (0, 15, 0));
        assert_eq!(record.dir(), FaceDir::PosY);
    }

    #[test]
    fn test_record_is_four_bytes() {
        assert_eq!(std::mem::size_of::<FaceRecord>(), 4);
        let records = [FaceRecord::pack(IVec3::ONE, (2, 3, 4), FaceDir::PosX)];
        let bytes: &[u8] = bytemuck::cast_slice(&records);
        assert_eq!(bytes.len(), 4);
    }
}
