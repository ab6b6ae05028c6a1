//! Integer grid arithmetic for chunk and voxel addressing
//!
//! Rust's `%` is a remainder, not a modulo: `-1 % 16 == -1`. Voxel addressing
//! across negative chunk coordinates needs floor division and a true
//! non-negative modulo, so both are spelled out here.

use glam::IVec3;

/// Floor division: rounds toward negative infinity.
///
/// `div_floor(-1, 16) == -1`, where `-1 / 16 == 0`.
pub fn div_floor(a: i32, b: i32) -> i32 {
    let q = a / b;
    if a % b != 0 && (a ^ b) < 0 { q - 1 } else { q }
}

/// True modulo: result is always in `[0, b)` for positive `b`.
///
/// `modulo(-1, 16) == 15`, where `-1 % 16 == -1`.
pub fn modulo(a: i32, b: i32) -> i32 {
    let r = a % b;
    if r < 0 { r + b } else { r }
}

/// Component-wise floor division of a vector.
pub fn div_floor_ivec3(v: IVec3, b: i32) -> IVec3 {
    IVec3::new(div_floor(v.x, b), div_floor(v.y, b), div_floor(v.z, b))
}

/// Component-wise true modulo of a vector.
pub fn modulo_ivec3(v: IVec3, b: i32) -> IVec3 {
    IVec3::new(modulo(v.x, b), modulo(v.y, b), modulo(v.z, b))
}

/// Deterministic 32-bit mix of a grid position and a salt.
///
/// Used for per-face color jitter; not a cryptographic hash, just enough
/// avalanche to break up banding.
pub fn hash3(pos: IVec3, salt: u32) -> u32 {
    let mut h = (pos.x as u32).wrapping_mul(0x9e37_79b9)
        ^ (pos.y as u32).wrapping_mul(0x85eb_ca6b)
        ^ (pos.z as u32).wrapping_mul(0xc2b2_ae35)
        ^ salt.wrapping_mul(0x27d4_eb2f);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2c1b_3c6d);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297a_2d39);
    h ^= h >> 15;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_floor_negative() {
        assert_eq!(div_floor(-1, 16), -1);
        assert_eq!(div_floor(-16, 16), -1);
        assert_eq!(div_floor(-17, 16), -2);
        assert_eq!(div_floor(0, 16), 0);
        assert_eq!(div_floor(15, 16), 0);
        assert_eq!(div_floor(16, 16), 1);
    }

    #[test]
    fn test_modulo_negative() {
        assert_eq!(modulo(-1, 16), 15);
        assert_eq!(modulo(-16, 16), 0);
        assert_eq!(modulo(-17, 16), 15);
        assert_eq!(modulo(0, 16), 0);
        assert_eq!(modulo(17, 16), 1);
    }

    #[test]
    fn test_div_mod_identity() {
        // a == div_floor(a, b) * b + modulo(a, b) for all sign combinations
        for a in -40..40 {
            for b in [1, 2, 7, 16] {
                assert_eq!(div_floor(a, b) * b + modulo(a, b), a, "a={} b={}", a, b);
            }
        }
    }

    #[test]
    fn test_vector_variants() {
        let v = IVec3::new(-1, 16, -17);
        assert_eq!(div_floor_ivec3(v, 16), IVec3::new(-1, 1, -2));
        assert_eq!(modulo_ivec3(v, 16), IVec3::new(15, 0, 15));
    }

    #[test]
    fn test_hash3_deterministic() {
        let p = IVec3::new(3, -7, 120);
        assert_eq!(hash3(p, 2), hash3(p, 2));
        assert_ne!(hash3(p, 2), hash3(p, 3));
        assert_ne!(hash3(p, 0), hash3(IVec3::new(4, -7, 120), 0));
    }
}
