//! Binary collision file format
//!
//! Big-endian throughout. A 28-byte header is followed by fixed 32-byte
//! triangle records, so the runtime can index records by stride:
//!
//! | Offset | Field          | Type        |
//! |--------|----------------|-------------|
//! | 0      | magic `COL1`   | 4 bytes     |
//! | 4      | version        | u16         |
//! | 6      | file flags (0) | u16         |
//! | 8      | triangle count | u32         |
//! | 12     | AABB min       | 3 x i16     |
//! | 18     | AABB max       | 3 x i16     |
//! | 24     | reserved (0)   | u32         |
//! | 28..   | records        | 32 bytes    |
//!
//! Record: three vertices of 3 x i16, normal 3 x i8, material u8, flags u16,
//! 8 reserved zero bytes.

pub mod layout;
pub mod encoder;
pub mod decoder;

pub use layout::{CollisionHeader, TriangleRecord};
pub use encoder::encode;
pub use decoder::{decode, read_collision_file, CollisionFile};

use thiserror::Error;

/// File magic
pub const MAGIC: [u8; 4] = *b"COL1";

/// Current format version
pub const VERSION: u16 = 1;

/// Fixed-point units per engine-space unit
pub const POSITION_SCALE: f32 = 16.0;

/// Scale applied to unit normal components
pub const NORMAL_SCALE: f32 = 127.0;

/// Header size in bytes
pub const HEADER_SIZE: usize = 28;

/// Triangle record size in bytes
pub const RECORD_SIZE: usize = 32;

/// Exact file size for `triangle_count` triangles
pub const fn file_size(triangle_count: usize) -> usize {
    HEADER_SIZE + RECORD_SIZE * triangle_count
}

/// Quantize a coordinate to fixed point, saturating at the i16 range
pub fn quantize_position(value: f32) -> i16 {
    (value * POSITION_SCALE)
        .round()
        .clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

/// Quantize a normal component, saturating at the i8 range
pub fn quantize_normal(value: f32) -> i8 {
    (value * NORMAL_SCALE)
        .round()
        .clamp(f32::from(i8::MIN), f32::from(i8::MAX)) as i8
}

/// Errors raised while encoding triangles
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The format stores material indices in one byte
    #[error("triangle {triangle} uses material index {material}, the format supports at most 255")]
    MaterialIndexOutOfRange {
        /// Triangle position in the list
        triangle: usize,
        /// Offending material index
        material: usize,
    },

    /// The header stores the triangle count in 32 bits
    #[error("too many triangles for the format: {0}")]
    TooManyTriangles(usize),

    /// Writing the output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while decoding a collision file
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Fewer bytes than a header
    #[error("file too small to be a collision file: {0} bytes")]
    TooShort(usize),

    /// Magic bytes do not match
    #[error("invalid collision file magic: {0:?}")]
    BadMagic([u8; 4]),

    /// Unknown format version
    #[error("unsupported collision format version {0}")]
    UnsupportedVersion(u16),

    /// Size does not match the header's triangle count
    #[error("file is {actual} bytes, header implies {expected}")]
    LengthMismatch {
        /// Size implied by the triangle count
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// Reading the input failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_rounds_to_nearest() {
        assert_eq!(quantize_position(1.0), 16);
        assert_eq!(quantize_position(0.03), 0);
        assert_eq!(quantize_position(0.04), 1);
        assert_eq!(quantize_position(-0.04), -1);
        assert_eq!(quantize_position(-2.5), -40);
    }

    #[test]
    fn test_position_saturates() {
        assert_eq!(quantize_position(3000.0), 32767);
        assert_eq!(quantize_position(-3000.0), -32768);
        assert_eq!(quantize_position(f32::INFINITY), 32767);
    }

    #[test]
    fn test_normal_quantization() {
        assert_eq!(quantize_normal(1.0), 127);
        assert_eq!(quantize_normal(-1.0), -127);
        assert_eq!(quantize_normal(0.5), 64);
        assert_eq!(quantize_normal(-1.5), -128);
        assert_eq!(quantize_normal(2.0), 127);
    }

    #[test]
    fn test_file_size() {
        assert_eq!(file_size(0), 28);
        assert_eq!(file_size(3), 124);
    }
}
