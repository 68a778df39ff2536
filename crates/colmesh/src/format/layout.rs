//! Header and record layouts with their byte-level (de)serialization

use super::{
    quantize_normal, quantize_position, EncodeError, MAGIC, NORMAL_SCALE, POSITION_SCALE,
    RECORD_SIZE, HEADER_SIZE, VERSION,
};
use crate::collision::{Aabb, CollisionFlags, CollisionTriangle};
use crate::foundation::math::Vec3;

fn quantize_vec(v: &Vec3) -> [i16; 3] {
    [quantize_position(v.x), quantize_position(v.y), quantize_position(v.z)]
}

fn dequantize_vec(v: [i16; 3]) -> Vec3 {
    Vec3::new(
        f32::from(v[0]) / POSITION_SCALE,
        f32::from(v[1]) / POSITION_SCALE,
        f32::from(v[2]) / POSITION_SCALE,
    )
}

fn put_i16x3(out: &mut Vec<u8>, values: [i16; 3]) {
    for value in values {
        out.extend_from_slice(&value.to_be_bytes());
    }
}

fn get_i16x3(bytes: &[u8]) -> [i16; 3] {
    [
        i16::from_be_bytes([bytes[0], bytes[1]]),
        i16::from_be_bytes([bytes[2], bytes[3]]),
        i16::from_be_bytes([bytes[4], bytes[5]]),
    ]
}

/// File header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionHeader {
    /// Format version
    pub version: u16,
    /// Reserved file flags, written as zero
    pub file_flags: u16,
    /// Number of records that follow
    pub triangle_count: u32,
    /// Quantized AABB minimum
    pub aabb_min: [i16; 3],
    /// Quantized AABB maximum
    pub aabb_max: [i16; 3],
}

impl CollisionHeader {
    /// Header for `triangle_count` triangles bounded by `bounds`
    pub fn new(triangle_count: u32, bounds: &Aabb) -> Self {
        Self {
            version: VERSION,
            file_flags: 0,
            triangle_count,
            aabb_min: quantize_vec(&bounds.min),
            aabb_max: quantize_vec(&bounds.max),
        }
    }

    /// Append the 28 header bytes
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.version.to_be_bytes());
        out.extend_from_slice(&self.file_flags.to_be_bytes());
        out.extend_from_slice(&self.triangle_count.to_be_bytes());
        put_i16x3(out, self.aabb_min);
        put_i16x3(out, self.aabb_max);
        out.extend_from_slice(&0u32.to_be_bytes());
    }

    /// Parse header fields; the magic is checked by the caller
    pub fn read_from(bytes: &[u8; HEADER_SIZE]) -> Self {
        Self {
            version: u16::from_be_bytes([bytes[4], bytes[5]]),
            file_flags: u16::from_be_bytes([bytes[6], bytes[7]]),
            triangle_count: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            aabb_min: get_i16x3(&bytes[12..18]),
            aabb_max: get_i16x3(&bytes[18..24]),
        }
    }

    /// Dequantized bounds
    pub fn bounds(&self) -> Aabb {
        Aabb::new(dequantize_vec(self.aabb_min), dequantize_vec(self.aabb_max))
    }
}

/// One quantized triangle record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleRecord {
    /// Quantized vertices
    pub vertices: [[i16; 3]; 3],
    /// Quantized normal
    pub normal: [i8; 3],
    /// Material index
    pub material: u8,
    /// Raw flag bits
    pub flags: u16,
}

impl TriangleRecord {
    /// Quantize a triangle; `index` is only used for error reporting
    pub fn quantize(index: usize, triangle: &CollisionTriangle) -> Result<Self, EncodeError> {
        let material = u8::try_from(triangle.material).map_err(|_| EncodeError::MaterialIndexOutOfRange {
            triangle: index,
            material: triangle.material,
        })?;
        Ok(Self {
            vertices: triangle.vertices.each_ref().map(quantize_vec),
            normal: [
                quantize_normal(triangle.normal.x),
                quantize_normal(triangle.normal.y),
                quantize_normal(triangle.normal.z),
            ],
            material,
            flags: triangle.flags.bits(),
        })
    }

    /// Append the 32 record bytes
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for vertex in self.vertices {
            put_i16x3(out, vertex);
        }
        out.extend(self.normal.map(|c| c.to_be_bytes()[0]));
        out.push(self.material);
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(&[0u8; 8]);
    }

    /// Parse a record from exactly [`RECORD_SIZE`] bytes
    pub fn read_from(bytes: &[u8; RECORD_SIZE]) -> Self {
        Self {
            vertices: [get_i16x3(&bytes[0..6]), get_i16x3(&bytes[6..12]), get_i16x3(&bytes[12..18])],
            normal: [
                i8::from_be_bytes([bytes[18]]),
                i8::from_be_bytes([bytes[19]]),
                i8::from_be_bytes([bytes[20]]),
            ],
            material: bytes[21],
            flags: u16::from_be_bytes([bytes[22], bytes[23]]),
        }
    }

    /// Dequantized vertex `i` (0..3)
    pub fn vertex(&self, i: usize) -> Vec3 {
        dequantize_vec(self.vertices[i])
    }

    /// Dequantized normal
    pub fn normal(&self) -> Vec3 {
        Vec3::new(
            f32::from(self.normal[0]) / NORMAL_SCALE,
            f32::from(self.normal[1]) / NORMAL_SCALE,
            f32::from(self.normal[2]) / NORMAL_SCALE,
        )
    }

    /// Flag bits, keeping any bits this version does not name
    pub fn flags(&self) -> CollisionFlags {
        CollisionFlags::from_bits_retain(self.flags)
    }
}
