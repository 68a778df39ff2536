//! COL1 bytes back to records, for inspection and verification

use super::layout::{CollisionHeader, TriangleRecord};
use super::{file_size, DecodeError, HEADER_SIZE, MAGIC, RECORD_SIZE, VERSION};
use crate::collision::{Aabb, FlagCounts};
use std::path::Path;

/// A parsed collision file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionFile {
    /// File header
    pub header: CollisionHeader,
    /// Records in file order
    pub records: Vec<TriangleRecord>,
}

impl CollisionFile {
    /// Number of triangle records
    pub fn triangle_count(&self) -> usize {
        self.records.len()
    }

    /// Dequantized header bounds
    pub fn bounds(&self) -> Aabb {
        self.header.bounds()
    }

    /// Flag tallies over all records
    pub fn summary(&self) -> FlagCounts {
        self.records.iter().map(TriangleRecord::flags).collect()
    }
}

/// Parse a complete collision file image
pub fn decode(bytes: &[u8]) -> Result<CollisionFile, DecodeError> {
    let Some((head, body)) = bytes.split_first_chunk::<HEADER_SIZE>() else {
        return Err(DecodeError::TooShort(bytes.len()));
    };

    let magic = [head[0], head[1], head[2], head[3]];
    if magic != MAGIC {
        return Err(DecodeError::BadMagic(magic));
    }

    let header = CollisionHeader::read_from(head);
    if header.version != VERSION {
        return Err(DecodeError::UnsupportedVersion(header.version));
    }

    let expected = file_size(header.triangle_count as usize);
    if bytes.len() != expected {
        return Err(DecodeError::LengthMismatch { expected, actual: bytes.len() });
    }

    let records = body
        .chunks_exact(RECORD_SIZE)
        .filter_map(|chunk| <&[u8; RECORD_SIZE]>::try_from(chunk).ok())
        .map(TriangleRecord::read_from)
        .collect();

    Ok(CollisionFile { header, records })
}

/// Read and parse a collision file from disk
pub fn read_collision_file(path: &Path) -> Result<CollisionFile, DecodeError> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}
