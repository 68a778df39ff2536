//! Triangle list to COL1 bytes

use super::layout::{CollisionHeader, TriangleRecord};
use super::{file_size, EncodeError};
use crate::collision::{Aabb, CollisionTriangle};

/// Encode triangles into a complete collision file image.
///
/// Records keep the order of `triangles`. The header AABB covers every
/// vertex and is the zero box when there are no triangles.
pub fn encode(triangles: &[CollisionTriangle]) -> Result<Vec<u8>, EncodeError> {
    let count = u32::try_from(triangles.len())
        .map_err(|_| EncodeError::TooManyTriangles(triangles.len()))?;

    // Validate everything before producing any bytes
    let records = triangles
        .iter()
        .enumerate()
        .map(|(i, tri)| TriangleRecord::quantize(i, tri))
        .collect::<Result<Vec<_>, _>>()?;

    let bounds = Aabb::from_triangles(triangles);
    let mut out = Vec::with_capacity(file_size(records.len()));
    CollisionHeader::new(count, &bounds).write_to(&mut out);
    for record in &records {
        record.write_to(&mut out);
    }

    debug_assert_eq!(out.len(), file_size(records.len()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionFlags;
    use crate::foundation::math::Vec3;
    use crate::format::HEADER_SIZE;

    fn floor(offset: f32, material: usize) -> CollisionTriangle {
        CollisionTriangle {
            vertices: [
                Vec3::new(offset, 0.0, 0.0),
                Vec3::new(offset + 1.0, 0.0, 0.0),
                Vec3::new(offset, 0.0, 1.0),
            ],
            normal: Vec3::new(0.0, 1.0, 0.0),
            material,
            flags: CollisionFlags::WALKABLE,
        }
    }

    #[test]
    fn test_empty_file_is_header_only() {
        let bytes = encode(&[]).unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[0..4], b"COL1");
        assert_eq!(&bytes[4..6], &[0, 1]);
        assert_eq!(&bytes[8..12], &[0, 0, 0, 0]);
        // Zero AABB
        assert!(bytes[12..24].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_size_matches_count() {
        let tris: Vec<_> = (0..5).map(|i| floor(i as f32, 0)).collect();
        let bytes = encode(&tris).unwrap();
        assert_eq!(bytes.len(), 28 + 32 * 5);
        assert_eq!(&bytes[8..12], &5u32.to_be_bytes());
    }

    #[test]
    fn test_records_keep_input_order() {
        let tris = [floor(0.0, 1), floor(2.0, 2), floor(4.0, 3)];
        let bytes = encode(&tris).unwrap();
        let materials: Vec<u8> = (0..3).map(|i| bytes[HEADER_SIZE + 32 * i + 21]).collect();
        assert_eq!(materials, vec![1, 2, 3]);
    }

    #[test]
    fn test_header_aabb() {
        let bytes = encode(&[floor(0.0, 0), floor(4.0, 0)]).unwrap();
        // min (0, 0, 0), max (5, 0, 1) in 1/16 units
        assert!(bytes[12..18].iter().all(|&b| b == 0));
        assert_eq!(&bytes[18..20], &80i16.to_be_bytes());
        assert_eq!(&bytes[20..22], &0i16.to_be_bytes());
        assert_eq!(&bytes[22..24], &16i16.to_be_bytes());
    }

    #[test]
    fn test_material_out_of_range_is_fatal() {
        let tris = [floor(0.0, 0), floor(1.0, 256)];
        match encode(&tris) {
            Err(EncodeError::MaterialIndexOutOfRange { triangle, material }) => {
                assert_eq!(triangle, 1);
                assert_eq!(material, 256);
            }
            other => panic!("expected material error, got {:?}", other.map(|b| b.len())),
        }
    }
}
