//! Engine-space collision triangles and their bounds

use super::flags::CollisionFlags;
use crate::foundation::math::Vec3;

/// A triangle ready for encoding: engine-space vertices and unit normal
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionTriangle {
    /// Vertices in engine space
    pub vertices: [Vec3; 3],
    /// Unit normal in engine space
    pub normal: Vec3,
    /// Scene material index, 0 when the primitive has none
    pub material: usize,
    /// Orientation bit combined with surface bits
    pub flags: CollisionFlags,
}

/// Axis-Aligned Bounding Box over engine-space geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The zero box, used when there is no geometry
    pub fn zero() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros())
    }

    /// Bounds of every vertex of every triangle; the zero box when empty
    pub fn from_triangles(triangles: &[CollisionTriangle]) -> Self {
        let mut vertices = triangles.iter().flat_map(|tri| tri.vertices.iter());
        let Some(first) = vertices.next() else {
            return Self::zero();
        };
        vertices.fold(Self::new(*first, *first), |bounds, v| Self {
            min: bounds.min.inf(v),
            max: bounds.max.sup(v),
        })
    }
}
