//! Math utilities and types
//!
//! Provides the nalgebra aliases used by the conversion pipeline, the
//! local transform builders, and the mapping from the Z-up authoring
//! convention onto the Y-up engine convention.

pub use nalgebra::{
    Vector3,
    Matrix3, Matrix4,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Vector lengths below this are treated as degenerate
pub const DEGENERATE_EPSILON: f32 = 1e-4;

/// The engine's "up" axis, used when a normal cannot be derived
pub fn engine_up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Map an authoring-space vector into engine space: `(x, y, z) -> (x, z, -y)`
///
/// This is a rotation of -90 degrees about X. It is a bijection but not an
/// involution; applying it twice yields `(x, -y, -z)`.
pub fn to_engine_axes(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

/// Matrix form of [`to_engine_axes`]
pub fn engine_axes_matrix() -> Mat3 {
    Mat3::new(
        1.0, 0.0, 0.0,
        0.0, 0.0, 1.0,
        0.0, -1.0, 0.0,
    )
}

/// Build a homogeneous rotation matrix from an `[x, y, z, w]` quaternion
///
/// The quaternion is used as given; a non-unit quaternion produces a
/// non-orthonormal matrix rather than being renormalized.
pub fn rotation_matrix(q: [f32; 4]) -> Mat4 {
    let [x, y, z, w] = q;
    Mat4::new(
        1.0 - 2.0 * (y * y + z * z), 2.0 * (x * y - z * w),       2.0 * (x * z + y * w),       0.0,
        2.0 * (x * y + z * w),       1.0 - 2.0 * (x * x + z * z), 2.0 * (y * z - x * w),       0.0,
        2.0 * (x * z - y * w),       2.0 * (y * z + x * w),       1.0 - 2.0 * (x * x + y * y), 0.0,
        0.0,                         0.0,                         0.0,                         1.0,
    )
}

/// Compose `T * R * S` from optional translation, rotation and scale
pub fn compose_trs(
    translation: Option<[f32; 3]>,
    rotation: Option<[f32; 4]>,
    scale: Option<[f32; 3]>,
) -> Mat4 {
    let s = scale.map_or_else(Mat4::identity, |s| {
        Mat4::new_nonuniform_scaling(&Vec3::new(s[0], s[1], s[2]))
    });
    let r = rotation.map_or_else(Mat4::identity, rotation_matrix);
    let t = translation.map_or_else(Mat4::identity, |t| {
        Mat4::new_translation(&Vec3::new(t[0], t[1], t[2]))
    });
    t * r * s
}

/// Build a matrix from 16 column-major elements
pub fn from_column_major(elements: &[f32; 16]) -> Mat4 {
    Mat4::from_column_slice(elements)
}

/// Extension trait for Mat4 with the helpers the extractor needs
pub trait Mat4Ext {
    /// Upper-left 3x3 linear part
    fn linear_part(&self) -> Mat3;

    /// Matrix for transforming normals: inverse-transpose of the linear part,
    /// or the linear part itself when it is singular
    fn normal_matrix(&self) -> Mat3;

    /// Transform a position, including translation
    fn apply_to_point(&self, p: &Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn linear_part(&self) -> Mat3 {
        self.fixed_view::<3, 3>(0, 0).into_owned()
    }

    fn normal_matrix(&self) -> Mat3 {
        let linear = self.linear_part();
        linear
            .try_inverse()
            .map_or(linear, |inverse| inverse.transpose())
    }

    fn apply_to_point(&self, p: &Vec3) -> Vec3 {
        self.transform_point(&Point3::from(*p)).coords
    }
}
