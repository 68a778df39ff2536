//! Scene nodes and their local transforms

use crate::foundation::math::{self, Mat4};

/// A node's transform relative to its parent
#[derive(Debug, Clone, PartialEq)]
pub enum LocalTransform {
    /// Explicit matrix, 16 elements in column-major order
    Matrix([f32; 16]),
    /// Separate translation, rotation (`[x, y, z, w]`) and scale
    Decomposed {
        /// Translation, zero when absent
        translation: Option<[f32; 3]>,
        /// Rotation quaternion, identity when absent
        rotation: Option<[f32; 4]>,
        /// Scale, one when absent
        scale: Option<[f32; 3]>,
    },
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::Decomposed {
            translation: None,
            rotation: None,
            scale: None,
        }
    }
}

impl LocalTransform {
    /// Translation-only transform
    pub fn from_translation(translation: [f32; 3]) -> Self {
        Self::Decomposed {
            translation: Some(translation),
            rotation: None,
            scale: None,
        }
    }

    /// Convert to a matrix, `T * R * S` for the decomposed form
    pub fn to_matrix(&self) -> Mat4 {
        match self {
            Self::Matrix(elements) => math::from_column_major(elements),
            Self::Decomposed { translation, rotation, scale } => {
                math::compose_trs(*translation, *rotation, *scale)
            }
        }
    }
}

/// A node in the scene arena
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Authored name, informational only
    pub name: Option<String>,
    /// Transform relative to the parent node
    pub transform: LocalTransform,
    /// Mesh instanced by this node
    pub mesh: Option<usize>,
    /// Child node indices
    pub children: Vec<usize>,
}

impl Node {
    /// Create a node with the given local transform
    pub fn with_transform(transform: LocalTransform) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }
}
