//! # colmesh
//!
//! Converts glTF scenes into compact fixed-point collision meshes.
//!
//! ## Features
//!
//! - **Transform baking**: node hierarchies are flattened into world space
//! - **Surface classification**: orientation bits from normals, surface-type
//!   bits from a sidecar material mapping
//! - **Binary format**: big-endian `COL1` files with 32-byte triangle records,
//!   plus a decoder for inspection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use colmesh::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConvertError> {
//!     let options = ConversionOptions::default().with_model_scale(1.0);
//!     let conversion = convert_file(Path::new("level.glb"), Path::new("level.col"), &options)?;
//!     println!("{} triangles", conversion.triangle_count());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod collision;
pub mod format;
pub mod assets;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use pipeline::{convert_scene, Conversion, ConversionOptions, ConvertError};
#[cfg(feature = "gltf")]
pub use pipeline::{convert_file, load_scene};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        Conversion, ConversionOptions, ConvertError,
        pipeline::convert_scene,
        collision::{CollisionFlags, CollisionTriangle, SurfaceMap, SurfaceType, Aabb},
        format::{decode, encode, CollisionFile},
        foundation::math::{Vec3, Mat4},
        scene::{Scene, SceneError},
    };
    #[cfg(feature = "gltf")]
    pub use crate::{assets::GltfLoader, pipeline::convert_file};
}
