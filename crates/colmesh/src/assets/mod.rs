//! Scene loaders
//!
//! Loaders turn an on-disk scene container into a [`crate::scene::Scene`].

#[cfg(feature = "gltf")]
pub mod gltf_loader;

#[cfg(feature = "gltf")]
pub use gltf_loader::GltfLoader;
