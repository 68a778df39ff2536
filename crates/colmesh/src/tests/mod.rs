//! Cross-module conversion tests

#[cfg(feature = "gltf")]
mod gltf_integration;
