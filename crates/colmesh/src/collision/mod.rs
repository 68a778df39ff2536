//! Collision triangle extraction and classification
//!
//! # Module Organization
//!
//! - [`flags`] - Flag bits, orientation classes and surface types
//! - [`surface`] - Sidecar-driven material classification
//! - [`triangle`] - Engine-space triangles and bounds
//! - [`extract`] - Scene walk producing classified triangles

pub mod flags;
pub mod surface;
pub mod triangle;
pub mod extract;

// Re-export commonly used types
pub use flags::{CollisionFlags, FlagCounts, Orientation, SurfaceType};
pub use surface::{MaterialSurfaces, SurfaceConfig, SurfaceMap};
pub use triangle::{Aabb, CollisionTriangle};
pub use extract::{extract_triangles, Extraction};
