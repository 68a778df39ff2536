//! End-to-end conversion: scene in, collision file out

use crate::collision::{extract_triangles, Aabb, CollisionTriangle, FlagCounts, SurfaceMap};
use crate::format::{self, EncodeError};
use crate::scene::{Scene, SceneError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conversion errors
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input scene file does not exist
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Loading or walking the scene failed
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Encoding the triangles failed
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Writing the output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conversion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionOptions {
    /// Uniform scale applied at the scene root
    pub model_scale: f32,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self { model_scale: 1.0 }
    }
}

impl ConversionOptions {
    /// Set the model scale
    pub fn with_model_scale(mut self, model_scale: f32) -> Self {
        self.model_scale = model_scale;
        self
    }
}

/// Result of converting one scene
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Triangles in output order
    pub triangles: Vec<CollisionTriangle>,
    /// Encoded file image
    pub bytes: Vec<u8>,
    /// Engine-space bounds before quantization
    pub bounds: Aabb,
    /// Per-flag triangle counts
    pub counts: FlagCounts,
    /// Primitives skipped for topology or missing positions
    pub skipped_primitives: usize,
}

impl Conversion {
    /// Number of triangles written
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Convert an in-memory scene
pub fn convert_scene(
    scene: &Scene,
    surfaces: &SurfaceMap,
    options: &ConversionOptions,
) -> Result<Conversion, ConvertError> {
    let material_surfaces = surfaces.classify(&scene.material_names());
    let extraction = extract_triangles(scene, &material_surfaces, options.model_scale)?;

    if extraction.triangles.is_empty() {
        log::warn!("No triangles found in scene; writing an empty collision file");
    }

    let bytes = format::encode(&extraction.triangles)?;
    let bounds = Aabb::from_triangles(&extraction.triangles);
    let counts = extraction.counts();

    log::info!("Extracted {} triangles", counts.total);
    log::info!(
        "AABB: ({:.1}, {:.1}, {:.1}) to ({:.1}, {:.1}, {:.1})",
        bounds.min.x, bounds.min.y, bounds.min.z,
        bounds.max.x, bounds.max.y, bounds.max.z
    );

    Ok(Conversion {
        triangles: extraction.triangles,
        bytes,
        bounds,
        counts,
        skipped_primitives: extraction.skipped_primitives,
    })
}

/// Load a scene file
///
/// Fails with [`ConvertError::InputNotFound`] before touching the loader when
/// the path does not exist.
#[cfg(feature = "gltf")]
pub fn load_scene(input: &Path) -> Result<Scene, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::InputNotFound(input.to_path_buf()));
    }
    log::info!("Loading: {}", input.display());
    Ok(crate::assets::GltfLoader::load(input)?)
}

/// Convert `input` to a collision file at `output`
///
/// The surface sidecar is looked up next to `input`. Nothing is written when
/// any step fails.
#[cfg(feature = "gltf")]
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConversionOptions,
) -> Result<Conversion, ConvertError> {
    let scene = load_scene(input)?;
    let surfaces = SurfaceMap::load_for(input);
    let conversion = convert_scene(&scene, &surfaces, options)?;
    write_output(output, &conversion.bytes)?;
    Ok(conversion)
}

/// Write an encoded image, creating the parent directory if needed
pub fn write_output(output: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, bytes)?;
    log::info!("Wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}
