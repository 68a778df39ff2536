//! Triangle extraction
//!
//! Walks every mesh instance in the scene, bakes world transforms into the
//! vertices, converts to engine axes and classifies each triangle. Output
//! order is mesh index, then instancing node, then primitive, then index
//! order within the primitive, so identical scenes always produce identical
//! triangle lists.

use super::flags::{CollisionFlags, FlagCounts, Orientation};
use super::surface::MaterialSurfaces;
use super::triangle::CollisionTriangle;
use crate::foundation::math::{
    self, Mat3, Mat4, Mat4Ext, Vec3, DEGENERATE_EPSILON,
};
use crate::scene::{Primitive, Scene, SceneError, Topology, TransformResolver};

/// Result of one extraction pass
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Triangles in deterministic order
    pub triangles: Vec<CollisionTriangle>,
    /// Primitives skipped for topology or missing positions
    pub skipped_primitives: usize,
}

impl Extraction {
    /// Per-flag triangle counts
    pub fn counts(&self) -> FlagCounts {
        self.triangles.iter().map(|tri| tri.flags).collect()
    }
}

/// Extract collision triangles from every mesh instance in `scene`
///
/// `model_scale` is applied uniformly at the root of every instance.
pub fn extract_triangles(
    scene: &Scene,
    surfaces: &MaterialSurfaces,
    model_scale: f32,
) -> Result<Extraction, SceneError> {
    let mut resolver = TransformResolver::new(scene, model_scale)?;
    let mut extraction = Extraction::default();

    for (mesh_index, (mesh, instances)) in scene.meshes.iter().zip(scene.mesh_instances()).enumerate() {
        let transforms = if instances.is_empty() {
            vec![resolver.root_transform()]
        } else {
            instances
                .iter()
                .map(|&node| resolver.world_transform(node))
                .collect::<Result<Vec<_>, _>>()?
        };

        for world in &transforms {
            let instance = Instance::new(world);
            for (primitive_index, primitive) in mesh.primitives.iter().enumerate() {
                if primitive.topology != Topology::Triangles {
                    log::debug!(
                        "Skipping mesh {} primitive {}: topology {:?}",
                        mesh_index, primitive_index, primitive.topology
                    );
                    extraction.skipped_primitives += 1;
                    continue;
                }
                let Some(positions) = primitive.positions.as_deref() else {
                    log::debug!("Skipping mesh {} primitive {}: no positions", mesh_index, primitive_index);
                    extraction.skipped_primitives += 1;
                    continue;
                };
                let source = PrimitiveSource {
                    mesh: mesh_index,
                    primitive: primitive_index,
                    positions,
                    normals: primitive.normals.as_deref(),
                };
                let surface = surfaces.lookup(primitive.material);
                let material = primitive.material.unwrap_or(0);
                for corners in index_triples(primitive, positions.len()) {
                    let triangle = instance.triangle(&source, corners, material, surface)?;
                    extraction.triangles.push(triangle);
                }
            }
        }
    }

    log::debug!(
        "Extracted {} triangles ({} primitives skipped, {} node transforms resolved)",
        extraction.triangles.len(),
        extraction.skipped_primitives,
        resolver.cached_count()
    );
    Ok(extraction)
}

/// Index triples of a triangle-list primitive; a trailing partial triple is
/// dropped
fn index_triples(primitive: &Primitive, vertex_count: usize) -> Vec<[u32; 3]> {
    match &primitive.indices {
        Some(indices) => indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect(),
        None => (0..(vertex_count / 3) as u32)
            .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
            .collect(),
    }
}

/// Attribute buffers of the primitive being extracted
struct PrimitiveSource<'a> {
    mesh: usize,
    primitive: usize,
    positions: &'a [[f32; 3]],
    normals: Option<&'a [[f32; 3]]>,
}

impl PrimitiveSource<'_> {
    fn fetch(&self, buffer: &[[f32; 3]], index: u32) -> Result<Vec3, SceneError> {
        buffer
            .get(index as usize)
            .map(|&[x, y, z]| Vec3::new(x, y, z))
            .ok_or(SceneError::VertexIndexOutOfRange {
                mesh: self.mesh,
                primitive: self.primitive,
                index,
                count: buffer.len(),
            })
    }
}

/// Per-instance transform state
struct Instance<'a> {
    world: &'a Mat4,
    // Inverse-transpose followed by the engine axis remap
    normal_matrix: Mat3,
}

impl<'a> Instance<'a> {
    fn new(world: &'a Mat4) -> Self {
        Self {
            world,
            normal_matrix: math::engine_axes_matrix() * world.normal_matrix(),
        }
    }

    fn triangle(
        &self,
        source: &PrimitiveSource<'_>,
        corners: [u32; 3],
        material: usize,
        surface: CollisionFlags,
    ) -> Result<CollisionTriangle, SceneError> {
        let mut vertices = [Vec3::zeros(); 3];
        for (vertex, &index) in vertices.iter_mut().zip(&corners) {
            let local = source.fetch(source.positions, index)?;
            *vertex = math::to_engine_axes(&self.world.apply_to_point(&local));
        }

        let normal = match source.normals {
            Some(normals) => {
                let mut sum = Vec3::zeros();
                for &index in &corners {
                    sum += source.fetch(normals, index)?;
                }
                unit_or_up(self.normal_matrix * (sum / 3.0))
            }
            None => face_normal(&vertices),
        };

        let orientation = Orientation::from_normal_y(normal.y);
        Ok(CollisionTriangle {
            vertices,
            normal,
            material,
            flags: orientation.flag() | surface,
        })
    }
}

/// Counter-clockwise face normal of engine-space vertices
pub fn face_normal(vertices: &[Vec3; 3]) -> Vec3 {
    let edge1 = vertices[1] - vertices[0];
    let edge2 = vertices[2] - vertices[0];
    unit_or_up(edge1.cross(&edge2))
}

/// Normalize, or fall back to engine up for degenerate vectors
fn unit_or_up(v: Vec3) -> Vec3 {
    let length = v.norm();
    if length < DEGENERATE_EPSILON || !length.is_finite() {
        math::engine_up()
    } else {
        v / length
    }
}
