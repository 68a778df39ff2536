//! glTF 2.0 loader
//!
//! Reads `.gltf` (external or data-URI buffers) and `.glb` files into a
//! [`Scene`]. Only what collision needs is decoded: node hierarchy and
//! transforms, positions, normals, indices and material names. Images are
//! never touched.

use crate::scene::{
    LocalTransform, Material, Mesh, Node, Primitive, Scene, SceneError, Topology,
};
use gltf::mesh::Mode;
use std::path::Path;

/// Loader for glTF scenes
pub struct GltfLoader;

impl GltfLoader {
    /// Load a glTF or GLB file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let gltf::Gltf { document, blob } =
            gltf::Gltf::open(path).map_err(|e| SceneError::Load(format!("{}: {}", path.display(), e)))?;
        let buffers = gltf::import_buffers(&document, path.parent(), blob)
            .map_err(|e| SceneError::Load(format!("{}: buffers: {}", path.display(), e)))?;

        let scene = Self::build_scene(&document, &buffers);
        log::debug!(
            "Loaded {}: {} nodes, {} meshes, {} materials",
            path.display(),
            scene.nodes.len(),
            scene.meshes.len(),
            scene.materials.len()
        );
        Ok(scene)
    }

    fn build_scene(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Scene {
        let nodes = document.nodes().map(|node| Self::convert_node(&node)).collect();

        let meshes = document
            .meshes()
            .map(|mesh| Mesh {
                name: mesh.name().map(str::to_string),
                primitives: mesh
                    .primitives()
                    .map(|primitive| Self::convert_primitive(&primitive, buffers))
                    .collect(),
            })
            .collect();

        let materials = document
            .materials()
            .map(|material| Material {
                name: material.name().map(str::to_string),
            })
            .collect();

        Scene { nodes, meshes, materials }
    }

    fn convert_node(node: &gltf::Node<'_>) -> Node {
        let transform = match node.transform() {
            gltf::scene::Transform::Matrix { matrix } => {
                let mut elements = [0.0; 16];
                for (column, values) in matrix.iter().enumerate() {
                    elements[column * 4..column * 4 + 4].copy_from_slice(values);
                }
                LocalTransform::Matrix(elements)
            }
            gltf::scene::Transform::Decomposed { translation, rotation, scale } => {
                LocalTransform::Decomposed {
                    translation: Some(translation),
                    rotation: Some(rotation),
                    scale: Some(scale),
                }
            }
        };

        Node {
            name: node.name().map(str::to_string),
            transform,
            mesh: node.mesh().map(|mesh| mesh.index()),
            children: node.children().map(|child| child.index()).collect(),
        }
    }

    fn convert_primitive(primitive: &gltf::Primitive<'_>, buffers: &[gltf::buffer::Data]) -> Primitive {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

        Primitive {
            topology: topology(primitive.mode()),
            positions: reader.read_positions().map(Iterator::collect),
            normals: reader.read_normals().map(Iterator::collect),
            indices: reader.read_indices().map(|indices| indices.into_u32().collect()),
            material: primitive.material().index(),
        }
    }
}

fn topology(mode: Mode) -> Topology {
    match mode {
        Mode::Points => Topology::Points,
        Mode::Lines => Topology::Lines,
        Mode::LineLoop => Topology::LineLoop,
        Mode::LineStrip => Topology::LineStrip,
        Mode::Triangles => Topology::Triangles,
        Mode::TriangleStrip => Topology::TriangleStrip,
        Mode::TriangleFan => Topology::TriangleFan,
    }
}
