//! In-memory scene description
//!
//! The scene is an arena: nodes, meshes and materials are addressed by their
//! index, and node parents are derived from the authored child lists rather
//! than stored as back-pointers. Loaders (see [`crate::assets`]) fill a
//! [`Scene`]; the conversion pipeline only ever reads it.

pub mod node;
pub mod mesh;
pub mod hierarchy;

pub use node::{Node, LocalTransform};
pub use mesh::{Mesh, Primitive, Topology, Material};
pub use hierarchy::TransformResolver;

use thiserror::Error;

/// Errors raised while loading or walking a scene
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene container could not be read or parsed
    #[error("failed to load scene: {0}")]
    Load(String),

    /// A node's parent chain loops back on itself
    #[error("transform cycle detected at node {node}")]
    TransformCycle {
        /// Node at which the walk revisited itself
        node: usize,
    },

    /// A child list names a node outside the arena
    #[error("node {node} references missing node {target}")]
    InvalidNodeReference {
        /// Referencing node
        node: usize,
        /// Index that does not exist
        target: usize,
    },

    /// A transform query names a node outside the arena
    #[error("node {0} does not exist")]
    NodeOutOfRange(usize),

    /// An index buffer names a vertex outside the attribute buffer
    #[error("mesh {mesh} primitive {primitive}: vertex index {index} out of range ({count} vertices)")]
    VertexIndexOutOfRange {
        /// Mesh index
        mesh: usize,
        /// Primitive index within the mesh
        primitive: usize,
        /// Offending vertex index
        index: u32,
        /// Length of the attribute buffer
        count: usize,
    },
}

/// A complete scene: node forest, meshes and materials
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Node arena
    pub nodes: Vec<Node>,
    /// Mesh list, referenced by [`Node::mesh`]
    pub meshes: Vec<Mesh>,
    /// Material list, referenced by [`Primitive::material`]
    pub materials: Vec<Material>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name for every material, falling back to `Material_<index>`
    pub fn material_names(&self) -> Vec<String> {
        self.materials
            .iter()
            .enumerate()
            .map(|(index, material)| material.display_name(index))
            .collect()
    }

    /// Nodes instancing each mesh, in node order
    pub fn mesh_instances(&self) -> Vec<Vec<usize>> {
        let mut instances = vec![Vec::new(); self.meshes.len()];
        for (node_index, node) in self.nodes.iter().enumerate() {
            if let Some(slot) = node.mesh.and_then(|mesh| instances.get_mut(mesh)) {
                slot.push(node_index);
            }
        }
        instances
    }

    /// Derive the parent of every node from the authored child lists
    ///
    /// A node claimed by several parents keeps the first (lowest index) one.
    pub fn parent_indices(&self) -> Result<Vec<Option<usize>>, SceneError> {
        let mut parents = vec![None; self.nodes.len()];
        for (parent, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                let slot = parents
                    .get_mut(child)
                    .ok_or(SceneError::InvalidNodeReference { node: parent, target: child })?;
                match *slot {
                    None => *slot = Some(parent),
                    Some(existing) => log::warn!(
                        "Node {} is a child of both node {} and node {}; keeping {}",
                        child, existing, parent, existing
                    ),
                }
            }
        }
        Ok(parents)
    }
}
