//! World transform resolution over the node forest
//!
//! World transforms are resolved lazily and cached per node for the lifetime
//! of one resolver. Resolution walks the parent chain iteratively, so deep
//! hierarchies cannot exhaust the stack and cycles are reported instead of
//! looping.

use super::{Scene, SceneError};
use crate::foundation::math::{Mat4, Vec3};

/// Resolves and caches node world transforms for one conversion pass
#[derive(Debug)]
pub struct TransformResolver<'a> {
    scene: &'a Scene,
    parents: Vec<Option<usize>>,
    root: Mat4,
    cache: Vec<Option<Mat4>>,
    // Query number that last put each node on the walked chain
    visited: Vec<usize>,
    query: usize,
}

impl<'a> TransformResolver<'a> {
    /// Create a resolver; `model_scale` is premultiplied at the root
    pub fn new(scene: &'a Scene, model_scale: f32) -> Result<Self, SceneError> {
        let parents = scene.parent_indices()?;
        Ok(Self {
            scene,
            parents,
            root: Mat4::new_nonuniform_scaling(&Vec3::repeat(model_scale)),
            cache: vec![None; scene.nodes.len()],
            visited: vec![0; scene.nodes.len()],
            query: 0,
        })
    }

    /// Transform applied to geometry not instanced by any node
    pub fn root_transform(&self) -> Mat4 {
        self.root
    }

    /// World transform of `node`: root scale, then every ancestor's local
    /// transform from the top down, then the node's own
    pub fn world_transform(&mut self, node: usize) -> Result<Mat4, SceneError> {
        if node >= self.scene.nodes.len() {
            return Err(SceneError::NodeOutOfRange(node));
        }
        if let Some(cached) = self.cache[node] {
            return Ok(cached);
        }

        // Collect the unresolved part of the chain, stopping at the first
        // cached ancestor or at a root.
        self.query += 1;
        let mut chain = Vec::new();
        let mut base = self.root;
        let mut current = Some(node);
        while let Some(index) = current {
            if let Some(cached) = self.cache[index] {
                base = cached;
                break;
            }
            if self.visited[index] == self.query {
                return Err(SceneError::TransformCycle { node: index });
            }
            self.visited[index] = self.query;
            chain.push(index);
            current = self.parents[index];
        }

        for &index in chain.iter().rev() {
            base *= self.scene.nodes[index].transform.to_matrix();
            self.cache[index] = Some(base);
        }
        Ok(base)
    }

    /// Number of nodes resolved so far
    pub fn cached_count(&self) -> usize {
        self.cache.iter().filter(|entry| entry.is_some()).count()
    }
}
