//! Mesh, primitive and material records

/// Primitive assembly mode, mirroring the glTF topology list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Individual points
    Points,
    /// Line segments
    Lines,
    /// Closed line loop
    LineLoop,
    /// Line strip
    LineStrip,
    /// Triangle list; the only topology collision extraction consumes
    #[default]
    Triangles,
    /// Triangle strip
    TriangleStrip,
    /// Triangle fan
    TriangleFan,
}

/// One drawable part of a mesh, with its attribute buffers already decoded
#[derive(Debug, Clone, Default)]
pub struct Primitive {
    /// Assembly mode
    pub topology: Topology,
    /// `POSITION` attribute
    pub positions: Option<Vec<[f32; 3]>>,
    /// `NORMAL` attribute
    pub normals: Option<Vec<[f32; 3]>>,
    /// Index buffer; absent means positions are used in order
    pub indices: Option<Vec<u32>>,
    /// Index into [`crate::scene::Scene::materials`]
    pub material: Option<usize>,
}

impl Primitive {
    /// Unindexed triangle list from raw positions
    pub fn triangles(positions: Vec<[f32; 3]>) -> Self {
        Self {
            positions: Some(positions),
            ..Self::default()
        }
    }

    /// Attach an index buffer
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Attach per-vertex normals
    pub fn with_normals(mut self, normals: Vec<[f32; 3]>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Attach a material reference
    pub fn with_material(mut self, material: usize) -> Self {
        self.material = Some(material);
        self
    }
}

/// A mesh: a list of primitives
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Authored name, informational only
    pub name: Option<String>,
    /// Primitives in authored order
    pub primitives: Vec<Primitive>,
}

/// A material; only its name matters for collision
#[derive(Debug, Clone, Default)]
pub struct Material {
    /// Authored name
    pub name: Option<String>,
}

impl Material {
    /// Create a named material
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()) }
    }

    /// Name used for sidecar lookups and listings
    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Material_{index}"))
    }
}
