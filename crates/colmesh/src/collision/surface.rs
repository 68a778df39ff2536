//! Surface classification from sidecar configuration
//!
//! A sidecar file next to the input scene maps surface types to material
//! names:
//!
//! ```json
//! { "surfaces": { "snow": ["Snow_Ground", "Ice"], "wood": "Planks" } }
//! ```
//!
//! Every problem with the sidecar is a warning. A missing or broken file
//! simply means no material carries a surface type.

use super::flags::{CollisionFlags, SurfaceType};
use crate::config::{self, Config, Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One material name or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialNames {
    /// A single material
    One(String),
    /// Several materials
    Many(Vec<String>),
}

impl MaterialNames {
    /// Iterate the names regardless of form
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            Self::One(name) => std::slice::from_ref(name),
            Self::Many(names) => names,
        };
        names.iter().map(String::as_str)
    }
}

/// Sidecar configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface-type name to material name(s); keys are matched ignoring case
    #[serde(default)]
    pub surfaces: BTreeMap<String, MaterialNames>,
}

impl Config for SurfaceConfig {}

/// Material name to surface flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceMap {
    by_material: HashMap<String, SurfaceType>,
}

impl SurfaceMap {
    /// Map that assigns no surface type to anything
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a parsed configuration, dropping unknown surface types.
    ///
    /// Types are applied in case-insensitive name order, so when a material
    /// is listed under two types the later name wins regardless of how the
    /// keys are capitalized.
    pub fn from_config(config: &SurfaceConfig) -> Self {
        let mut entries: Vec<_> = config.surfaces.iter().collect();
        entries.sort_by_cached_key(|(type_name, _)| type_name.to_ascii_lowercase());

        let mut by_material = HashMap::new();
        for (type_name, materials) in entries {
            let Some(surface) = SurfaceType::from_name(type_name) else {
                log::warn!(
                    "Unknown surface type '{}', skipping. Valid: {}",
                    type_name,
                    SurfaceType::valid_names()
                );
                continue;
            };
            for material in materials.iter() {
                log::debug!("  {} -> {}", material, surface.name());
                if let Some(previous) = by_material.insert(material.to_string(), surface) {
                    if previous != surface {
                        log::warn!(
                            "Material '{}' listed as both {} and {}; using {}",
                            material,
                            previous.name(),
                            surface.name(),
                            surface.name()
                        );
                    }
                }
            }
        }
        Self { by_material }
    }

    /// Load the sidecar for `input`, degrading to the empty map on any error
    pub fn load_for(input: &Path) -> Self {
        let Some(path) = config::find_sidecar(input) else {
            log::debug!("No surface config found next to {}", input.display());
            return Self::empty();
        };
        Self::load(&path)
    }

    /// Load a specific sidecar file, degrading to the empty map on any error
    pub fn load(path: &Path) -> Self {
        log::debug!("Loading surface config: {}", path.display());
        match SurfaceConfig::load_from_file(path) {
            Ok(config) => {
                let map = Self::from_config(&config);
                if !map.is_empty() {
                    log::debug!("Loaded {} material mappings", map.len());
                }
                map
            }
            Err(e) => {
                log::warn!("Failed to load surface config {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Surface flag for a material name; empty when unmapped
    pub fn flag_for(&self, material: &str) -> CollisionFlags {
        self.by_material
            .get(material)
            .map_or(CollisionFlags::empty(), |surface| surface.flag())
    }

    /// Resolve against a scene's material list, indexed by material index
    pub fn classify(&self, material_names: &[String]) -> MaterialSurfaces {
        let flags = material_names
            .iter()
            .map(|name| {
                let flag = self.flag_for(name);
                if !flag.is_empty() {
                    log::info!("Material '{}' -> surface type 0x{:04x}", name, flag.bits());
                }
                flag
            })
            .collect();
        MaterialSurfaces { flags }
    }

    /// Number of mapped material names
    pub fn len(&self) -> usize {
        self.by_material.len()
    }

    /// Whether no material is mapped
    pub fn is_empty(&self) -> bool {
        self.by_material.is_empty()
    }
}

/// Surface flags by material index for one scene
#[derive(Debug, Clone, Default)]
pub struct MaterialSurfaces {
    flags: Vec<CollisionFlags>,
}

impl MaterialSurfaces {
    /// Flags for a primitive's material; empty when it has none
    pub fn lookup(&self, material: Option<usize>) -> CollisionFlags {
        material
            .and_then(|index| self.flags.get(index).copied())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SurfaceConfig {
        SurfaceConfig::parse(json, "json").unwrap()
    }

    #[test]
    fn test_single_and_list_forms() {
        let map = SurfaceMap::from_config(&parse(
            r#"{ "surfaces": { "snow": ["Snow_Ground", "Ice"], "wood": "Planks" } }"#,
        ));
        assert_eq!(map.len(), 3);
        assert_eq!(map.flag_for("Snow_Ground"), CollisionFlags::SNOW);
        assert_eq!(map.flag_for("Ice"), CollisionFlags::SNOW);
        assert_eq!(map.flag_for("Planks"), CollisionFlags::WOOD);
        assert_eq!(map.flag_for("Grass"), CollisionFlags::empty());
    }

    #[test]
    fn test_unknown_surface_type_dropped_without_affecting_others() {
        let map = SurfaceMap::from_config(&parse(
            r#"{ "surfaces": { "lava": "Magma", "Water": "Pond", "CEMENT": ["Road"] } }"#,
        ));
        assert_eq!(map.len(), 2);
        assert_eq!(map.flag_for("Magma"), CollisionFlags::empty());
        assert_eq!(map.flag_for("Pond"), CollisionFlags::WATER);
        assert_eq!(map.flag_for("Road"), CollisionFlags::CEMENT);
    }

    #[test]
    fn test_duplicate_material_ordering_ignores_key_case() {
        // Byte order puts "Wood" before "snow"; name order puts snow first
        let map = SurfaceMap::from_config(&parse(r#"{ "surfaces": { "Wood": "X", "snow": "X" } }"#));
        assert_eq!(map.flag_for("X"), CollisionFlags::WOOD);

        let map = SurfaceMap::from_config(&parse(r#"{ "surfaces": { "wood": "X", "Snow": "X" } }"#));
        assert_eq!(map.flag_for("X"), CollisionFlags::WOOD);
    }

    #[test]
    fn test_material_absent_from_scene_is_still_mapped() {
        let map = SurfaceMap::from_config(&parse(r#"{ "surfaces": { "wood": "NotInScene" } }"#));
        assert_eq!(map.flag_for("NotInScene"), CollisionFlags::WOOD);
    }

    #[test]
    fn test_material_names_match_exactly() {
        let map = SurfaceMap::from_config(&parse(r#"{ "surfaces": { "wood": "Planks" } }"#));
        assert_eq!(map.flag_for("planks"), CollisionFlags::empty());
    }

    #[test]
    fn test_missing_surfaces_key_is_empty() {
        assert!(SurfaceMap::from_config(&parse("{}")).is_empty());
    }

    #[test]
    fn test_classify_by_material_index() {
        let map = SurfaceMap::from_config(&parse(r#"{ "surfaces": { "water": "Pond" } }"#));
        let surfaces = map.classify(&["Grass".to_string(), "Pond".to_string()]);
        assert_eq!(surfaces.lookup(Some(0)), CollisionFlags::empty());
        assert_eq!(surfaces.lookup(Some(1)), CollisionFlags::WATER);
        assert_eq!(surfaces.lookup(Some(7)), CollisionFlags::empty());
        assert_eq!(surfaces.lookup(None), CollisionFlags::empty());
    }

    #[test]
    fn test_malformed_sidecar_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level.json"), "{ \"surfaces\": ").unwrap();
        assert!(SurfaceMap::load_for(&dir.path().join("level.glb")).is_empty());
    }

    #[test]
    fn test_wrong_value_type_degrades_to_empty() {
        assert!(SurfaceConfig::parse(r#"{ "surfaces": { "snow": 5 } }"#, "json").is_err());
    }

    #[test]
    fn test_absent_sidecar_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("level.glb");
        assert!(SurfaceMap::load_for(&input).is_empty());
    }

    #[test]
    fn test_sidecar_loaded_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level.toml"), "[surfaces]\nsnow = [\"Drift\"]\n").unwrap();
        let map = SurfaceMap::load_for(&dir.path().join("level.glb"));
        assert_eq!(map.flag_for("Drift"), CollisionFlags::SNOW);
    }
}
