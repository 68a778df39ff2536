//! glTF file plus sidecar on disk to collision file on disk

use crate::collision::{CollisionFlags, SurfaceType};
use crate::format::read_collision_file;
use crate::pipeline::{convert_file, ConversionOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "nodes": [
    { "name": "Lift", "translation": [0.0, 0.0, 4.0], "children": [1] },
    { "name": "Ground", "mesh": 0, "scale": [2.0, 2.0, 2.0] }
  ],
  "meshes": [
    { "primitives": [ { "attributes": { "POSITION": 0 }, "material": 0 } ] }
  ],
  "materials": [ { "name": "Pond_Surface" } ],
  "buffers": [ { "uri": "level.bin", "byteLength": 36 } ],
  "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0, 0, 0], "max": [1, 1, 0] }
  ]
}"#;

    /// Level files in a fresh directory that lives as long as the guard
    struct Level {
        _dir: TempDir,
        input: PathBuf,
        output: PathBuf,
    }

    fn write_level(sidecar: Option<(&str, &str)>) -> Level {
        let guard = tempfile::tempdir().unwrap();
        let dir = guard.path();

        let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let bin: Vec<u8> = positions.iter().flat_map(|v| v.to_le_bytes()).collect();
        std::fs::write(dir.join("level.bin"), bin).unwrap();
        std::fs::write(dir.join("level.gltf"), LEVEL_GLTF).unwrap();

        if let Some((extension, contents)) = sidecar {
            std::fs::write(dir.join("level").with_extension(extension), contents).unwrap();
        }
        Level {
            input: dir.join("level.gltf"),
            output: dir.join("out").join("level.col"),
            _dir: guard,
        }
    }

    fn convert(input: &Path, output: &Path) -> crate::pipeline::Conversion {
        convert_file(input, output, &ConversionOptions::default()).unwrap()
    }

    #[test]
    fn test_gltf_with_json_sidecar() {
        let Level { _dir, input, output } = write_level(Some((
            "json",
            r#"{ "surfaces": { "water": ["Pond_Surface"] } }"#,
        )));
        let conversion = convert(&input, &output);
        assert_eq!(conversion.triangle_count(), 1);

        let file = read_collision_file(&output).unwrap();
        assert_eq!(file.triangle_count(), 1);
        let record = &file.records[0];
        assert_eq!(record.flags(), CollisionFlags::WALKABLE | CollisionFlags::WATER);
        assert_eq!(record.material, 0);
        // Scaled by 2, lifted to authoring z = 4, which is engine y
        assert_eq!(record.vertices[1], [32, 64, 0]);
        assert_eq!(record.vertices[2], [0, 64, -32]);
        assert_eq!(std::fs::metadata(&output).unwrap().len(), 60);
    }

    #[test]
    fn test_gltf_with_toml_sidecar() {
        let Level { _dir, input, output } = write_level(Some(("toml", "[surfaces]\ncement = \"Pond_Surface\"\n")));
        let conversion = convert(&input, &output);
        assert_eq!(conversion.counts.surface(SurfaceType::Cement), 1);
    }

    #[test]
    fn test_gltf_with_broken_sidecar_still_converts() {
        let Level { _dir, input, output } = write_level(Some(("json", "{ not json")));
        let conversion = convert(&input, &output);
        assert_eq!(conversion.triangle_count(), 1);
        assert!(!conversion.counts.has_surfaces());
        assert!(output.exists());
    }

    #[test]
    fn test_gltf_model_scale() {
        let Level { _dir, input, output } = write_level(None);
        let options = ConversionOptions::default().with_model_scale(0.5);
        let conversion = convert_file(&input, &output, &options).unwrap();
        let file = read_collision_file(&output).unwrap();
        assert_eq!(file.records[0].vertices[1], [16, 32, 0]);
        assert_eq!(conversion.counts.walkable, 1);
    }
}
