//! Configuration system
//!
//! Sidecar configuration files are plain serde documents whose format is
//! picked from the file extension.

pub use serde::{Serialize, Deserialize};

use std::path::Path;

/// Extensions understood by [`Config::load_from_file`], in lookup order
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["json", "toml", "ron"];

/// Configuration trait
pub trait Config: for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, &extension)
    }

    /// Parse configuration text in the format named by `extension`
    fn parse(contents: &str, extension: &str) -> Result<Self, ConfigError> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            "ron" => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Find the first existing sidecar for `input`: same directory and base
/// name, one of [`SUPPORTED_EXTENSIONS`]
pub fn find_sidecar(input: &Path) -> Option<std::path::PathBuf> {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| input.with_extension(ext))
        .find(|candidate| candidate.as_path() != input && candidate.is_file())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        values: BTreeMap<String, u32>,
    }

    impl Config for Sample {}

    #[test]
    fn test_parse_each_format() {
        let json = Sample::parse(r#"{ "values": { "a": 1 } }"#, "json").unwrap();
        let toml = Sample::parse("[values]\na = 1\n", "toml").unwrap();
        let ron = Sample::parse(r#"(values: { "a": 1 })"#, "ron").unwrap();
        assert_eq!(json, toml);
        assert_eq!(toml, ron);
        assert_eq!(json.values["a"], 1);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(Sample::parse("{}", "JSON").is_ok());
    }

    #[test]
    fn test_unsupported_format() {
        let err = Sample::parse("", "yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "yaml"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(Sample::parse("{ not json", "json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(Sample::load_from_file(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_find_sidecar_prefers_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("level.glb");
        let json = dir.path().join("level.json");
        let toml = dir.path().join("level.toml");
        std::fs::write(&toml, "").unwrap();
        assert_eq!(find_sidecar(&input), Some(toml.clone()));
        std::fs::write(&json, "{}").unwrap();
        assert_eq!(find_sidecar(&input), Some(json.clone()));
        std::fs::remove_file(json).unwrap();
        std::fs::remove_file(toml).unwrap();
        assert_eq!(find_sidecar(&input), None);
    }
}
