//! Format detection and document loading
//!
//! The format of a configuration file is decided by its extension alone;
//! file contents are never sniffed.

use camino::Utf8Path;
use serde::de::DeserializeOwned;

use parcel_core::error::ParcelError;

use crate::ConfigResult;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format for `path` from its extension
    pub fn from_path(path: &Utf8Path) -> ConfigResult<Self> {
        match path.extension() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            other => Err(ParcelError::UnsupportedConfigFormat {
                extension: other.map(|ext| format!(".{}", ext)).unwrap_or_default(),
            }),
        }
    }

    /// Deserialize `content`; `origin` names the source in error messages
    pub fn parse<T: DeserializeOwned>(&self, content: &str, origin: &str) -> ConfigResult<T> {
        let parsed = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| ParcelError::ConfigParse {
            path: origin.to_string(),
            message,
        })
    }
}

/// Read and deserialize a configuration document
pub async fn load_document<T: DeserializeOwned>(path: &Utf8Path) -> ConfigResult<T> {
    let format = ConfigFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ParcelError::io(format!("Failed to read {}", path), e))?;

    format.parse(&content, path.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Doc {
        name: String,
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("a.json")).unwrap(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("a.yaml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("dir/a.yml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
    }

    #[test]
    fn test_unsupported_extension() {
        let error = ConfigFormat::from_path(Utf8Path::new("config.ini")).unwrap_err();
        assert!(matches!(
            error,
            ParcelError::UnsupportedConfigFormat { ref extension } if extension == ".ini"
        ));

        let error = ConfigFormat::from_path(Utf8Path::new("config")).unwrap_err();
        assert!(matches!(
            error,
            ParcelError::UnsupportedConfigFormat { ref extension } if extension.is_empty()
        ));
    }

    #[test]
    fn test_parse_each_format() {
        let expected = Doc { name: "foo".to_string() };

        assert_eq!(ConfigFormat::Json.parse::<Doc>(r#"{"name": "foo"}"#, "t").unwrap(), expected);
        assert_eq!(ConfigFormat::Yaml.parse::<Doc>("name: foo\n", "t").unwrap(), expected);
        assert_eq!(ConfigFormat::Toml.parse::<Doc>("name = \"foo\"\n", "t").unwrap(), expected);
    }

    #[test]
    fn test_parse_error_names_origin() {
        let error = ConfigFormat::Json.parse::<Doc>("{", "update.json").unwrap_err();
        assert!(matches!(error, ParcelError::ConfigParse { ref path, .. } if path == "update.json"));
    }

    #[tokio::test]
    async fn test_load_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("doc.yml")).unwrap();
        tokio::fs::write(&path, "name: bar\n").await.unwrap();

        let doc: Doc = load_document(&path).await.unwrap();
        assert_eq!(doc.name, "bar");
    }

    #[tokio::test]
    async fn test_load_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("missing.json")).unwrap();

        let error = load_document::<Doc>(&path).await.unwrap_err();
        assert!(matches!(error, ParcelError::Io { .. }));
    }
}
