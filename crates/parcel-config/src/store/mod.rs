//! Package store settings, layered from the settings file, environment and CLI
//!
//! Precedence for the store path, lowest first: `~/.parcel.json`, the
//! `PARCEL_STORE` environment variable, the `--store` flag.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use parcel_core::error::ParcelError;
use parcel_core::types::VersionConstraint;

use crate::loader::load_document;
use crate::ConfigResult;

/// Settings file name inside the home directory
pub const SETTINGS_FILE: &str = ".parcel.json";

/// Environment variable overriding the store path
pub const STORE_ENV: &str = "PARCEL_STORE";

/// Constraint applied to requirements that leave `ver` out
pub const DEFAULT_CONSTRAINT: &str = ">=0.1";

/// Contents of the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFile {
    /// Store root directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Utf8PathBuf>,

    /// Default version constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ver: Option<String>,
}

/// Effective store settings after layering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub path: Utf8PathBuf,
    pub default_constraint: VersionConstraint,
}

impl StoreFile {
    /// Read a settings file; a missing file yields empty settings
    pub async fn load(path: &Utf8Path) -> ConfigResult<Self> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| ParcelError::io(format!("Failed to access {}", path), e))?;
        if !exists {
            debug!("No store settings at {}", path);
            return Ok(Self::default());
        }
        load_document(path).await
    }
}

impl StoreSettings {
    /// Location of the per-user settings file
    pub fn global_path() -> ConfigResult<Utf8PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            ParcelError::config("home_dir", "Could not determine home directory")
        })?;

        let home_dir = Utf8PathBuf::try_from(home_dir).map_err(|e| {
            ParcelError::config("home_dir", format!("Invalid home directory path: {}", e))
        })?;

        Ok(home_dir.join(SETTINGS_FILE))
    }

    /// Load the per-user settings and apply environment and CLI overrides
    pub async fn load(cli_path: Option<Utf8PathBuf>) -> ConfigResult<Self> {
        let file = StoreFile::load(&Self::global_path()?).await?;
        let env_path = std::env::var(STORE_ENV).ok();
        Self::merge(file, env_path, cli_path)
    }

    /// Layer the sources; the CLI path wins over the environment over the file
    pub fn merge(
        file: StoreFile,
        env_path: Option<String>,
        cli_path: Option<Utf8PathBuf>,
    ) -> ConfigResult<Self> {
        let path = cli_path
            .or_else(|| env_path.filter(|p| !p.is_empty()).map(Utf8PathBuf::from))
            .or(file.path)
            .filter(|p| !p.as_str().is_empty())
            .ok_or_else(|| {
                ParcelError::config(
                    "path",
                    format!(
                        "No package store configured; set 'path' in ~/{}, {} or pass --store",
                        SETTINGS_FILE, STORE_ENV
                    ),
                )
            })?;

        let default_ver = file
            .default_ver
            .filter(|ver| !ver.is_empty())
            .unwrap_or_else(|| DEFAULT_CONSTRAINT.to_string());
        let default_constraint = VersionConstraint::parse(&default_ver)
            .map_err(|e| ParcelError::config("default_ver", e.to_string()))?;

        Ok(Self {
            path,
            default_constraint,
        })
    }
}
