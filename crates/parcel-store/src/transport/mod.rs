//! Package store transport
//!
//! A store is a flat collection of named archives. Only entry names are
//! listed; fetching copies an archive into a local temporary file and
//! uploading never replaces an existing entry.

use std::future::Future;
use std::io;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use parcel_core::error::ParcelError;

use crate::StoreResult;

/// Remote or local storage holding package archives
pub trait PackageStore {
    /// Names of all entries in the store
    fn list_entries(&self) -> impl Future<Output = StoreResult<Vec<String>>> + Send;

    /// Check if an entry with exactly this name exists
    fn exists(&self, name: &str) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Copy an entry into a local temporary file
    fn fetch(&self, name: &str) -> impl Future<Output = StoreResult<NamedTempFile>> + Send;

    /// Store a local archive under `name`; fails if `name` is taken
    fn upload(&self, name: &str, archive: &Path) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Store backed by a directory (local disk or a mounted share)
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: Utf8PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn entry_path(&self, name: &str) -> StoreResult<Utf8PathBuf> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(ParcelError::Store {
                message: format!("Invalid store entry name {:?}", name),
                source: None,
            });
        }
        Ok(self.root.join(name))
    }

    fn unreachable(&self, e: io::Error) -> ParcelError {
        ParcelError::store(format!("Cannot read package store {}", self.root), e)
    }
}

impl PackageStore for DirectoryStore {
    async fn list_entries(&self) -> StoreResult<Vec<String>> {
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| self.unreachable(e))?;
        let mut names = Vec::new();

        while let Some(entry) = dir.next_entry().await.map_err(|e| self.unreachable(e))? {
            let file_type = entry.file_type().await.map_err(|e| self.unreachable(e))?;
            if !file_type.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => debug!("Skipping non UTF-8 store entry {:?}", name),
            }
        }

        names.sort();
        debug!("Listed {} entries in {}", names.len(), self.root);
        Ok(names)
    }

    async fn exists(&self, name: &str) -> StoreResult<bool> {
        let path = self.entry_path(name)?;
        fs::try_exists(&path).await.map_err(|e| self.unreachable(e))
    }

    async fn fetch(&self, name: &str) -> StoreResult<NamedTempFile> {
        let source = self.entry_path(name)?;
        let temp = tempfile::Builder::new()
            .prefix(&format!("{}-", name))
            .tempfile()
            .map_err(|e| ParcelError::io("Failed to create temporary file".to_string(), e))?;

        info!("Downloading {} to {}", name, temp.path().display());
        fs::copy(&source, temp.path())
            .await
            .map_err(|e| ParcelError::store(format!("Failed to download {}", name), e))?;

        Ok(temp)
    }

    async fn upload(&self, name: &str, archive: &Path) -> StoreResult<()> {
        let dest = self.entry_path(name)?;

        let mut source = fs::File::open(archive).await.map_err(|e| {
            ParcelError::io(format!("Failed to open {}", archive.display()), e)
        })?;

        let mut target = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dest)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(ParcelError::PackageExists {
                    name: name.to_string(),
                });
            },
            Err(e) => return Err(ParcelError::store(format!("Failed to upload {}", name), e)),
        };

        info!("Uploading {} as {}", archive.display(), dest);
        let copied = async {
            tokio::io::copy(&mut source, &mut target).await?;
            target.flush().await?;
            target.sync_all().await
        }
        .await;

        if let Err(e) = copied {
            // Leave no partial entry behind
            let _ = fs::remove_file(&dest).await;
            return Err(ParcelError::store(format!("Failed to upload {}", name), e));
        }

        Ok(())
    }
}
