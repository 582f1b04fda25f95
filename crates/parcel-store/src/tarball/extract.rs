//! Archive extraction
//!
//! Entries land under the destination directory. Entries that would end up
//! outside it (absolute paths, `..` components) are skipped and logged
//! rather than failing the whole extraction. Existing files are overwritten;
//! an existing directory in the way of a file or link fails the extraction.

use std::fs;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Archive, Entry, EntryType};
use tracing::{debug, info, warn};

use parcel_core::error::ParcelError;

use crate::StoreResult;

/// What an extraction wrote and what it refused to write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Files and links written, relative to the destination
    pub extracted: Vec<PathBuf>,
    /// Entry paths skipped because they would escape the destination
    pub skipped: Vec<String>,
}

/// Extract a gzipped tar archive into `dest_dir`
pub fn extract_archive<R: Read>(reader: R, dest_dir: &Path) -> StoreResult<ExtractReport> {
    let mut archive = Archive::new(GzDecoder::new(reader));
    let mut report = ExtractReport::default();

    fs::create_dir_all(dest_dir).map_err(|e| {
        ParcelError::io(format!("Failed to create {}", dest_dir.display()), e)
    })?;

    let entries = archive
        .entries()
        .map_err(|e| ParcelError::io("Failed to read archive".to_string(), e))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| ParcelError::io("Failed to read archive entry".to_string(), e))?;

        let entry_path = entry
            .path()
            .map_err(|e| ParcelError::io("Invalid archive entry path".to_string(), e))?
            .into_owned();

        let relative = match safe_relative_path(&entry_path) {
            Some(relative) => relative,
            None => {
                warn!("Insecure path {:?} in archive, skipping", entry_path);
                report.skipped.push(entry_path.display().to_string());
                continue;
            },
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest_dir.join(&relative);

        match entry.header().entry_type() {
            EntryType::Directory => {
                fs::create_dir_all(&target).map_err(|e| {
                    ParcelError::io(format!("Failed to create {}", target.display()), e)
                })?;
                continue;
            },
            EntryType::Regular | EntryType::Continuous => {
                extract_regular_file(&mut entry, &target)?;
            },
            EntryType::Symlink => {
                if !extract_symlink(&entry, &target, &relative)? {
                    report.skipped.push(entry_path.display().to_string());
                    continue;
                }
            },
            other => {
                debug!("Skipping {:?} entry {}", other, relative.display());
                continue;
            },
        }

        #[cfg(unix)]
        {
            if entry.header().entry_type() != EntryType::Symlink {
                if let Ok(mode) = entry.header().mode() {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(&target, fs::Permissions::from_mode(mode)).map_err(|e| {
                        ParcelError::io(format!("Failed to set mode on {}", target.display()), e)
                    })?;
                }
            }
        }

        report.extracted.push(relative);
    }

    Ok(report)
}

/// Normalize an entry path, `None` if it is absolute or climbs out
fn safe_relative_path(entry_path: &Path) -> Option<PathBuf> {
    let mut relative = PathBuf::new();

    for component in entry_path.components() {
        match component {
            Component::Normal(name) => relative.push(name),
            Component::CurDir => {},
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(relative)
}

fn create_parent(target: &Path) -> StoreResult<()> {
    if let Some(parent) = target.parent() {
        if !parent.is_dir() {
            debug!("Creating directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| {
                ParcelError::io(format!("Failed to create {}", parent.display()), e)
            })?;
        }
    }
    Ok(())
}

/// Remove a file or link about to be replaced; directories are never replaced
fn remove_existing(target: &Path) -> StoreResult<()> {
    match fs::symlink_metadata(target) {
        Ok(metadata) if metadata.is_dir() => Err(ParcelError::io(
            format!("Cannot extract over directory {}", target.display()),
            io::Error::new(io::ErrorKind::AlreadyExists, "target is a directory"),
        )),
        Ok(_) => {
            info!("{} already exists, overwriting", target.display());
            fs::remove_file(target)
                .map_err(|e| ParcelError::io(format!("Failed to replace {}", target.display()), e))
        },
        Err(_) => Ok(()),
    }
}

fn extract_regular_file<R: Read>(entry: &mut Entry<R>, target: &Path) -> StoreResult<()> {
    create_parent(target)?;
    remove_existing(target)?;

    debug!("Extracting {}", target.display());
    let mut file = fs::File::create(target)
        .map_err(|e| ParcelError::io(format!("Failed to create {}", target.display()), e))?;

    std::io::copy(entry, &mut file)
        .map_err(|e| ParcelError::io(format!("Failed to write {}", target.display()), e))?;

    Ok(())
}

/// Create a symlink whose target stays inside the destination.
///
/// Returns `false` when the link was skipped.
fn extract_symlink<R: Read>(entry: &Entry<R>, target: &Path, relative: &Path) -> StoreResult<bool> {
    let link_name = entry
        .link_name()
        .map_err(|e| ParcelError::io("Invalid symlink in archive".to_string(), e))?;

    let Some(link_name) = link_name else {
        warn!("Symlink {} has no target, skipping", relative.display());
        return Ok(false);
    };

    let base = relative.parent().unwrap_or_else(|| Path::new(""));
    if safe_relative_path(&base.join(&link_name)).is_none() {
        warn!(
            "Symlink {} points outside the destination ({}), skipping",
            relative.display(),
            link_name.display()
        );
        return Ok(false);
    }

    create_parent(target)?;
    remove_existing(target)?;

    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&link_name, target)
            .map_err(|e| ParcelError::io(format!("Failed to link {}", target.display()), e))?;
    }
    #[cfg(not(unix))]
    {
        debug!("Symlinks are not supported here, skipping {}", relative.display());
    }

    Ok(true)
}
