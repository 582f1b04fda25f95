//! Archive creation
//!
//! Entry names are the collected paths relative to the build directory, so
//! extracting an archive in another working directory recreates the same
//! layout there.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};
use flate2::write::GzEncoder;
use flate2::Compression;
use tar::Builder;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use walkdir::WalkDir;

use parcel_core::error::ParcelError;

use crate::StoreResult;

/// Write a tar+gzip archive of `paths` to `writer`.
///
/// Relative paths are taken relative to `base`; absolute ones must lie under
/// it. Directories are added recursively. Returns the writer once the gzip
/// stream is finished.
pub fn create_archive<W: Write>(writer: W, paths: &[Utf8PathBuf], base: &Utf8Path) -> StoreResult<W> {
    let mut builder = Builder::new(GzEncoder::new(writer, Compression::default()));
    let mut added = HashSet::new();

    for path in paths {
        let source = if path.is_absolute() {
            path.clone()
        } else {
            base.join(path)
        };
        let name = entry_name(&source, base)?;

        if source.is_dir() {
            append_dir_all(&mut builder, source.as_std_path(), &name, &mut added)?;
        } else {
            append_file(&mut builder, source.as_std_path(), &name, &mut added)?;
        }
    }

    let encoder = builder
        .into_inner()
        .map_err(|e| ParcelError::io("Failed to finish archive".to_string(), e))?;
    encoder
        .finish()
        .map_err(|e| ParcelError::io("Failed to finish archive".to_string(), e))
}

/// Build the archive for package `id` in a temporary `.tar.gz` file
pub fn create_archive_file(
    id: &str,
    paths: &[Utf8PathBuf],
    base: &Utf8Path,
) -> StoreResult<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("{}-", id))
        .suffix(".tar.gz")
        .tempfile()
        .map_err(|e| ParcelError::io("Failed to create temporary archive".to_string(), e))?;
    info!("Created archive {}", file.path().display());

    create_archive(file.as_file_mut(), paths, base)?;
    file.as_file()
        .sync_all()
        .map_err(|e| ParcelError::io("Failed to flush archive".to_string(), e))?;

    Ok(file)
}

/// Archive entry name for `source`: its path below `base`, normalized
fn entry_name(source: &Utf8Path, base: &Utf8Path) -> StoreResult<PathBuf> {
    let relative = source.strip_prefix(base).map_err(|_| {
        ParcelError::config("targets", format!("{} is outside {}", source, base))
    })?;

    let mut name = PathBuf::new();
    for component in relative.as_std_path().components() {
        match component {
            Component::Normal(part) => name.push(part),
            Component::CurDir => {},
            _ => {
                return Err(ParcelError::config(
                    "targets",
                    format!("{} escapes {}", source, base),
                ))
            },
        }
    }

    if name.as_os_str().is_empty() {
        return Err(ParcelError::config(
            "targets",
            format!("{} is the build directory itself", source),
        ));
    }
    Ok(name)
}

fn append_file<W: Write>(
    builder: &mut Builder<W>,
    source: &Path,
    name: &Path,
    added: &mut HashSet<PathBuf>,
) -> StoreResult<()> {
    if !added.insert(name.to_path_buf()) {
        debug!("{} already in archive, skipping", name.display());
        return Ok(());
    }

    debug!("Adding file {}", name.display());
    builder
        .append_path_with_name(source, name)
        .map_err(|e| ParcelError::io(format!("Failed to add {}", source.display()), e))
}

fn append_dir_all<W: Write>(
    builder: &mut Builder<W>,
    source: &Path,
    name: &Path,
    added: &mut HashSet<PathBuf>,
) -> StoreResult<()> {
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let message = format!("Failed to walk {}", source.display());
            match e.into_io_error() {
                Some(io) => ParcelError::io(message, io),
                None => ParcelError::io(message, std::io::ErrorKind::Other.into()),
            }
        })?;

        let relative = entry.path().strip_prefix(source).unwrap_or(Path::new(""));
        let entry_name = name.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if added.insert(entry_name.clone()) {
                builder
                    .append_dir(&entry_name, entry.path())
                    .map_err(|e| {
                        ParcelError::io(format!("Failed to add {}", entry.path().display()), e)
                    })?;
            }
        } else if file_type.is_file() {
            append_file(builder, entry.path(), &entry_name, added)?;
        } else {
            debug!("Skipping special file {}", entry.path().display());
        }
    }

    Ok(())
}
