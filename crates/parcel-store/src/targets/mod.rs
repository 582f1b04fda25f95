//! Target path collection for package creation
//!
//! Each target is a glob pattern, optionally paired with an exclusion
//! pattern. Matched directories are expanded to the files below them so the
//! exclusion applies to every file that would end up in the archive.

use camino::{Utf8Path, Utf8PathBuf};
use glob::{MatchOptions, Pattern};
use indexmap::IndexSet;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use parcel_core::error::ParcelError;

use crate::StoreResult;

/// Shell wildcards: `*` and `?` also match `/`
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Expand `(path, exclude)` targets below `base` into a file list.
///
/// Returned paths are relative to `base`. A file matched by several targets
/// is listed once, at its first position.
pub fn collect_targets<'a, I>(targets: I, base: &Utf8Path) -> StoreResult<Vec<Utf8PathBuf>>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut collected = IndexSet::new();

    for (path, exclude) in targets {
        info!("Finding files for target {:?} excluding {:?}", path, exclude);
        let exclude = exclude.map(compile_pattern).transpose()?;

        let matches = glob_target(path, base)?;
        if matches.is_empty() {
            warn!("Target {:?} matched no files", path);
        }

        for file in matches {
            if let Some(pattern) = &exclude {
                if pattern.matches_with(file.as_str(), MATCH_OPTIONS) {
                    debug!("Excluded {} by {}", file, pattern);
                    continue;
                }
            }
            if !collected.insert(file.clone()) {
                debug!("Duplicate file {}, skipping", file);
            }
        }
    }

    Ok(collected.into_iter().collect())
}

fn compile_pattern(pattern: &str) -> StoreResult<Pattern> {
    Pattern::new(pattern).map_err(|e| {
        ParcelError::config("targets.exclude", format!("Invalid pattern {:?}: {}", pattern, e))
    })
}

/// Files matched by one target, relative to `base`, in glob order
fn glob_target(path: &str, base: &Utf8Path) -> StoreResult<Vec<Utf8PathBuf>> {
    let pattern = if Utf8Path::new(path).is_absolute() {
        path.to_string()
    } else {
        base.join(path).into_string()
    };

    let paths = glob::glob(&pattern).map_err(|e| {
        ParcelError::config("targets.path", format!("Invalid pattern {:?}: {}", path, e))
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let entry = entry.map_err(|e| {
            ParcelError::io(format!("Failed to read {}", e.path().display()), e.into())
        })?;
        let entry = Utf8PathBuf::try_from(entry).map_err(|e| {
            ParcelError::config("targets.path", format!("Non UTF-8 path: {}", e))
        })?;

        if entry.is_dir() {
            files.extend(walk_files(&entry, base)?);
        } else {
            files.push(relative_to(&entry, base)?);
        }
    }

    Ok(files)
}

fn walk_files(dir: &Utf8Path, base: &Utf8Path) -> StoreResult<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.map_err(|e| ParcelError::io(format!("Failed to walk {}", dir), e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = Utf8PathBuf::try_from(entry.into_path()).map_err(|e| {
            ParcelError::config("targets.path", format!("Non UTF-8 path: {}", e))
        })?;
        files.push(relative_to(&path, base)?);
    }

    Ok(files)
}

fn relative_to(path: &Utf8Path, base: &Utf8Path) -> StoreResult<Utf8PathBuf> {
    path.strip_prefix(base)
        .map(Utf8Path::to_path_buf)
        .map_err(|_| ParcelError::config("targets.path", format!("{} is outside {}", path, base)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let base = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        fs::create_dir_all(base.join("src/nested")).unwrap();
        fs::create_dir_all(base.join("assets")).unwrap();
        for file in [
            "README.md",
            "src/main.rs",
            "src/lib.rs",
            "src/notes.tmp",
            "src/nested/mod.rs",
            "assets/logo.png",
            "assets/cache.tmp",
        ] {
            fs::write(base.join(file), file).unwrap();
        }

        (temp_dir, base)
    }

    fn strings(paths: &[Utf8PathBuf]) -> Vec<&str> {
        paths.iter().map(|p| p.as_str()).collect()
    }

    #[test]
    fn test_glob_with_exclude() {
        let (_temp_dir, base) = fixture();

        let files = collect_targets([("src/*", Some("*.tmp"))], &base).unwrap();
        assert_eq!(strings(&files), vec!["src/lib.rs", "src/main.rs", "src/nested/mod.rs"]);
    }

    #[test]
    fn test_directories_are_expanded() {
        let (_temp_dir, base) = fixture();

        let files = collect_targets([("assets", None)], &base).unwrap();
        assert_eq!(strings(&files), vec!["assets/cache.tmp", "assets/logo.png"]);

        let files = collect_targets([("assets", Some("*.tmp"))], &base).unwrap();
        assert_eq!(strings(&files), vec!["assets/logo.png"]);
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let (_temp_dir, base) = fixture();

        let files = collect_targets(
            [("README.md", None), ("src/main.rs", None), ("*.md", None), ("src/*.rs", None)],
            &base,
        )
        .unwrap();
        assert_eq!(strings(&files), vec!["README.md", "src/main.rs", "src/lib.rs"]);
    }

    #[test]
    fn test_question_mark_matches_one_character() {
        let (_temp_dir, base) = fixture();

        let files = collect_targets([("src/*.rs", Some("src/???n.rs"))], &base).unwrap();
        assert_eq!(strings(&files), vec!["src/lib.rs"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let (_temp_dir, base) = fixture();
        assert!(collect_targets([("*.zip", None)], &base).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_patterns() {
        let (_temp_dir, base) = fixture();

        assert!(matches!(
            collect_targets([("src/[", None)], &base),
            Err(ParcelError::ConfigValidation { .. })
        ));
        assert!(matches!(
            collect_targets([("src/*", Some("[oops"))], &base),
            Err(ParcelError::ConfigValidation { .. })
        ));
    }
}
